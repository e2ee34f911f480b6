//! Integration tests for index lifecycle, document writes and bulk loading.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cinedex::prelude::*;
use cinedex::schema::SchemaRegistry;
use tempfile::TempDir;

fn movie(title: &str, year: i64) -> Document {
    Document::builder()
        .add_text("title", title)
        .add_integer("year", year)
        .build()
}

fn stores() -> Vec<(Arc<dyn IndexStore>, Option<TempDir>)> {
    let dir = TempDir::new().unwrap();
    let file_store = FileStore::open(dir.path()).unwrap();
    vec![
        (Arc::new(MemoryStore::new()), None),
        (Arc::new(file_store), Some(dir)),
    ]
}

#[test]
fn test_new_index_is_empty() -> Result<()> {
    for (store, _dir) in stores() {
        store.create_index("movies", Schema::movies())?;
        assert_eq!(store.count("movies")?, 0);
    }
    Ok(())
}

#[test]
fn test_put_counts_new_ids_once() -> Result<()> {
    for (store, _dir) in stores() {
        store.create_index("movies", Schema::movies())?;

        store.put_document("movies", DocId::from("1"), movie("Chinatown", 1974))?;
        assert_eq!(store.count("movies")?, 1);

        store.put_document("movies", DocId::from("2"), movie("Reds", 1981))?;
        assert_eq!(store.count("movies")?, 2);

        let overwrite = store.put_document("movies", DocId::from("1"), movie("Chinatown", 1974))?;
        assert!(!overwrite.is_created());
        assert_eq!(store.count("movies")?, 2);
    }
    Ok(())
}

#[test]
fn test_bulk_put_counts_only_valid_items() -> Result<()> {
    for (store, _dir) in stores() {
        store.create_index("movies", Schema::movies())?;

        let n: usize = 1200;
        let items: Vec<BulkItem> = (0..n)
            .map(|i| {
                let document = if i % 7 == 0 {
                    Document::builder().add_text("year", "unknown").build()
                } else if i % 11 == 0 {
                    Document::builder().add_text("budget", "large").build()
                } else {
                    movie(&format!("Movie {i}"), 1900 + (i % 120) as i64)
                };
                BulkItem::new(i, document)
            })
            .collect();
        let m = (0..n).filter(|i| i % 7 == 0 || i % 11 == 0).count();

        let response = BulkLoader::new(Arc::clone(&store))
            .with_batch_size(250)?
            .bulk_put("movies", items);
        store.refresh("movies")?;

        assert_eq!(response.items.len(), n);
        assert_eq!(response.succeeded(), n - m);
        assert_eq!(response.failed(), m);
        assert!(response.errors);
        assert!(response.failures().all(|item| matches!(
            item,
            BulkItemOutcome::Err { kind: ErrorKind::SchemaViolation, .. }
        )));
        assert_eq!(store.count("movies")?, n - m);
    }
    Ok(())
}

#[test]
fn test_bulk_put_is_visible_all_at_once() -> Result<()> {
    for (store, _dir) in stores() {
        store.create_index("movies", Schema::movies())?;

        let n: usize = 20_000;
        let items: Vec<BulkItem> = (0..n)
            .map(|i| BulkItem::new(i, movie(&format!("Movie {i}"), 1970)))
            .collect();
        let done = AtomicBool::new(false);

        let observed = std::thread::scope(|scope| {
            let reader = scope.spawn(|| {
                let mut counts = Vec::new();
                let mut record = |count: usize| {
                    if counts.last() != Some(&count) {
                        counts.push(count);
                    }
                };
                while !done.load(Ordering::Acquire) {
                    record(store.count("movies").unwrap());
                }
                record(store.count("movies").unwrap());
                counts
            });

            let response = BulkLoader::new(Arc::clone(&store))
                .with_batch_size(100)
                .unwrap()
                .bulk_put("movies", items);
            assert!(!response.errors);
            done.store(true, Ordering::Release);
            reader.join().unwrap()
        });

        assert_eq!(observed.last(), Some(&n));
        assert!(
            observed.iter().all(|&count| count == 0 || count == n),
            "partially applied bulk request was visible"
        );
    }
    Ok(())
}

#[test]
fn test_deleted_index_is_gone() -> Result<()> {
    for (store, _dir) in stores() {
        store.create_index("movies", Schema::movies())?;
        store.put_document("movies", DocId::from("1"), movie("Chinatown", 1974))?;
        store.delete_index("movies")?;

        assert!(matches!(
            store.count("movies"),
            Err(CinedexError::IndexNotFound(_))
        ));
        assert!(matches!(
            store.put_document("movies", DocId::from("1"), movie("Chinatown", 1974)),
            Err(CinedexError::IndexNotFound(_))
        ));
        assert!(store.list_indices().is_empty());
    }
    Ok(())
}

#[test]
fn test_duplicate_and_missing_indices() -> Result<()> {
    for (store, _dir) in stores() {
        store.create_index("movies", Schema::movies())?;
        assert!(matches!(
            store.create_index("movies", Schema::movies()),
            Err(CinedexError::IndexAlreadyExists(_))
        ));
        assert!(matches!(
            store.delete_index("shows"),
            Err(CinedexError::IndexNotFound(_))
        ));
        assert!(matches!(
            store.delete_document("movies", &DocId::from("404")),
            Err(CinedexError::DocumentNotFound { .. })
        ));
    }
    Ok(())
}

#[test]
fn test_file_store_survives_reopen() -> Result<()> {
    let dir = TempDir::new().unwrap();
    {
        let store: Arc<dyn IndexStore> = Arc::new(FileStore::open(dir.path())?);
        store.create_index("movies", Schema::movies())?;
        let items = (0..10usize).map(|i| BulkItem::new(i, movie(&format!("Movie {i}"), 1970)));
        let response = BulkLoader::new(Arc::clone(&store)).bulk_put("movies", items);
        assert!(!response.errors);
        store.put_document("movies", DocId::from("3"), movie("Chinatown", 1974))?;
        store.refresh("movies")?;
    }

    let store = FileStore::open(dir.path())?;
    assert_eq!(store.count("movies")?, 10);
    let docs = store.search_documents("movies", &Query::match_phrase("title", "chinatown"))?;
    assert_eq!(docs, vec![movie("Chinatown", 1974)]);

    // Overwriting after reopen continues the version sequence.
    let written = store.put_document("movies", DocId::from("3"), movie("Chinatown", 1974))?;
    assert_eq!(written.version, 3);
    Ok(())
}

#[test]
fn test_concurrent_writers_and_readers() -> Result<()> {
    let store: Arc<dyn IndexStore> = Arc::new(MemoryStore::new());
    store.create_index("movies", Schema::movies())?;

    std::thread::scope(|scope| {
        for worker in 0..4usize {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for i in 0..50usize {
                    let id = DocId::from(worker * 1000 + i);
                    store
                        .put_document("movies", id, movie("Five Easy Pieces", 1970))
                        .unwrap();
                    store
                        .search_documents("movies", &Query::match_phrase("title", "easy pieces"))
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(store.count("movies")?, 200);
    Ok(())
}

#[test]
fn test_registry_validates_against_registered_schema() {
    let registry = SchemaRegistry::new();
    let schema = Schema::from_json(
        r#"{"properties": {"title": {"type": "text", "analyzer": "english"},
                           "year": {"type": "integer"}}}"#,
    )
    .unwrap();
    registry.register("movies", schema).unwrap();

    assert!(registry.validate("movies", &movie("The Godfather", 1972)));
    assert!(!registry.validate(
        "movies",
        &Document::builder().add_text("director", "Francis Ford Coppola").build()
    ));
}
