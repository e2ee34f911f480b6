//! End-to-end tests: CSV dataset to sampled documents to a queried index.

use std::io::Write;
use std::sync::Arc;

use cinedex::dataset::{DEFAULT_SAMPLE_SIZE, into_documents};
use cinedex::prelude::*;
use tempfile::{NamedTempFile, TempDir};

const DIRECTORS: [&str; 4] = ["Roman Polanski", "Mike Nichols", "Bob Rafelson", "Hal Ashby"];

/// Write a dataset with `rows` complete rows and a few incomplete ones.
fn write_dataset(rows: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Release Year,Title,Origin/Ethnicity,Director,Cast,Genre,Wiki Page,Plot"
    )
    .unwrap();
    for i in 0..rows {
        let cast = if i % 5 == 0 {
            "Jack Nicholson, Faye Dunaway"
        } else {
            "Warren Beatty"
        };
        writeln!(
            file,
            "{},Movie {i},American,{},\"{cast}\",drama,https://en.wikipedia.org/wiki/Movie_{i},\"Plot of movie {i}.\"",
            1950 + (i % 60),
            DIRECTORS[i % DIRECTORS.len()],
        )
        .unwrap();
    }
    writeln!(file, "1999,No Director,American,,Somebody,drama,https://w/x,Plot").unwrap();
    writeln!(file, "1999,Unknown Genre,American,Someone,Somebody,NA,https://w/y,Plot").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_default_sample_is_deterministic() -> Result<()> {
    let dataset = write_dataset(DEFAULT_SAMPLE_SIZE + 500);

    let first = DatasetLoader::new().load(dataset.path())?;
    let second = DatasetLoader::new().load(dataset.path())?;
    assert_eq!(first.len(), DEFAULT_SAMPLE_SIZE);
    assert_eq!(first, second);
    assert!(first.iter().all(|record| record.title != "No Director"));
    Ok(())
}

#[test]
fn test_sample_requires_enough_complete_rows() {
    // The two incomplete rows do not count towards the sample.
    let dataset = write_dataset(DEFAULT_SAMPLE_SIZE - 1);
    assert!(matches!(
        DatasetLoader::new().load(dataset.path()),
        Err(CinedexError::DataSource(_))
    ));
}

#[test]
fn test_load_bulk_and_query() -> Result<()> {
    let dataset = write_dataset(400);
    let records = DatasetLoader::new()
        .with_sample_size(300)
        .load(dataset.path())?;

    let dir = TempDir::new().unwrap();
    let address = format!("file://{}", dir.path().display());
    let store = open_store(&address)?;
    store.create_index("movies", Schema::movies())?;

    let response = BulkLoader::new(Arc::clone(&store))
        .with_batch_size(64)?
        .bulk_put(
            "movies",
            into_documents(records.clone()).into_iter().map(BulkItem::from),
        );
    assert!(!response.errors);
    store.refresh("movies")?;
    assert_eq!(store.count("movies")?, 300);

    let query = QueryParser::new().parse_json(
        r#"{"bool": {
            "must": {"match_phrase": {"cast": "jack nicholson"}},
            "filter": {"bool": {"must_not": {"match_phrase": {"director": "roman polanski"}}}}
        }}"#,
    )?;
    let hits = store.search("movies", &SearchRequest::new(query).unbounded())?;

    let expected: Vec<DocId> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.cast.contains("Jack Nicholson") && r.director != "Roman Polanski")
        .map(|(position, _)| DocId::from(position))
        .collect();
    let actual: Vec<DocId> = hits.hits.into_iter().map(|hit| hit.id).collect();
    assert!(!expected.is_empty());
    assert_eq!(actual, expected);
    drop(store);

    // The same data is served after reopening the store.
    let reopened = open_store(&address)?;
    assert_eq!(reopened.count("movies")?, 300);
    let first = reopened.get_document("movies", &DocId::from(0usize))?;
    assert_eq!(first, records[0].to_document());
    Ok(())
}

#[test]
fn test_single_and_bulk_loading_agree() -> Result<()> {
    let dataset = write_dataset(120);
    let records = DatasetLoader::new()
        .with_sample_size(100)
        .with_seed(9)
        .load(dataset.path())?;

    let bulk_store: Arc<dyn IndexStore> = Arc::new(MemoryStore::new());
    let single_store: Arc<dyn IndexStore> = Arc::new(MemoryStore::new());
    for store in [&bulk_store, &single_store] {
        store.create_index("movies", Schema::movies())?;
    }

    let items = || into_documents(records.clone()).into_iter().map(BulkItem::from);
    BulkLoader::new(Arc::clone(&bulk_store)).bulk_put("movies", items());
    BulkLoader::new(Arc::clone(&single_store)).put_each("movies", items());

    let query = Query::match_phrase("director", "hal ashby");
    assert_eq!(
        bulk_store.search_documents("movies", &query)?,
        single_store.search_documents("movies", &query)?
    );
    assert_eq!(bulk_store.count("movies")?, single_store.count("movies")?);
    Ok(())
}
