//! Integration tests for match-phrase and boolean queries.

use cinedex::prelude::*;
use cinedex::query::BooleanQueryBuilder;

fn title_year_store() -> Result<MemoryStore> {
    let store = MemoryStore::new();
    let schema = Schema::from_json(
        r#"{"properties": {"title": {"type": "text", "analyzer": "english"},
                           "year": {"type": "integer"}}}"#,
    )?;
    store.create_index("films", schema)?;
    Ok(store)
}

#[test]
fn test_godfather_must_and_must_not() -> Result<()> {
    let store = title_year_store()?;
    let godfather = Document::builder()
        .add_text("title", "The Godfather")
        .add_integer("year", 1972)
        .build();
    store.put_document("films", DocId::from(1u64), godfather.clone())?;
    store.refresh("films")?;

    let must = BooleanQueryBuilder::new()
        .must(Query::match_phrase("title", "godfather"))
        .build();
    let found = store.search_documents("films", &Query::Bool(must))?;
    assert_eq!(found, vec![godfather]);

    let must_not = BooleanQueryBuilder::new()
        .must_not(Query::match_phrase("title", "godfather"))
        .build();
    assert!(store.search_documents("films", &Query::Bool(must_not))?.is_empty());
    Ok(())
}

#[test]
fn test_nicholson_without_polanski() -> Result<()> {
    let store = MemoryStore::new();
    store.create_index("movies", Schema::movies())?;
    store.put_document(
        "movies",
        DocId::from(2u64),
        Document::builder()
            .add_text("cast", "Jack Nicholson")
            .add_text("director", "Roman Polanski")
            .build(),
    )?;
    store.put_document(
        "movies",
        DocId::from(3u64),
        Document::builder()
            .add_text("cast", "Jack Nicholson")
            .add_text("director", "Milos Forman")
            .build(),
    )?;
    store.refresh("movies")?;

    let query = QueryParser::new().parse_json(
        r#"{"bool": {
            "must": {"match_phrase": {"cast": "jack nicholson"}},
            "filter": {"bool": {"must_not": {"match_phrase": {"director": "roman polanski"}}}}
        }}"#,
    )?;
    let results = store.search("movies", &SearchRequest::new(query))?;
    assert_eq!(results.total, 1);
    assert_eq!(results.hits[0].id, DocId::from("3"));
    assert_eq!(
        results.hits[0].source.get_field("director"),
        Some(&FieldValue::from("Milos Forman"))
    );
    Ok(())
}

#[test]
fn test_phrase_requires_contiguous_tokens() -> Result<()> {
    let store = MemoryStore::new();
    store.create_index("movies", Schema::movies())?;
    store.put_document(
        "movies",
        DocId::from(1u64),
        Document::builder()
            .add_text("cast", "Jack Lemmon, Walter Matthau, Nicholson Baker")
            .build(),
    )?;

    let split = Query::match_phrase("cast", "jack nicholson");
    assert!(store.search_documents("movies", &split)?.is_empty());

    let adjacent = Query::match_phrase("cast", "Walter Matthau");
    assert_eq!(store.search_documents("movies", &adjacent)?.len(), 1);

    let empty = Query::match_phrase("cast", "");
    assert!(store.search_documents("movies", &empty)?.is_empty());
    Ok(())
}

#[test]
fn test_english_analysis_on_titles_and_plots() -> Result<()> {
    let store = MemoryStore::new();
    store.create_index("movies", Schema::movies())?;
    store.put_document(
        "movies",
        DocId::from(1u64),
        Document::builder()
            .add_text("title", "The Witches of Eastwick")
            .add_text("plot", "Three women's wishes come true in a small town.")
            .build(),
    )?;

    for (field, phrase) in [
        ("title", "witches eastwick"),
        ("title", "WITCHES OF EASTWICK"),
        ("plot", "women's wishes"),
        ("plot", "small towns"),
    ] {
        assert_eq!(
            store
                .search_documents("movies", &Query::match_phrase(field, phrase))?
                .len(),
            1,
            "{field}: {phrase}"
        );
    }
    Ok(())
}

#[test]
fn test_keyword_and_integer_fields() -> Result<()> {
    let store = MemoryStore::new();
    store.create_index("movies", Schema::movies())?;
    store.put_document(
        "movies",
        DocId::from(1u64),
        Document::builder()
            .add_text("wiki_page", "https://en.wikipedia.org/wiki/Chinatown_(1974_film)")
            .add_text("year", "1974")
            .build(),
    )?;

    let exact = Query::match_phrase("wiki_page", "https://en.wikipedia.org/wiki/Chinatown_(1974_film)");
    assert_eq!(store.search_documents("movies", &exact)?.len(), 1);
    let partial = Query::match_phrase("wiki_page", "Chinatown");
    assert!(store.search_documents("movies", &partial)?.is_empty());

    assert_eq!(
        store
            .search_documents("movies", &Query::match_phrase("year", "1974"))?
            .len(),
        1
    );
    assert!(matches!(
        store.search_documents("movies", &Query::match_phrase("year", "nineteen")),
        Err(CinedexError::Query(_))
    ));
    Ok(())
}

#[test]
fn test_results_ordered_by_id_with_paging() -> Result<()> {
    let store = MemoryStore::new();
    store.create_index("movies", Schema::movies())?;
    for id in [10u64, 2, 33, 4, 1] {
        store.put_document(
            "movies",
            DocId::from(id),
            Document::builder().add_text("genre", "drama").build(),
        )?;
    }
    store.put_document_auto("movies", Document::builder().add_text("genre", "drama").build())?;

    let all = store.search("movies", &SearchRequest::new(Query::MatchAll).unbounded())?;
    let ids: Vec<String> = all.hits.iter().map(|h| h.id.to_string()).collect();
    assert_eq!(&ids[..5], &["1", "2", "4", "10", "33"]);
    assert_eq!(all.total, 6);

    let page = store.search(
        "movies",
        &SearchRequest::new(Query::match_phrase("genre", "drama")).from(1).size(2),
    )?;
    assert_eq!(page.total, 6);
    let ids: Vec<&str> = page.hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "4"]);
    Ok(())
}

#[test]
fn test_unknown_field_and_missing_index() -> Result<()> {
    let store = MemoryStore::new();
    store.create_index("movies", Schema::movies())?;

    assert!(matches!(
        store.search_documents("movies", &Query::match_phrase("rating", "R")),
        Err(CinedexError::Query(_))
    ));
    assert!(matches!(
        store.search_documents("shows", &Query::MatchAll),
        Err(CinedexError::IndexNotFound(_))
    ));
    Ok(())
}
