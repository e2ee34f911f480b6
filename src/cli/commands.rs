//! Command implementations for the cinedex CLI.

use std::sync::Arc;

use log::{debug, info};

use crate::bulk::{BulkItem, BulkLoader};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{Config, ConfigFile, with_legacy_cluster};
use crate::dataset::{DatasetLoader, into_documents};
use crate::document::{DocId, Document, JsonlDocumentReader};
use crate::error::{CinedexError, Result};
use crate::query::{Query, QueryParser};
use crate::schema::Schema;
use crate::search::SearchRequest;
use crate::store::{IndexStore, open_store};

/// The query the demo runs: Jack Nicholson movies not directed by Roman Polanski.
pub const DEMO_QUERY: &str = r#"{
    "bool": {
        "must": {"match_phrase": {"cast": "jack nicholson"}},
        "filter": {"bool": {"must_not": {"match_phrase": {"director": "roman polanski"}}}}
    }
}"#;

/// Resolve the configuration from the command line, the environment and the
/// optional config file.
pub fn resolve_config(args: &CinedexArgs) -> Result<Config> {
    let file = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let cluster_address = with_legacy_cluster(args.cluster_address.clone(), |key| {
        std::env::var(key).ok()
    });
    Config::resolve(args.dataset_path.clone(), cluster_address, file)
}

/// Execute a CLI command with an already resolved configuration.
pub fn execute_command(args: CinedexArgs, config: Config) -> Result<()> {
    let store = open_store(&config.cluster_address)?;
    let context = Context {
        args: &args,
        config: &config,
        store,
    };

    let result = match &args.command {
        Command::CreateIndex(create_args) => context.create_index(create_args),
        Command::DeleteIndex(index_args) => context.delete_index(index_args),
        Command::Load(load_args) => context.load(load_args),
        Command::Bulk(bulk_args) => context.bulk(bulk_args),
        Command::Put(put_args) => context.put(put_args),
        Command::Get(document_args) => context.get(document_args),
        Command::Delete(document_args) => context.delete(document_args),
        Command::Count(index_args) => context.count(index_args),
        Command::Refresh(index_args) => context.refresh(index_args),
        Command::List => context.list(),
        Command::Search(search_args) => context.search(search_args),
        Command::Demo(demo_args) => context.demo(demo_args),
    };

    context.store.flush()?;
    result
}

struct Context<'a> {
    args: &'a CinedexArgs,
    config: &'a Config,
    store: Arc<dyn IndexStore>,
}

impl Context<'_> {
    /// Create a new index.
    fn create_index(&self, args: &CreateIndexArgs) -> Result<()> {
        let schema = match &args.mapping {
            Some(path) => {
                debug!("Loading mapping from {}", path.display());
                Schema::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Schema::movies(),
        };
        self.store.create_index(&args.index, schema)?;
        output_result("Index created", &Acknowledged::new(&args.index), self.args)
    }

    fn delete_index(&self, args: &IndexArgs) -> Result<()> {
        self.store.delete_index(&args.index)?;
        output_result("Index deleted", &Acknowledged::new(&args.index), self.args)
    }

    /// Load the sampled dataset into an index, then refresh it.
    fn load(&self, args: &LoadArgs) -> Result<()> {
        let loader = DatasetLoader::new()
            .with_sample_size(args.sample_size.unwrap_or(self.config.sample_size))
            .with_seed(args.seed.unwrap_or(self.config.seed));
        let records = loader.load(&self.config.dataset_path)?;
        let items = into_documents(records).into_iter().map(BulkItem::from);

        let bulk = BulkLoader::new(Arc::clone(&self.store))
            .with_batch_size(args.batch_size.unwrap_or(self.config.batch_size))?;
        let response = if args.single {
            bulk.put_each(&args.index, items)
        } else {
            bulk.bulk_put(&args.index, items)
        };
        self.store.refresh(&args.index)?;

        output_result("Dataset loaded", &response, self.args)
    }

    /// Bulk index a JSONL file.
    fn bulk(&self, args: &BulkArgs) -> Result<()> {
        let items = JsonlDocumentReader::new()
            .read(&args.document_file)?
            .map(|line| {
                line.map(|(id, document)| match id {
                    Some(id) => BulkItem::new(id, document),
                    None => BulkItem::auto(document),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        info!(
            "Read {} documents from {}",
            items.len(),
            args.document_file.display()
        );

        let response = BulkLoader::new(Arc::clone(&self.store))
            .with_batch_size(args.batch_size.unwrap_or(self.config.batch_size))?
            .bulk_put(&args.index, items);
        if !args.no_refresh {
            self.store.refresh(&args.index)?;
        }

        output_result("Bulk request finished", &response, self.args)
    }

    fn put(&self, args: &PutArgs) -> Result<()> {
        let document = Document::from_json(&args.document)?;
        let result = match &args.id {
            Some(id) => self
                .store
                .put_document(&args.index, DocId::new(id.as_str()), document)?,
            None => self.store.put_document_auto(&args.index, document)?,
        };
        output_result("Document indexed", &result, self.args)
    }

    fn get(&self, args: &DocumentArgs) -> Result<()> {
        let id = DocId::new(args.id.as_str());
        let source = self.store.get_document(&args.index, &id)?;
        output_result(
            "Document found",
            &DocumentResult {
                index: args.index.clone(),
                id,
                source,
            },
            self.args,
        )
    }

    fn delete(&self, args: &DocumentArgs) -> Result<()> {
        self.store
            .delete_document(&args.index, &DocId::new(args.id.as_str()))?;
        output_result("Document deleted", &Acknowledged::new(&args.index), self.args)
    }

    fn count(&self, args: &IndexArgs) -> Result<()> {
        let count = self.store.count(&args.index)?;
        output_result(
            "Document count",
            &CountResult {
                index: args.index.clone(),
                count,
            },
            self.args,
        )
    }

    fn refresh(&self, args: &IndexArgs) -> Result<()> {
        self.store.refresh(&args.index)?;
        output_result("Index refreshed", &Acknowledged::new(&args.index), self.args)
    }

    fn list(&self) -> Result<()> {
        output_result("Indices", &self.store.list_indices(), self.args)
    }

    fn search(&self, args: &SearchArgs) -> Result<()> {
        let parser = QueryParser::new();
        let query = match &args.query {
            Some(json) => parser.parse_json(json)?,
            None => parser.parse_clauses(&args.must, &args.must_not)?,
        };
        debug!("Parsed query: {query}");

        let request = SearchRequest::new(query).from(args.from).size(args.size);
        let results = self.store.search(&args.index, &request)?;
        output_result("Search finished", &results, self.args)
    }

    /// Create the movies index if it is missing, load the dataset, count it
    /// and run the sample query.
    fn demo(&self, args: &DemoArgs) -> Result<()> {
        if !self.store.index_exists(&args.index) {
            self.store.create_index(&args.index, Schema::movies())?;
        }

        let records = DatasetLoader::new()
            .with_sample_size(self.config.sample_size)
            .with_seed(self.config.seed)
            .load(&self.config.dataset_path)?;
        let response = BulkLoader::new(Arc::clone(&self.store))
            .with_batch_size(self.config.batch_size)?
            .bulk_put(
                &args.index,
                into_documents(records).into_iter().map(BulkItem::from),
            );
        if response.errors {
            return Err(CinedexError::other(format!(
                "{} documents failed to index into {}",
                response.failed(),
                args.index
            )));
        }
        self.store.refresh(&args.index)?;

        let count = self.store.count(&args.index)?;
        let query: Query = QueryParser::new().parse_json(DEMO_QUERY)?;
        let results = self
            .store
            .search(&args.index, &SearchRequest::new(query.clone()).size(args.size))?;

        output_result(
            "Demo finished",
            &DemoResult {
                index: args.index.clone(),
                count,
                query: query.to_json(),
                results,
            },
            self.args,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_demo_query_parses() {
        let query = QueryParser::new().parse_json(DEMO_QUERY).unwrap();
        assert!(query.matcher(&Schema::movies()).is_ok());
    }

    #[test]
    fn test_resolve_config_requires_cluster() {
        let args = CinedexArgs::try_parse_from([
            "cinedex",
            "--dataset",
            "movies.csv",
            "--cluster",
            "",
            "list",
        ])
        .unwrap();
        assert!(matches!(
            resolve_config(&args),
            Err(CinedexError::Config(_))
        ));
    }

    #[test]
    fn test_execute_against_file_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let cluster = format!("file://{}", dir.path().display());
        let run = |extra: &[&str]| {
            let mut argv: Vec<String> = ["cinedex", "--dataset", "unused.csv", "-q", "--cluster"]
                .iter()
                .map(|s| s.to_string())
                .collect();
            argv.push(cluster.clone());
            argv.extend(extra.iter().map(|s| s.to_string()));
            let args = CinedexArgs::try_parse_from(argv).unwrap();
            let config = resolve_config(&args).unwrap();
            execute_command(args, config)
        };

        run(&["create-index", "movies"]).unwrap();
        run(&["put", "movies", "--id", "1", r#"{"title": "Chinatown", "year": 1974}"#]).unwrap();
        run(&["get", "movies", "1"]).unwrap();
        run(&["search", "movies", "--must", "title=chinatown"]).unwrap();
        assert!(matches!(
            run(&["put", "movies", r#"{"rating": "R"}"#]),
            Err(CinedexError::SchemaViolation(_))
        ));
        run(&["delete", "movies", "1"]).unwrap();
        assert!(matches!(
            run(&["get", "movies", "1"]),
            Err(CinedexError::DocumentNotFound { .. })
        ));
        run(&["delete-index", "movies"]).unwrap();
        assert!(matches!(
            run(&["count", "movies"]),
            Err(CinedexError::IndexNotFound(_))
        ));
    }

    #[test]
    fn test_execute_uses_given_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            dataset_path: "unused.csv".into(),
            cluster_address: format!("file://{}", dir.path().display()),
            batch_size: 2,
            sample_size: 10,
            seed: 1,
        };
        // No --cluster flag: the address only comes from the resolved config.
        let args = CinedexArgs::try_parse_from(["cinedex", "-q", "create-index", "movies"]).unwrap();
        execute_command(args, config.clone()).unwrap();

        let store = open_store(&config.cluster_address).unwrap();
        assert!(store.index_exists("movies"));
    }

    #[test]
    fn test_bulk_jsonl_file() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            dataset_path: "unused.csv".into(),
            cluster_address: format!("file://{}", dir.path().display()),
            batch_size: 2,
            sample_size: 10,
            seed: 1,
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"_id": 1, "title": "Chinatown", "year": 1974}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"_id": "2", "title": "Reds", "year": 1981}}"#).unwrap();
        writeln!(file, r#"{{"title": "The Shining", "year": 1980}}"#).unwrap();
        file.flush().unwrap();

        let run = |argv: &[&str]| {
            let args = CinedexArgs::try_parse_from(argv).unwrap();
            execute_command(args, config.clone())
        };
        run(&["cinedex", "-q", "create-index", "movies"]).unwrap();
        let path = file.path().to_string_lossy().to_string();
        run(&["cinedex", "-q", "bulk", "movies", path.as_str()]).unwrap();

        let store = open_store(&config.cluster_address).unwrap();
        assert_eq!(store.count("movies").unwrap(), 3);
        assert!(store.get_document("movies", &DocId::from("1")).is_ok());
        assert!(store.get_document("movies", &DocId::from("2")).is_ok());

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "not json").unwrap();
        bad.flush().unwrap();
        let bad_path = bad.path().to_string_lossy().to_string();
        assert!(run(&["cinedex", "-q", "bulk", "movies", bad_path.as_str()]).is_err());
    }
}
