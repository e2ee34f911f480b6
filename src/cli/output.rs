//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::bulk::{BulkItemOutcome, BulkResponse};
use crate::cli::args::{CinedexArgs, OutputFormat};
use crate::document::{DocId, Document};
use crate::error::Result;
use crate::search::SearchResults;
use crate::store::{IndexInfo, WriteResult};

/// Result structure for index-level acknowledgements.
#[derive(Debug, Serialize, Deserialize)]
pub struct Acknowledged {
    pub acknowledged: bool,
    pub index: String,
}

impl Acknowledged {
    pub fn new<S: Into<String>>(index: S) -> Self {
        Acknowledged {
            acknowledged: true,
            index: index.into(),
        }
    }
}

/// Result structure for count operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResult {
    pub index: String,
    pub count: usize,
}

/// Result structure for document lookups.
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentResult {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: DocId,
    #[serde(rename = "_source")]
    pub source: Document,
}

/// Result structure for the demo.
#[derive(Debug, Serialize, Deserialize)]
pub struct DemoResult {
    pub index: String,
    pub count: usize,
    pub query: serde_json::Value,
    pub results: SearchResults,
}

/// Values the CLI knows how to print for people.
pub trait HumanOutput {
    fn print_human(&self);
}

/// Output a result in the format chosen on the command line.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &CinedexArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 && !message.is_empty() {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &CinedexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

impl HumanOutput for Acknowledged {
    fn print_human(&self) {
        println!("acknowledged: {} ({})", self.acknowledged, self.index);
    }
}

impl HumanOutput for CountResult {
    fn print_human(&self) {
        println!("Count in index {}: {}", self.index, self.count);
    }
}

impl HumanOutput for WriteResult {
    fn print_human(&self) {
        println!(
            "{} document {} (version {})",
            if self.is_created() { "Created" } else { "Updated" },
            self.id,
            self.version
        );
    }
}

impl HumanOutput for DocumentResult {
    fn print_human(&self) {
        println!("Document {} in {}:", self.id, self.index);
        print_document(&self.source);
    }
}

impl HumanOutput for Vec<IndexInfo> {
    fn print_human(&self) {
        if self.is_empty() {
            println!("No indices");
            return;
        }
        println!("{:<24} {:>10} {:>8}  created", "index", "docs", "fields");
        for info in self {
            println!(
                "{:<24} {:>10} {:>8}  {}",
                info.name,
                info.docs_count,
                info.fields_count,
                info.created_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }
}

impl HumanOutput for BulkResponse {
    fn print_human(&self) {
        println!(
            "Indexed {} of {} documents in {}ms",
            self.succeeded(),
            self.items.len(),
            self.took_ms
        );
        for failure in self.failures() {
            if let BulkItemOutcome::Err { id, kind, reason } = failure {
                println!("  {id}: [{kind}] {reason}");
            }
        }
    }
}

impl HumanOutput for SearchResults {
    fn print_human(&self) {
        println!("Search Results:");
        println!("═══════════════");

        for (i, hit) in self.hits.iter().enumerate() {
            println!();
            println!("Result {}: id {} (Score: {:.3})", i + 1, hit.id, hit.score);
            println!("─────────────");
            print_document(&hit.source);
        }

        println!();
        println!("Total hits: {}", self.total);
        println!("Search time: {}ms", self.took_ms);
    }
}

impl HumanOutput for DemoResult {
    fn print_human(&self) {
        println!("Count in index {}: {}", self.index, self.count);
        println!("Query: {}", self.query);
        println!();
        self.results.print_human();
    }
}

fn print_document(document: &Document) {
    for (name, value) in document.fields() {
        println!("{name}: {value}");
    }
}
