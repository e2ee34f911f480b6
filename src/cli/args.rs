//! Command line argument parsing for the cinedex CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{CLUSTER_ENV, DATASET_ENV};

/// cinedex - index and query a movie metadata dataset
#[derive(Parser, Debug, Clone)]
#[command(name = "cinedex")]
#[command(about = "Index and query a movie metadata dataset with match-phrase queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CinedexArgs {
    /// Path to the movie CSV dataset
    #[arg(long = "dataset", env = DATASET_ENV, value_name = "PATH", global = true)]
    pub dataset_path: Option<PathBuf>,

    /// Cluster address: memory:// or file://<dir>
    #[arg(long = "cluster", env = CLUSTER_ENV, value_name = "ADDR", global = true)]
    pub cluster_address: Option<String>,

    /// JSON config file with dataset_path, cluster_address and loader settings
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CinedexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create an index
    #[command(name = "create-index")]
    CreateIndex(CreateIndexArgs),

    /// Delete an index and all its documents
    #[command(name = "delete-index")]
    DeleteIndex(IndexArgs),

    /// Load the sampled dataset into an index
    Load(LoadArgs),

    /// Bulk index documents from a JSONL file
    Bulk(BulkArgs),

    /// Index a single document
    Put(PutArgs),

    /// Show a stored document
    Get(DocumentArgs),

    /// Delete a document
    Delete(DocumentArgs),

    /// Count the documents in an index
    Count(IndexArgs),

    /// Refresh an index
    Refresh(IndexArgs),

    /// List all indices
    List,

    /// Search an index
    Search(SearchArgs),

    /// Create the movies index if needed, load it and run the sample query
    Demo(DemoArgs),
}

/// Arguments naming a single index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Index name
    #[arg(value_name = "INDEX")]
    pub index: String,
}

/// Arguments for creating an index
#[derive(Parser, Debug, Clone)]
pub struct CreateIndexArgs {
    /// Index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Mapping file (JSON, {"properties": {...}}); defaults to the movie mapping
    #[arg(short, long, value_name = "MAPPING_FILE")]
    pub mapping: Option<PathBuf>,
}

/// Arguments for loading the dataset
#[derive(Parser, Debug, Clone)]
pub struct LoadArgs {
    /// Index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Index documents one request at a time instead of in bulk
    #[arg(long)]
    pub single: bool,

    /// Batch size for bulk operations
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Number of records to sample from the dataset
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Sampling seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for bulk indexing a JSONL file
#[derive(Parser, Debug, Clone)]
pub struct BulkArgs {
    /// Index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Document file, one JSON object per line; an "_id" key sets the id
    #[arg(value_name = "DOCUMENT_FILE")]
    pub document_file: PathBuf,

    /// Batch size for bulk operations
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Don't refresh the index afterwards
    #[arg(long)]
    pub no_refresh: bool,
}

/// Arguments for indexing one document
#[derive(Parser, Debug, Clone)]
pub struct PutArgs {
    /// Index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Document id; generated when omitted
    #[arg(long)]
    pub id: Option<String>,

    /// The document as a JSON object
    #[arg(value_name = "JSON")]
    pub document: String,
}

/// Arguments addressing one document
#[derive(Parser, Debug, Clone)]
pub struct DocumentArgs {
    /// Index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Document id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Index name
    #[arg(value_name = "INDEX")]
    pub index: String,

    /// Query in JSON form; conflicts with --must and --must-not
    #[arg(long, conflicts_with_all = ["must", "must_not"])]
    pub query: Option<String>,

    /// Required phrase, as FIELD=PHRASE (repeatable)
    #[arg(long, value_name = "FIELD=PHRASE")]
    pub must: Vec<String>,

    /// Excluded phrase, as FIELD=PHRASE (repeatable)
    #[arg(long = "must-not", value_name = "FIELD=PHRASE")]
    pub must_not: Vec<String>,

    /// Offset for pagination
    #[arg(long, default_value = "0")]
    pub from: usize,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub size: usize,
}

/// Arguments for the demo
#[derive(Parser, Debug, Clone)]
pub struct DemoArgs {
    /// Index name
    #[arg(long, default_value = "movies")]
    pub index: String,

    /// Maximum number of results to show
    #[arg(short, long, default_value = "10")]
    pub size: usize,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
