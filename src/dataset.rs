//! Movie dataset loading and sampling.
//!
//! The dataset is a CSV file with one movie per row. Rows with any missing
//! value are discarded, then a fixed-size sample is drawn with a seeded
//! generator so the same file always yields the same records in the same
//! order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::document::{DocId, Document};
use crate::error::{CinedexError, Result};

/// Default number of records drawn from the dataset.
pub const DEFAULT_SAMPLE_SIZE: usize = 3000;

/// Default sampling seed.
pub const DEFAULT_SEED: u64 = 42;

const TITLE: &str = "Title";
const ETHNICITY: &str = "Origin/Ethnicity";
const DIRECTOR: &str = "Director";
const CAST: &str = "Cast";
const GENRE: &str = "Genre";
const PLOT: &str = "Plot";
const YEAR: &str = "Release Year";
const WIKI_PAGE: &str = "Wiki Page";

/// The columns every dataset must have.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    TITLE, ETHNICITY, DIRECTOR, CAST, GENRE, PLOT, YEAR, WIKI_PAGE,
];

/// Cell values read as missing, in addition to empty cells.
const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || NA_MARKERS.contains(&value)
}

/// One movie from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub ethnicity: String,
    pub director: String,
    pub cast: String,
    pub genre: String,
    pub plot: String,
    pub year: i64,
    pub wiki_page: String,
}

impl MovieRecord {
    /// The document indexed for this record.
    pub fn to_document(&self) -> Document {
        Document::builder()
            .add_text("title", self.title.as_str())
            .add_text("ethnicity", self.ethnicity.as_str())
            .add_text("director", self.director.as_str())
            .add_text("cast", self.cast.as_str())
            .add_text("genre", self.genre.as_str())
            .add_text("plot", self.plot.as_str())
            .add_integer("year", self.year)
            .add_text("wiki_page", self.wiki_page.as_str())
            .build()
    }
}

/// Positions of the required columns in the header row.
#[derive(Debug)]
struct ColumnLayout {
    title: usize,
    ethnicity: usize,
    director: usize,
    cast: usize,
    genre: usize,
    plot: usize,
    year: usize,
    wiki_page: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(CinedexError::data_source(format!(
                "dataset is missing required columns: {}",
                missing.join(", ")
            )));
        }

        let position = |column: &str| headers.iter().position(|h| h == column).unwrap_or(0);
        Ok(ColumnLayout {
            title: position(TITLE),
            ethnicity: position(ETHNICITY),
            director: position(DIRECTOR),
            cast: position(CAST),
            genre: position(GENRE),
            plot: position(PLOT),
            year: position(YEAR),
            wiki_page: position(WIKI_PAGE),
        })
    }

    fn record(&self, row: &StringRecord) -> Option<MovieRecord> {
        let field = |i: usize| row.get(i).unwrap_or_default().to_string();
        let year = row.get(self.year)?;
        let year = match year.parse::<i64>() {
            Ok(year) => year,
            Err(_) => {
                warn!("Skipping row with non-integer release year '{year}'");
                return None;
            }
        };
        Some(MovieRecord {
            title: field(self.title),
            ethnicity: field(self.ethnicity),
            director: field(self.director),
            cast: field(self.cast),
            genre: field(self.genre),
            plot: field(self.plot),
            year,
            wiki_page: field(self.wiki_page),
        })
    }
}

/// Loads and samples the movie dataset.
///
/// ```no_run
/// use cinedex::dataset::DatasetLoader;
///
/// let records = DatasetLoader::new()
///     .with_sample_size(100)
///     .load("wiki_movie_plots_deduped.csv")
///     .unwrap();
/// assert_eq!(records.len(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    sample_size: usize,
    seed: u64,
    delimiter: u8,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        DatasetLoader {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            delimiter: b',',
        }
    }

    /// Set the number of records to sample.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Set the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set a custom delimiter character.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Load and sample the dataset at `path`.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Vec<MovieRecord>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            CinedexError::data_source(format!("cannot open {}: {e}", path.display()))
        })?;
        info!("Loading dataset from {}", path.display());
        self.load_from_reader(file)
    }

    /// Load and sample a dataset from any reader.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Vec<MovieRecord>> {
        let rows = self.complete_rows(reader)?;
        self.sample(rows)
    }

    /// Every complete row, in file order.
    pub fn complete_rows<R: Read>(&self, reader: R) -> Result<Vec<MovieRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| CinedexError::data_source(format!("failed to read CSV headers: {e}")))?
            .clone();
        let layout = ColumnLayout::from_headers(&headers)?;

        let mut rows = Vec::new();
        let mut dropped = 0usize;
        for (line, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                CinedexError::data_source(format!("malformed CSV at record {}: {e}", line + 1))
            })?;

            if row.len() < headers.len() || row.iter().any(is_missing) {
                dropped += 1;
                continue;
            }
            match layout.record(&row) {
                Some(record) => rows.push(record),
                None => dropped += 1,
            }
        }

        info!(
            "Read {} complete rows, dropped {dropped} incomplete rows",
            rows.len()
        );
        Ok(rows)
    }

    /// Draw the configured number of rows with the configured seed.
    ///
    /// The result is in sampling order, which is stable for a given input,
    /// size and seed.
    pub fn sample(&self, rows: Vec<MovieRecord>) -> Result<Vec<MovieRecord>> {
        if rows.len() < self.sample_size {
            return Err(CinedexError::data_source(format!(
                "dataset has {} complete rows, fewer than the requested sample of {}",
                rows.len(),
                self.sample_size
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let positions = rand::seq::index::sample(&mut rng, rows.len(), self.sample_size);

        let mut slots: Vec<Option<MovieRecord>> = rows.into_iter().map(Some).collect();
        let sampled: Vec<MovieRecord> = positions
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();

        debug!(
            "Sampled {} rows with seed {}",
            sampled.len(),
            self.seed
        );
        Ok(sampled)
    }
}

/// Turn sampled records into documents keyed by their sample position.
pub fn into_documents(records: Vec<MovieRecord>) -> Vec<(DocId, Document)> {
    records
        .iter()
        .enumerate()
        .map(|(position, record)| (DocId::from(position), record.to_document()))
        .collect()
}
