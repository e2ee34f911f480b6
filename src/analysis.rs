//! Text analysis module for cinedex.
//!
//! Analyzers turn field values and query phrases into comparable token
//! sequences. Each text field in a schema names one analyzer; the same
//! analyzer is applied to the stored value at indexing time and to the
//! phrase at query time.

pub mod analyzer;
pub mod token_filter;

pub use analyzer::{Analyzer, AnalyzerKind, EnglishAnalyzer, KeywordAnalyzer, StandardAnalyzer};
