//! Analyzer trait and the built-in analyzers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token_filter;
use crate::error::{CinedexError, Result};

/// Trait for analyzers that turn text into a token sequence.
pub trait Analyzer: Send + Sync + fmt::Debug {
    /// Analyze `text` into tokens, in order of appearance.
    fn analyze(&self, text: &str) -> Vec<String>;

    /// Get the name of this analyzer as it appears in mappings.
    fn name(&self) -> &'static str;
}

/// Unicode word segmentation followed by lowercasing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAnalyzer;

impl StandardAnalyzer {
    fn tokenize(text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        token_filter::lowercase(Self::tokenize(text))
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

/// The standard analyzer plus possessive stripping, English stop words and
/// light plural stemming.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishAnalyzer;

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = StandardAnalyzer.analyze(text);
        let tokens = token_filter::possessive(tokens);
        let tokens = token_filter::stop(tokens, token_filter::ENGLISH_STOP_WORDS);
        token_filter::plural_stem(tokens)
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

/// Emits the whole input as a single, unmodified token.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalyzer;

impl Analyzer for KeywordAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        }
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

static STANDARD: StandardAnalyzer = StandardAnalyzer;
static ENGLISH: EnglishAnalyzer = EnglishAnalyzer;
static KEYWORD: KeywordAnalyzer = KeywordAnalyzer;

/// The analyzers a mapping may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    #[default]
    Standard,
    English,
    Keyword,
}

impl AnalyzerKind {
    /// Get the analyzer implementation for this kind.
    pub fn analyzer(&self) -> &'static dyn Analyzer {
        match self {
            AnalyzerKind::Standard => &STANDARD,
            AnalyzerKind::English => &ENGLISH,
            AnalyzerKind::Keyword => &KEYWORD,
        }
    }

    pub fn name(&self) -> &'static str {
        self.analyzer().name()
    }
}

impl FromStr for AnalyzerKind {
    type Err = CinedexError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "standard" => Ok(AnalyzerKind::Standard),
            "english" => Ok(AnalyzerKind::English),
            "keyword" => Ok(AnalyzerKind::Keyword),
            other => Err(CinedexError::schema(format!("unknown analyzer '{other}'"))),
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_analyzer() {
        let tokens = StandardAnalyzer.analyze("Jack Nicholson, Shelley Duvall");
        assert_eq!(tokens, vec!["jack", "nicholson", "shelley", "duvall"]);
    }

    #[test]
    fn test_english_analyzer() {
        let tokens = EnglishAnalyzer.analyze("The Lord of the Rings: Schindler's List");
        assert_eq!(tokens, vec!["lord", "ring", "schindler", "list"]);
    }

    #[test]
    fn test_keyword_analyzer() {
        let tokens = KeywordAnalyzer.analyze("https://en.wikipedia.org/wiki/Chinatown_(1974_film)");
        assert_eq!(
            tokens,
            vec!["https://en.wikipedia.org/wiki/Chinatown_(1974_film)"]
        );
        assert!(KeywordAnalyzer.analyze("").is_empty());
    }

    #[test]
    fn test_analyzer_kind_parsing() {
        assert_eq!("english".parse::<AnalyzerKind>().unwrap(), AnalyzerKind::English);
        assert_eq!(AnalyzerKind::Keyword.name(), "keyword");
        assert!("snowball".parse::<AnalyzerKind>().is_err());
    }
}
