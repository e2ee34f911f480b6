//! Matcher implementations for query execution.

use std::fmt::Debug;

use crate::document::{AnalyzedDocument, FieldValue};

/// Trait for document matchers.
///
/// A matcher is a query bound to one index's schema; it answers whether a
/// single analyzed document satisfies the query.
pub trait Matcher: Send + Sync + Debug {
    /// Check whether `doc` matches.
    fn matches(&self, doc: &AnalyzedDocument) -> bool;
}

/// A matcher that matches no documents.
#[derive(Debug, Default)]
pub struct EmptyMatcher;

impl Matcher for EmptyMatcher {
    fn matches(&self, _doc: &AnalyzedDocument) -> bool {
        false
    }
}

/// A matcher that matches all documents.
#[derive(Debug, Default)]
pub struct AllMatcher;

impl Matcher for AllMatcher {
    fn matches(&self, _doc: &AnalyzedDocument) -> bool {
        true
    }
}

/// Contiguous token-sequence match on an analyzed text field.
#[derive(Debug)]
pub struct TokenPhraseMatcher {
    field: String,
    phrase: Vec<String>,
}

impl TokenPhraseMatcher {
    pub fn new<S: Into<String>>(field: S, phrase: Vec<String>) -> Self {
        TokenPhraseMatcher {
            field: field.into(),
            phrase,
        }
    }
}

impl Matcher for TokenPhraseMatcher {
    fn matches(&self, doc: &AnalyzedDocument) -> bool {
        if self.phrase.is_empty() {
            return false;
        }
        doc.tokens(&self.field)
            .map(|tokens| {
                tokens
                    .windows(self.phrase.len())
                    .any(|window| window == self.phrase.as_slice())
            })
            .unwrap_or(false)
    }
}

/// Whole-value equality on a stored field.
#[derive(Debug)]
pub struct ExactValueMatcher {
    field: String,
    value: FieldValue,
}

impl ExactValueMatcher {
    pub fn new<S: Into<String>>(field: S, value: FieldValue) -> Self {
        ExactValueMatcher {
            field: field.into(),
            value,
        }
    }
}

impl Matcher for ExactValueMatcher {
    fn matches(&self, doc: &AnalyzedDocument) -> bool {
        doc.document().get_field(&self.field) == Some(&self.value)
    }
}

/// Conjunction of required matchers minus a disjunction of excluded ones.
#[derive(Debug)]
pub struct ConjunctionNotMatcher {
    required: Vec<Box<dyn Matcher>>,
    excluded: Vec<Box<dyn Matcher>>,
}

impl ConjunctionNotMatcher {
    /// With no required matchers every document not excluded matches.
    pub fn new(required: Vec<Box<dyn Matcher>>, excluded: Vec<Box<dyn Matcher>>) -> Self {
        ConjunctionNotMatcher { required, excluded }
    }
}

impl Matcher for ConjunctionNotMatcher {
    fn matches(&self, doc: &AnalyzedDocument) -> bool {
        self.required.iter().all(|m| m.matches(doc))
            && !self.excluded.iter().any(|m| m.matches(doc))
    }
}
