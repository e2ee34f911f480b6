//! Boolean query implementation for combining multiple queries.

use crate::error::Result;
use crate::query::matcher::{AllMatcher, ConjunctionNotMatcher, Matcher};
use crate::query::query::Query;
use crate::schema::Schema;

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    /// The clause must match (equivalent to AND).
    Must,
    /// The clause must match; kept apart from `Must` so queries round-trip.
    Filter,
    /// The clause must not match (equivalent to NOT).
    MustNot,
}

impl Occur {
    /// The key this occurrence uses in the JSON query form.
    pub fn key(&self) -> &'static str {
        match self {
            Occur::Must => "must",
            Occur::Filter => "filter",
            Occur::MustNot => "must_not",
        }
    }
}

/// A clause in a boolean query.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanClause {
    /// The query for this clause.
    pub query: Query,
    /// The occurrence requirement.
    pub occur: Occur,
}

impl BooleanClause {
    /// Create a new boolean clause.
    pub fn new(query: Query, occur: Occur) -> Self {
        BooleanClause { query, occur }
    }

    /// Create a MUST clause.
    pub fn must(query: Query) -> Self {
        BooleanClause::new(query, Occur::Must)
    }

    /// Create a FILTER clause.
    pub fn filter(query: Query) -> Self {
        BooleanClause::new(query, Occur::Filter)
    }

    /// Create a MUST_NOT clause.
    pub fn must_not(query: Query) -> Self {
        BooleanClause::new(query, Occur::MustNot)
    }
}

/// A boolean query that combines multiple queries with boolean logic.
///
/// A document matches when it matches every `must` and `filter` clause and
/// no `must_not` clause. A query without clauses matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanQuery {
    clauses: Vec<BooleanClause>,
}

impl BooleanQuery {
    /// Create a new empty boolean query.
    pub fn new() -> Self {
        BooleanQuery {
            clauses: Vec::new(),
        }
    }

    /// Add a clause to this boolean query.
    pub fn add_clause(&mut self, clause: BooleanClause) {
        self.clauses.push(clause);
    }

    /// Add a MUST clause.
    pub fn add_must(&mut self, query: Query) {
        self.add_clause(BooleanClause::must(query));
    }

    /// Add a FILTER clause.
    pub fn add_filter(&mut self, query: Query) {
        self.add_clause(BooleanClause::filter(query));
    }

    /// Add a MUST_NOT clause.
    pub fn add_must_not(&mut self, query: Query) {
        self.add_clause(BooleanClause::must_not(query));
    }

    /// Get the clauses.
    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Bind every clause to `schema` and combine the resulting matchers.
    pub fn matcher(&self, schema: &Schema) -> Result<Box<dyn Matcher>> {
        if self.clauses.is_empty() {
            return Ok(Box::new(AllMatcher));
        }

        let mut required = Vec::new();
        let mut excluded = Vec::new();
        for clause in &self.clauses {
            let matcher = clause.query.matcher(schema)?;
            match clause.occur {
                Occur::Must | Occur::Filter => required.push(matcher),
                Occur::MustNot => excluded.push(matcher),
            }
        }

        Ok(Box::new(ConjunctionNotMatcher::new(required, excluded)))
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        for occur in [Occur::Must, Occur::Filter, Occur::MustNot] {
            let clauses: Vec<serde_json::Value> = self
                .clauses
                .iter()
                .filter(|clause| clause.occur == occur)
                .map(|clause| clause.query.to_json())
                .collect();
            if !clauses.is_empty() {
                body.insert(occur.key().to_string(), serde_json::Value::Array(clauses));
            }
        }
        serde_json::json!({ "bool": body })
    }
}

/// Builder for creating boolean queries.
#[derive(Debug, Default)]
pub struct BooleanQueryBuilder {
    query: BooleanQuery,
}

impl BooleanQueryBuilder {
    pub fn new() -> Self {
        BooleanQueryBuilder {
            query: BooleanQuery::new(),
        }
    }

    /// Add a MUST clause.
    pub fn must(mut self, query: Query) -> Self {
        self.query.add_must(query);
        self
    }

    /// Add a FILTER clause.
    pub fn filter(mut self, query: Query) -> Self {
        self.query.add_filter(query);
        self
    }

    /// Add a MUST_NOT clause.
    pub fn must_not(mut self, query: Query) -> Self {
        self.query.add_must_not(query);
        self
    }

    /// Build the boolean query.
    pub fn build(self) -> BooleanQuery {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{AnalyzedDocument, Document};

    fn movie(cast: &str, director: &str) -> AnalyzedDocument {
        let doc = Document::builder()
            .add_text("cast", cast)
            .add_text("director", director)
            .build();
        AnalyzedDocument::new(doc, &Schema::movies())
    }

    #[test]
    fn test_boolean_query_creation() {
        let query = BooleanQueryBuilder::new()
            .must(Query::match_phrase("cast", "jack nicholson"))
            .must_not(Query::match_phrase("director", "roman polanski"))
            .build();

        assert_eq!(query.clauses().len(), 2);
        assert_eq!(query.clauses()[0].occur, Occur::Must);
        assert_eq!(query.clauses()[1].occur, Occur::MustNot);
    }

    #[test]
    fn test_must_and_must_not() {
        let schema = Schema::movies();
        let matcher = BooleanQueryBuilder::new()
            .must(Query::match_phrase("cast", "jack nicholson"))
            .must_not(Query::match_phrase("director", "roman polanski"))
            .build()
            .matcher(&schema)
            .unwrap();

        assert!(matcher.matches(&movie("Jack Nicholson", "Mike Nichols")));
        assert!(!matcher.matches(&movie("Jack Nicholson", "Roman Polanski")));
        assert!(!matcher.matches(&movie("Warren Beatty", "Mike Nichols")));
    }

    #[test]
    fn test_empty_boolean_matches_all() {
        let matcher = BooleanQuery::new().matcher(&Schema::movies()).unwrap();
        assert!(matcher.matches(&movie("Anyone", "Anybody")));
    }

    #[test]
    fn test_unknown_field_in_clause_fails() {
        let query = BooleanQueryBuilder::new()
            .filter(Query::match_phrase("budget", "1000"))
            .build();
        assert!(query.matcher(&Schema::movies()).is_err());
    }

    #[test]
    fn test_to_json_groups_clauses() {
        let query = BooleanQueryBuilder::new()
            .must(Query::match_phrase("cast", "jack nicholson"))
            .must_not(Query::match_phrase("director", "roman polanski"))
            .build();
        assert_eq!(
            query.to_json(),
            serde_json::json!({"bool": {
                "must": [{"match_phrase": {"cast": "jack nicholson"}}],
                "must_not": [{"match_phrase": {"director": "roman polanski"}}]
            }})
        );
    }
}
