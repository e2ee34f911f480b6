//! The query tree and its entry points.

use std::fmt;

use crate::error::Result;
use crate::query::boolean::BooleanQuery;
use crate::query::matcher::{AllMatcher, Matcher};
use crate::query::phrase::PhraseQuery;
use crate::schema::Schema;

/// A search query.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Query {
    /// Matches every document in the index.
    #[default]
    MatchAll,
    /// Contiguous phrase containment on one field.
    MatchPhrase(PhraseQuery),
    /// Boolean combination of sub-queries.
    Bool(BooleanQuery),
}

impl Query {
    /// Create a match-phrase query.
    pub fn match_phrase<S: Into<String>, T: Into<String>>(field: S, phrase: T) -> Self {
        Query::MatchPhrase(PhraseQuery::new(field, phrase))
    }

    pub fn match_all() -> Self {
        Query::MatchAll
    }

    /// Create a matcher for this query against `schema`.
    ///
    /// Fails with a query error if any leaf names a field the schema does
    /// not declare.
    pub fn matcher(&self, schema: &Schema) -> Result<Box<dyn Matcher>> {
        match self {
            Query::MatchAll => Ok(Box::new(AllMatcher)),
            Query::MatchPhrase(phrase) => phrase.matcher(schema),
            Query::Bool(boolean) => boolean.matcher(schema),
        }
    }

    /// The JSON form accepted by [`QueryParser`](crate::query::QueryParser).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Query::MatchAll => serde_json::json!({ "match_all": {} }),
            Query::MatchPhrase(phrase) => phrase.to_json(),
            Query::Bool(boolean) => boolean.to_json(),
        }
    }
}

impl From<PhraseQuery> for Query {
    fn from(query: PhraseQuery) -> Self {
        Query::MatchPhrase(query)
    }
}

impl From<BooleanQuery> for Query {
    fn from(query: BooleanQuery) -> Self {
        Query::Bool(query)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
