//! Query parser for converting JSON and command-line queries to query trees.

use serde_json::{Map, Value};

use crate::error::{CinedexError, Result};
use crate::query::{BooleanQuery, Occur, Query};

/// Parses the JSON query form:
///
/// - `{"match_all": {}}`
/// - `{"match_phrase": {"cast": "jack nicholson"}}` or
///   `{"match_phrase": {"cast": {"query": "jack nicholson"}}}`
/// - `{"bool": {"must": q | [q], "filter": q | [q], "must_not": q | [q]}}`
///
/// ```
/// use cinedex::query::{Query, QueryParser};
///
/// let query = QueryParser::new()
///     .parse_json(r#"{"match_phrase": {"cast": "jack nicholson"}}"#)
///     .unwrap();
/// assert_eq!(query, Query::match_phrase("cast", "jack nicholson"));
/// ```
#[derive(Debug, Default)]
pub struct QueryParser;

impl QueryParser {
    pub fn new() -> Self {
        QueryParser
    }

    /// Parse a query from JSON text.
    pub fn parse_json(&self, input: &str) -> Result<Query> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| CinedexError::query(format!("query is not valid JSON: {e}")))?;
        self.parse_value(&value)
    }

    /// Parse a query from an already decoded JSON value.
    pub fn parse_value(&self, value: &Value) -> Result<Query> {
        let object = value
            .as_object()
            .ok_or_else(|| CinedexError::query("query must be a JSON object"))?;
        let (kind, body) = single_entry(object, "query")?;

        match kind.as_str() {
            "match_all" => Ok(Query::MatchAll),
            "match_phrase" => self.parse_match_phrase(body),
            "bool" => self.parse_bool(body),
            other => Err(CinedexError::query(format!(
                "unsupported query type '{other}'"
            ))),
        }
    }

    /// Parse a `FIELD=PHRASE` pair as given on the command line.
    pub fn parse_clause(&self, input: &str) -> Result<Query> {
        let (field, phrase) = input.split_once('=').ok_or_else(|| {
            CinedexError::query(format!("expected FIELD=PHRASE, got '{input}'"))
        })?;
        let field = field.trim();
        if field.is_empty() {
            return Err(CinedexError::query(format!(
                "missing field name in '{input}'"
            )));
        }
        Ok(Query::match_phrase(field, phrase.trim()))
    }

    /// Combine `FIELD=PHRASE` pairs into one boolean query.
    ///
    /// With no clauses at all the result is a match-all query.
    pub fn parse_clauses<S: AsRef<str>>(&self, must: &[S], must_not: &[S]) -> Result<Query> {
        if must.is_empty() && must_not.is_empty() {
            return Ok(Query::MatchAll);
        }

        let mut query = BooleanQuery::new();
        for clause in must {
            query.add_must(self.parse_clause(clause.as_ref())?);
        }
        for clause in must_not {
            query.add_must_not(self.parse_clause(clause.as_ref())?);
        }
        Ok(Query::Bool(query))
    }

    fn parse_match_phrase(&self, body: &Value) -> Result<Query> {
        let object = body
            .as_object()
            .ok_or_else(|| CinedexError::query("match_phrase body must be an object"))?;
        let (field, value) = single_entry(object, "match_phrase field")?;

        let phrase = match value {
            Value::String(phrase) => phrase.clone(),
            Value::Object(options) => match options.get("query") {
                Some(Value::String(phrase)) => phrase.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(CinedexError::query(format!(
                        "match_phrase on '{field}' needs a string 'query'"
                    )));
                }
            },
            Value::Number(n) => n.to_string(),
            _ => {
                return Err(CinedexError::query(format!(
                    "match_phrase on '{field}' needs a string phrase"
                )));
            }
        };

        Ok(Query::match_phrase(field.clone(), phrase))
    }

    fn parse_bool(&self, body: &Value) -> Result<Query> {
        let object = body
            .as_object()
            .ok_or_else(|| CinedexError::query("bool body must be an object"))?;

        for key in object.keys() {
            match key.as_str() {
                "must" | "filter" | "must_not" => {}
                "should" => {
                    return Err(CinedexError::query("bool 'should' clauses are not supported"));
                }
                other => {
                    return Err(CinedexError::query(format!(
                        "unknown bool clause '{other}'"
                    )));
                }
            }
        }

        // Clauses keep a fixed occurrence order whatever the key order was.
        let mut query = BooleanQuery::new();
        for occur in [Occur::Must, Occur::Filter, Occur::MustNot] {
            let items: Vec<&Value> = match object.get(occur.key()) {
                None => continue,
                Some(Value::Array(items)) => items.iter().collect(),
                Some(single) => vec![single],
            };
            for item in items {
                let sub = self.parse_value(item)?;
                match occur {
                    Occur::Must => query.add_must(sub),
                    Occur::Filter => query.add_filter(sub),
                    Occur::MustNot => query.add_must_not(sub),
                }
            }
        }

        Ok(Query::Bool(query))
    }
}

fn single_entry<'a>(object: &'a Map<String, Value>, what: &str) -> Result<(&'a String, &'a Value)> {
    let mut entries = object.iter();
    match (entries.next(), entries.next()) {
        (Some(entry), None) => Ok(entry),
        (None, _) => Err(CinedexError::query(format!("empty {what} object"))),
        _ => Err(CinedexError::query(format!(
            "{what} object must have exactly one key"
        ))),
    }
}
