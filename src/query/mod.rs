//! Query system for searching documents.
//!
//! A [`Query`] is a tree of boolean nodes over match-phrase leaves. Before it
//! runs against an index the tree is turned into a [`Matcher`] bound to the
//! index's schema, which validates field names and analyzes phrases once.

pub mod boolean;
pub mod matcher;
pub mod parser;
pub mod phrase;
#[allow(clippy::module_inception)]
pub mod query;

pub use self::boolean::{BooleanClause, BooleanQuery, BooleanQueryBuilder, Occur};
pub use self::matcher::Matcher;
pub use self::parser::QueryParser;
pub use self::phrase::PhraseQuery;
pub use self::query::Query;
