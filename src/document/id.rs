//! Document identifiers.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a document within an index.
///
/// Ids are strings, like the ids a search cluster accepts, but ordering is
/// natural: ids that parse as unsigned integers sort numerically and come
/// before every other id.
///
/// ```
/// use cinedex::document::DocId;
///
/// let mut ids = vec![DocId::from("10"), DocId::from("abc"), DocId::from(2u64)];
/// ids.sort();
/// assert_eq!(ids, vec![DocId::from("2"), DocId::from("10"), DocId::from("abc")]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        DocId(id.into())
    }

    /// Generate an implicit id for documents indexed without one.
    pub fn generate() -> Self {
        DocId(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl Ord for DocId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for DocId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocId {
    fn from(value: &str) -> Self {
        DocId(value.to_string())
    }
}

impl From<String> for DocId {
    fn from(value: String) -> Self {
        DocId(value)
    }
}

impl From<u64> for DocId {
    fn from(value: u64) -> Self {
        DocId(value.to_string())
    }
}

impl From<usize> for DocId {
    fn from(value: usize) -> Self {
        DocId(value.to_string())
    }
}
