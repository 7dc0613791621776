use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A term from the enterprise keywords term set.
///
/// Keyword terms are what users tag their profiles with, so the list makes a
/// good source for autocompleting people queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeywordTerm {
    pub id: String,
    /// Default label of the term
    pub name: String,
    pub last_modified: Option<DateTime<Utc>>,
}

impl KeywordTerm {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            last_modified: None,
        }
    }
}
