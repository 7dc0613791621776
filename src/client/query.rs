use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DEFAULT_ROW_LIMIT;

/// Result source that restricts a keyword search to people
pub const PEOPLE_RESULT_SOURCE_ID: Uuid = Uuid::from_u128(0xb09a7990_05ea_4af9_81ef_edfab16c4e31);

/// A keyword search against the people result source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query text in keyword query language
    pub query_text: String,
    pub source_id: Uuid,
    /// Maximum number of rows to return
    pub row_limit: u32,
    /// Managed properties to return on top of the default set
    pub select_properties: Vec<String>,
}

impl SearchQuery {
    /// Create a people query with the default row limit and no extra properties
    pub fn new(query_text: &str) -> Self {
        Self {
            query_text: query_text.to_string(),
            source_id: PEOPLE_RESULT_SOURCE_ID,
            row_limit: DEFAULT_ROW_LIMIT,
            select_properties: Vec::new(),
        }
    }

    pub fn with_row_limit(mut self, row_limit: u32) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Request additional managed properties, skipping ones already selected
    pub fn select<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for property in properties {
            let property = property.into();
            if !self.select_properties.contains(&property) {
                self.select_properties.push(property);
            }
        }
        self
    }
}
