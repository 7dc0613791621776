use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::query::SearchQuery;
use super::transport::DirectoryTransport;
use crate::error::{PeopleError, PeopleResult};
use crate::mapper::PropertyBag;
use crate::term::KeywordTerm;

/// In-memory directory for tests and offline runs
#[derive(Debug, Default)]
pub struct MockTransport {
    search_rows: Vec<PropertyBag>,
    profiles: HashMap<String, PropertyBag>,
    keyword_terms: Vec<KeywordTerm>,
    last_query: Mutex<Option<SearchQuery>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned by every search, truncated to the query's row limit
    pub fn with_search_rows(mut self, rows: Vec<PropertyBag>) -> Self {
        self.search_rows = rows;
        self
    }

    /// Profile bag returned for `account_name`
    pub fn with_profile(mut self, account_name: &str, properties: PropertyBag) -> Self {
        self.profiles.insert(account_name.to_string(), properties);
        self
    }

    /// Terms returned by `keyword_terms`
    pub fn with_keyword_terms(mut self, terms: Vec<KeywordTerm>) -> Self {
        self.keyword_terms = terms;
        self
    }

    /// Most recent query passed to `search`
    pub async fn last_query(&self) -> Option<SearchQuery> {
        self.last_query.lock().await.clone()
    }

    /// A small canned directory with two people
    pub fn sample_directory() -> Self {
        Self::new()
            .with_search_rows(vec![
                to_bag(json!({
                    "PreferredName": "Ada Lovelace",
                    "WorkEmail": "ada@contoso.com",
                    "JobTitle": "Analyst",
                    "Department": "Research",
                    "AccountName": "i:0#.f|membership|ada@contoso.com",
                    "Skills": "mathematics;poetry;",
                    "OfficeNumber": "B-12",
                    "LastModifiedTime": "2024-03-01T09:30:00Z",
                    "Rank": 16.25
                })),
                to_bag(json!({
                    "PreferredName": "Grace Hopper",
                    "WorkEmail": "grace@contoso.com",
                    "JobTitle": "Rear Admiral",
                    "Department": "Engineering",
                    "AccountName": "i:0#.f|membership|grace@contoso.com",
                    "Interests": "compilers;sailing",
                    "Rank": 12.0
                })),
            ])
            .with_profile(
                "i:0#.f|membership|ada@contoso.com",
                to_bag(json!({
                    "DisplayName": "Ada Lovelace",
                    "WorkEmail": "ada@contoso.com",
                    "Title": "Analyst",
                    "Department": "Research",
                    "UserName": "ada",
                    "AboutMe": "Writes programs for engines that do not exist yet.",
                    "SPS-Skills": "mathematics|poetry|",
                    "SPS-Interests": "",
                    "SPS-PastProjects": "Analytical Engine notes"
                })),
            )
            .with_keyword_terms(vec![
                KeywordTerm::new("0e8f395e-ff58-4d45-9ff7-e331ab728beb", "compilers"),
                KeywordTerm::new("4c3a2f1d-6a0b-4b8e-9d2e-5f7a1c9e3b21", "mathematics"),
                KeywordTerm::new("9b1d7e44-2c6f-4a35-8e0d-3f5b6a7c8d90", "poetry"),
            ])
    }
}

fn to_bag(value: serde_json::Value) -> PropertyBag {
    match value {
        serde_json::Value::Object(map) => map.into_iter().collect(),
        _ => PropertyBag::new(),
    }
}

#[async_trait]
impl DirectoryTransport for MockTransport {
    async fn search(&self, query: &SearchQuery) -> PeopleResult<Vec<PropertyBag>> {
        *self.last_query.lock().await = Some(query.clone());
        Ok(self
            .search_rows
            .iter()
            .take(query.row_limit as usize)
            .cloned()
            .collect())
    }

    async fn profile_properties(&self, account_name: &str) -> PeopleResult<PropertyBag> {
        self.profiles
            .get(account_name)
            .cloned()
            .ok_or_else(|| PeopleError::NotFound(format!("No user profile for account '{}'", account_name)))
    }

    async fn keyword_terms(&self) -> PeopleResult<Vec<KeywordTerm>> {
        Ok(self.keyword_terms.clone())
    }
}
