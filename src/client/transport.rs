use async_trait::async_trait;

use super::query::SearchQuery;
use crate::error::PeopleResult;
use crate::mapper::PropertyBag;
use crate::term::KeywordTerm;

/// Remote side of the people directory.
///
/// Implementations own authentication and the wire protocol; failures they
/// report are handed to callers unchanged.
#[async_trait]
pub trait DirectoryTransport: Send + Sync {
    /// Run a people search and return one bag per result row
    async fn search(&self, query: &SearchQuery) -> PeopleResult<Vec<PropertyBag>>;

    /// Fetch the profile properties of one account
    async fn profile_properties(&self, account_name: &str) -> PeopleResult<PropertyBag>;

    /// List every term in the enterprise keywords term set
    async fn keyword_terms(&self) -> PeopleResult<Vec<KeywordTerm>>;
}
