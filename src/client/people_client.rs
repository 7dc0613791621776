use std::sync::Arc;

use super::query::SearchQuery;
use super::rest::RestTransport;
use super::transport::DirectoryTransport;
use crate::config::ClientConfig;
use crate::error::PeopleResult;
use crate::mapper::{select_properties, MappedRecord, RecordMapper, Shape};
use crate::person::Person;
use crate::term::KeywordTerm;

/// Main client for querying people in the directory
#[derive(Clone)]
pub struct PeopleClient {
    /// Remote side of the directory
    transport: Arc<dyn DirectoryTransport>,

    /// Row limit used by `get_people`
    row_limit: u32,
}

impl PeopleClient {
    /// Create a client talking to the configured site over REST
    pub fn new(config: ClientConfig) -> PeopleResult<Self> {
        let row_limit = config.row_limit;
        let transport = RestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), row_limit))
    }

    /// Create a client on top of any transport
    pub fn with_transport(transport: Arc<dyn DirectoryTransport>, row_limit: u32) -> Self {
        Self {
            transport,
            row_limit,
        }
    }

    /// Create a client from `SP_PEOPLE_*` environment variables
    pub fn from_env() -> PeopleResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn row_limit(&self) -> u32 {
        self.row_limit
    }

    /// Search for people with the default row limit and default properties
    pub async fn get_people(&self, query: &str) -> PeopleResult<Vec<Person>> {
        self.get_people_by_query(query, false, self.row_limit).await
    }

    /// Search for people and map every row onto a `T`.
    ///
    /// Search only returns a default set of managed properties; with
    /// `load_extra_properties` every search key `T` declares is requested too.
    pub async fn get_people_by_query<T: MappedRecord>(
        &self,
        query: &str,
        load_extra_properties: bool,
        row_limit: u32,
    ) -> PeopleResult<Vec<T>> {
        let mut search = SearchQuery::new(query).with_row_limit(row_limit);
        if load_extra_properties {
            search = search.select(select_properties::<T>(Shape::Search));
        }

        crate::log_client_info!("Searching people: '{}' (row limit {})", query, row_limit);
        let rows = self.transport.search(&search).await?;
        crate::log_client_debug!("Search returned {} rows", rows.len());

        let mapper = RecordMapper::new(Shape::Search);
        rows.iter().map(|row| mapper.map(row)).collect()
    }

    /// Load one user profile as a `Person`
    pub async fn get_person(&self, account_name: &str) -> PeopleResult<Person> {
        self.get_person_by_account(account_name).await
    }

    /// Load one user profile and map it onto a `T`
    pub async fn get_person_by_account<T: MappedRecord>(&self, account_name: &str) -> PeopleResult<T> {
        crate::log_client_info!("Loading profile for account '{}'", account_name);
        let properties = self.transport.profile_properties(account_name).await?;
        crate::log_client_debug!("Profile has {} properties", properties.len());

        RecordMapper::new(Shape::Profile).map(&properties)
    }

    /// List all enterprise keyword terms, e.g. to autocomplete people queries
    pub async fn get_all_terms(&self) -> PeopleResult<Vec<KeywordTerm>> {
        crate::log_client_info!("Listing keyword terms");
        let terms = self.transport.keyword_terms().await?;
        crate::log_client_debug!("Term set has {} terms", terms.len());
        Ok(terms)
    }
}
