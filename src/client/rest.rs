use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Number, Value};

use super::query::SearchQuery;
use super::transport::DirectoryTransport;
use crate::config::{ClientConfig, Credentials};
use crate::error::{PeopleError, PeopleResult};
use crate::mapper::PropertyBag;
use crate::term::KeywordTerm;

const ACCEPT_NOMETADATA: &str = "application/json;odata=nometadata";

/// Directory transport over the SharePoint REST API
#[derive(Debug, Clone)]
pub struct RestTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RestTransport {
    /// Create a transport for the configured site
    pub fn new(config: ClientConfig) -> PeopleResult<Self> {
        config.validate()?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.credentials {
            Credentials::Anonymous => request,
            Credentials::Basic { username, password } => request.basic_auth(username, Some(password)),
            Credentials::Bearer { token } => request.bearer_auth(token),
        }
    }

    fn search_request(&self, query: &SearchQuery) -> RequestBuilder {
        let url = format!("{}/_api/search/query", self.config.site_root());
        let mut params = vec![
            ("querytext", odata_string(&query.query_text)),
            ("sourceid", odata_string(&query.source_id.to_string())),
            ("rowlimit", query.row_limit.to_string()),
        ];
        if !query.select_properties.is_empty() {
            params.push(("selectproperties", odata_string(&query.select_properties.join(","))));
        }

        self.authorize(self.http.get(url))
            .header(reqwest::header::ACCEPT, ACCEPT_NOMETADATA)
            .query(&params)
    }

    fn profile_request(&self, account_name: &str) -> RequestBuilder {
        let url = format!(
            "{}/_api/SP.UserProfiles.PeopleManager/GetPropertiesFor(accountName=@v)",
            self.config.site_root()
        );
        self.authorize(self.http.get(url))
            .header(reqwest::header::ACCEPT, ACCEPT_NOMETADATA)
            .query(&[("@v", odata_string(account_name))])
    }

    /// First page of the keywords term set listing
    fn terms_url(&self) -> PeopleResult<String> {
        let term_set = self.config.keywords_term_set.as_deref().ok_or_else(|| {
            PeopleError::Configuration("keywords_term_set is not configured".to_string())
        })?;
        Ok(format!(
            "{}/_api/v2.1/termStore/sets/{}/terms",
            self.config.site_root(),
            term_set
        ))
    }

    fn terms_request(&self, url: &str) -> RequestBuilder {
        self.authorize(self.http.get(url))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> PeopleResult<T> {
        let response = request.send().await.map_err(|e| {
            crate::log_transport_error!("{} request failed: {}", what, e);
            PeopleError::from(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PeopleError::NotFound(format!("{} returned HTTP {}", what, status)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            crate::log_transport_error!("{} returned HTTP {}: {}", what, status, body);
            return Err(PeopleError::Transport(format!("{} returned HTTP {}", what, status)));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl DirectoryTransport for RestTransport {
    async fn search(&self, query: &SearchQuery) -> PeopleResult<Vec<PropertyBag>> {
        crate::log_transport_debug!(
            "GET search/query text='{}' rowlimit={}",
            query.query_text,
            query.row_limit
        );
        let response: SearchResponse = self.send_json(self.search_request(query), "search").await?;
        Ok(search_rows(response))
    }

    async fn profile_properties(&self, account_name: &str) -> PeopleResult<PropertyBag> {
        crate::log_transport_debug!("GET GetPropertiesFor account='{}'", account_name);
        let response: ProfileResponse = self
            .send_json(self.profile_request(account_name), "profile lookup")
            .await?;
        profile_bag(response, account_name)
    }

    async fn keyword_terms(&self) -> PeopleResult<Vec<KeywordTerm>> {
        let mut next = Some(self.terms_url()?);
        let mut terms = Vec::new();
        while let Some(url) = next.take() {
            crate::log_transport_debug!("GET {}", url);
            let page: TermPage = self.send_json(self.terms_request(&url), "term listing").await?;
            terms.extend(page.value.into_iter().filter_map(TermEntry::into_keyword_term));
            next = page.next_link;
        }
        Ok(terms)
    }
}

/// Quote a string literal for an OData query parameter
fn odata_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    primary_query_result: Option<PrimaryQueryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PrimaryQueryResult {
    relevant_results: Option<RelevantResults>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RelevantResults {
    table: ResultTable,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultTable {
    #[serde(default)]
    rows: Vec<ResultRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResultRow {
    #[serde(default)]
    cells: Vec<KeyValueCell>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ProfileResponse {
    user_profile_properties: Option<Vec<KeyValueCell>>,
}

/// One page of a term store listing
#[derive(Debug, Deserialize)]
struct TermPage {
    #[serde(default)]
    value: Vec<TermEntry>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermEntry {
    id: String,
    #[serde(default)]
    labels: Vec<TermLabel>,
    last_modified_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TermLabel {
    name: String,
    #[serde(default)]
    is_default: bool,
}

impl TermEntry {
    /// Named after its default label, or its first one; unlabelled terms are dropped
    fn into_keyword_term(self) -> Option<KeywordTerm> {
        let label = self
            .labels
            .iter()
            .find(|l| l.is_default)
            .or_else(|| self.labels.first());
        let Some(label) = label else {
            crate::log_transport_debug!("Skipping term {} without labels", self.id);
            return None;
        };
        Some(KeywordTerm {
            name: label.name.clone(),
            id: self.id,
            last_modified: self.last_modified_date_time,
        })
    }
}

/// A `Key`/`Value`/`ValueType` triple as the REST API returns them
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct KeyValueCell {
    key: String,
    value: Option<String>,
    value_type: Option<String>,
}

impl KeyValueCell {
    /// Typed JSON value for this cell; unparsable typed values stay strings
    fn typed_value(self) -> Value {
        let Some(raw) = self.value else {
            return Value::Null;
        };
        match self.value_type.as_deref() {
            Some("Null") => Value::Null,
            Some("Edm.Int32") | Some("Edm.Int64") => raw
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::String(raw)),
            Some("Edm.Double") => raw
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::String(raw)),
            Some("Edm.Boolean") => match raw.to_ascii_lowercase().as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(raw),
            },
            _ => Value::String(raw),
        }
    }
}

fn cells_to_bag(cells: Vec<KeyValueCell>) -> PropertyBag {
    cells
        .into_iter()
        .map(|cell| (cell.key.clone(), cell.typed_value()))
        .collect()
}

fn search_rows(response: SearchResponse) -> Vec<PropertyBag> {
    response
        .primary_query_result
        .and_then(|r| r.relevant_results)
        .map(|r| r.table.rows)
        .unwrap_or_default()
        .into_iter()
        .map(|row| cells_to_bag(row.cells))
        .collect()
}

fn profile_bag(response: ProfileResponse, account_name: &str) -> PeopleResult<PropertyBag> {
    match response.user_profile_properties {
        Some(cells) if !cells.is_empty() => Ok(cells_to_bag(cells)),
        _ => Err(PeopleError::NotFound(format!("No user profile for account '{}'", account_name))),
    }
}
