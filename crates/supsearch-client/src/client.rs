//! HTTP client for the supplier search endpoint.
//!
//! One `GET <base>/search?product_name=<query>` per search. There is no
//! retry: any transport failure, non-2xx status or undecodable body is
//! returned to the caller as a [`SearchError`] and the attempt is over.

use std::future::Future;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use supsearch_core::{AppConfig, SearchResponse};

use crate::error::SearchError;

/// Query component escape set: everything except ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )` is percent-encoded.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The search collaborator consumed by [`crate::SearchSession`].
///
/// [`SupplierSearchClient`] is the production implementation; tests plug in
/// canned responses.
pub trait SupplierSearch {
    /// Runs one search for an already-trimmed, non-empty product name.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<SearchResponse, SearchError>> + Send;
}

/// Client for `GET <base>/search`.
pub struct SupplierSearchClient {
    client: Client,
    base_url: String,
}

impl SupplierSearchClient {
    /// Creates a client for the API rooted at `base_url`
    /// (e.g. `http://localhost:8000/api/v1/suppliers`).
    ///
    /// `timeout_secs == None` keeps reqwest's default (no overall timeout).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBaseUrl`] if `base_url` does not parse
    /// as an absolute URL, or [`SearchError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| SearchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: trimmed.to_owned(),
        })
    }

    /// Builds a client from loaded configuration, optionally overriding the
    /// configured base URL.
    ///
    /// # Errors
    ///
    /// Same as [`SupplierSearchClient::new`].
    pub fn from_config(config: &AppConfig, base_url_override: Option<&str>) -> Result<Self, SearchError> {
        Self::new(
            base_url_override.unwrap_or(&config.api_base_url),
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Searches suppliers for `product_name`.
    ///
    /// The name is trimmed before it is sent.
    ///
    /// # Errors
    ///
    /// - [`SearchError::EmptyQuery`]: blank name; nothing is sent.
    /// - [`SearchError::Http`]: network or TLS failure.
    /// - [`SearchError::UnexpectedStatus`]: any non-2xx response.
    /// - [`SearchError::Deserialize`]: body is not a search response.
    pub async fn search_suppliers(&self, product_name: &str) -> Result<SearchResponse, SearchError> {
        let query = product_name.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let url = self.search_url(query);
        tracing::debug!(%url, "requesting supplier search");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<SearchResponse>(&body).map_err(|e| {
            SearchError::Deserialize {
                context: format!("search response for \"{query}\""),
                source: e,
            }
        })?;

        tracing::debug!(
            query,
            suppliers = parsed.suppliers.len(),
            "supplier search returned"
        );
        Ok(parsed)
    }

    /// Full request URL for an already-trimmed query.
    pub(crate) fn search_url(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, QUERY_COMPONENT);
        format!("{}/search?product_name={encoded}", self.base_url)
    }
}

impl SupplierSearch for SupplierSearchClient {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<SearchResponse, SearchError>> + Send {
        self.search_suppliers(query)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
