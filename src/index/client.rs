use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use super::error::IndexError;
use super::model::{Fuzziness, RawHit, SearchResponse};

/// Logical query interface to the external search index.
///
/// Only two operations exist at this boundary: exact term equality on a
/// field, and a full-text match with all terms required and optional
/// fuzziness. The wire DSL is an implementation detail of the client.
pub trait SearchIndex: Send + Sync {
    /// Exact term-equality query on `field`.
    fn term_query(
        &self,
        index: &str,
        field: &str,
        value: &str,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, IndexError>> + Send;

    /// Full-text match query on `field`, all terms required.
    fn match_query(
        &self,
        index: &str,
        field: &str,
        value: &str,
        fuzziness: Fuzziness,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<RawHit>, IndexError>> + Send;
}

#[derive(Debug, Clone)]
/// HTTP client for an Elasticsearch-compatible search endpoint.
pub struct HttpSearchIndex {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpSearchIndex {
    /// Creates a client for `url` with a per-request timeout.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, IndexError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexError::Unavailable {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Returns the configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn search(&self, index: &str, body: Value) -> Result<Vec<RawHit>, IndexError> {
        let endpoint = format!("{}/{}/_search", self.url, index);

        let response = self
            .client
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IndexError::Timeout {
                        index: index.to_string(),
                        timeout_ms: self.timeout.as_millis() as u64,
                    }
                } else {
                    IndexError::Unavailable {
                        url: self.url.clone(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::Http {
                index: index.to_string(),
                status: status.as_u16(),
            });
        }

        let parsed: SearchResponse =
            response.json().await.map_err(|e| IndexError::Malformed {
                index: index.to_string(),
                message: e.to_string(),
            })?;

        Ok(parsed.hits.hits)
    }
}

impl SearchIndex for HttpSearchIndex {
    async fn term_query(
        &self,
        index: &str,
        field: &str,
        value: &str,
        limit: u64,
    ) -> Result<Vec<RawHit>, IndexError> {
        debug!(index, field, "term query");

        let body = json!({
            "query": { "term": { field: value } },
            "size": limit,
        });
        self.search(index, body).await
    }

    async fn match_query(
        &self,
        index: &str,
        field: &str,
        value: &str,
        fuzziness: Fuzziness,
        limit: u64,
    ) -> Result<Vec<RawHit>, IndexError> {
        debug!(index, field, fuzzy = matches!(fuzziness, Fuzziness::Auto), "match query");

        let mut params = json!({
            "query": value,
            "operator": "AND",
        });
        if let Fuzziness::Auto = fuzziness {
            params["fuzziness"] = json!("AUTO");
        }

        let body = json!({
            "query": { "match": { field: params } },
            "size": limit,
        });
        self.search(index, body).await
    }
}
