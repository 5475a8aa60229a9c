//! HTTP plumbing behind the LiveDNS client
//!
//! The [`Transport`] trait carries one request to the API and hands back the
//! raw status, `total-count` header and body. Status interpretation and
//! pagination live in [`crate::client`], so tests can swap the transport.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;
use zonesync_core::{Error, Result};

/// Response header advertising the total number of items across pages
pub const TOTAL_COUNT_HEADER: &str = "total-count";

/// HTTP method of an API request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// A request against the API, relative to its endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// GET `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// POST `body` to `path`
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    /// DELETE `path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add `page` and `per_page` query parameters
    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.query.push(("page".to_string(), page.to_string()));
        self.query.push(("per_page".to_string(), per_page.to_string()));
        self
    }

    /// The `page` query parameter, if set
    pub fn page(&self) -> Option<u32> {
        self.query
            .iter()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
    }
}

/// What the API answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed `total-count` header, when present
    pub total_count: Option<usize>,
    pub body: String,
}

impl ApiResponse {
    /// Response with `status` and `body` and no `total-count`
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            total_count: None,
            body: body.into(),
        }
    }

    /// Set the advertised total count
    pub fn with_total_count(mut self, total: usize) -> Self {
        self.total_count = Some(total);
        self
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries requests to the API
///
/// Implementations perform exactly one HTTP exchange per call and never
/// retry. Any non-2xx status is returned as a response, not an error;
/// errors are reserved for failures to complete the exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest`-backed transport
///
/// Every request carries the bearer token and the zonesync user agent.
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport for `endpoint` (e.g. `https://api.gandi.net/v5`)
    ///
    /// # Security
    ///
    /// The token is stored only inside the client's default headers, marked
    /// sensitive; it never appears in `Debug` output or errors.
    pub fn new(token: &str, endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::config("LiveDNS API token cannot be empty"));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::config("LiveDNS API token contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent())
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// API base URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.endpoint, request.path);
        tracing::debug!("{:?} {} {:?}", request.method, url, request.query);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let total_count = match response.headers().get(TOTAL_COUNT_HEADER) {
            Some(value) => Some(
                value
                    .to_str()
                    .ok()
                    .and_then(|s| s.trim().parse::<usize>().ok())
                    .ok_or_else(|| {
                        Error::transport(format!(
                            "Invalid {} header: {:?}",
                            TOTAL_COUNT_HEADER, value
                        ))
                    })?,
            ),
            None => None,
        };
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {}", e)))?;

        Ok(ApiResponse {
            status,
            total_count,
            body,
        })
    }
}

/// `zonesync/<core version> zonesync-provider-livedns/<version>`
pub fn user_agent() -> String {
    format!(
        "zonesync/{} zonesync-provider-livedns/{}",
        zonesync_core::VERSION,
        env!("CARGO_PKG_VERSION")
    )
}
