//! Report API HTTP client
//!
//! All calls are blocking POST requests against paths joined onto the
//! configured base URL. The reporter only sees status codes and body text,
//! so it can run against any `ReportTransport`.

use crate::error::ReportError;
use crate::utils::config::ReportConfig;
use reqwest::blocking::Client;
use reqwest::Url;
use std::collections::BTreeMap;

/// Status and body of an API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the report API
pub trait ReportTransport {
    /// POST to `path`, relative to the API base URL, with an optional JSON body
    fn post(&self, path: &str, body: Option<&serde_json::Value>)
        -> Result<ApiResponse, ReportError>;
}

/// Blocking reqwest transport
pub struct HttpTransport {
    /// Base URL of the API (e.g., "http://localhost:5000")
    base_url: String,
    /// Headers sent with every request
    headers: BTreeMap<String, String>,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ReportConfig) -> Result<Self, ReportError> {
        let client = Client::builder().build()?;

        Ok(Self {
            base_url: config.api_url().to_string(),
            headers: config.headers().clone(),
            client,
        })
    }

    /// Join `path` onto the base URL
    pub fn url_for(&self, path: &str) -> Result<Url, ReportError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|_| ReportError::InvalidUrl {
                base: self.base_url.clone(),
                path: path.to_string(),
            })
    }
}

impl ReportTransport for HttpTransport {
    fn post(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ReportError> {
        let url = self.url_for(path)?;
        log::debug!("POST {}", url);

        let mut request = self.client.post(url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(ApiResponse { status, body })
    }
}
