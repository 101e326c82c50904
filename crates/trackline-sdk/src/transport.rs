//! HTTP transport for the tracker API.
//!
//! One network call per invocation, no retries, no caching. Non-2xx
//! statuses are surfaced as [`SdkError::Http`] with the response body; the
//! caller decides what, if anything, to translate.

use crate::error::SdkError;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// REST base path of the hosted tracker service
pub const DEFAULT_BASE_URL: &str = "https://www.trackline.app/services/v5";

/// Default timeout for API requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the API token on every request
const TOKEN_HEADER: &str = "X-TrackerToken";

/// Authenticated HTTP channel to the tracker
pub(crate) struct Transport {
    http: reqwest::blocking::Client,
    pub(crate) token: String,
    pub(crate) base_url: String,
}

impl Transport {
    pub(crate) fn new(token: String, base_url: String, timeout: Duration) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap();

        Self {
            http,
            token,
            base_url,
        }
    }

    /// GET `url`, returning the parsed JSON body (object or array)
    pub(crate) fn get(&self, url: &str) -> Result<Value, SdkError> {
        tracing::debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .send()?;
        Self::read_json(response)
    }

    /// PUT a JSON `payload` to `url`, returning the parsed JSON body
    pub(crate) fn put<T: Serialize>(&self, url: &str, payload: &T) -> Result<Value, SdkError> {
        tracing::debug!("PUT {}", url);
        let response = self
            .http
            .put(url)
            .header(TOKEN_HEADER, &self.token)
            .json(payload)
            .send()?;
        Self::read_json(response)
    }

    /// POST a JSON `payload` to `url`, returning the parsed JSON body
    pub(crate) fn post<T: Serialize>(&self, url: &str, payload: &T) -> Result<Value, SdkError> {
        tracing::debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .header(TOKEN_HEADER, &self.token)
            .json(payload)
            .send()?;
        Self::read_json(response)
    }

    fn read_json(response: reqwest::blocking::Response) -> Result<Value, SdkError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SdkError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .map_err(|e| SdkError::Json(e.to_string()))
    }
}
