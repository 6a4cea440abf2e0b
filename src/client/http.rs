//! HTTP client for a running range service.
//!
//! Every call is a single attempt; transport failures and rejected requests
//! come back as errors for the caller to report.

use crate::api::ErrorResponse;
use crate::processing::RangeSnapshot;
use serde::de::DeserializeOwned;
use std::error::Error;

/// Thin wrapper around the four range endpoints.
#[derive(Debug, Clone)]
pub struct RangeClient {
    base_url: String,
    http: reqwest::Client,
}

impl RangeClient {
    pub fn new(base_url: &str) -> RangeClient {
        RangeClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /ipRanges`
    pub async fn list(&self) -> Result<RangeSnapshot, Box<dyn Error>> {
        let response = self.http.get(self.url("/ipRanges")).send().await?;
        decode(response, "GET /ipRanges").await
    }

    /// `POST /ipRanges`
    pub async fn add(&self, cidr: &str) -> Result<RangeSnapshot, Box<dyn Error>> {
        let response = self
            .http
            .post(self.url("/ipRanges"))
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(cidr.to_string())
            .send()
            .await?;
        decode(response, "POST /ipRanges").await
    }

    /// `DELETE /ipRanges`
    pub async fn reset(&self) -> Result<(), Box<dyn Error>> {
        let response = self.http.delete(self.url("/ipRanges")).send().await?;
        check_status(response, "DELETE /ipRanges").await?;
        Ok(())
    }

    /// `POST /isInclude`
    pub async fn check(&self, ip: &str) -> Result<bool, Box<dyn Error>> {
        let response = self
            .http
            .post(self.url("/isInclude"))
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(ip.to_string())
            .send()
            .await?;
        decode(response, "POST /isInclude").await
    }
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check_status(
    response: reqwest::Response,
    what: &str,
) -> Result<reqwest::Response, Box<dyn Error>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    log::warn!("{what} failed with {status}: {message}");
    Err(format!("{what} failed with {status}: {message}").into())
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T, Box<dyn Error>> {
    let body = check_status(response, what).await?.text().await?;
    let mut deserializer = serde_json::Deserializer::from_str(&body);
    let parsed = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("RESPONSE START:\n\n{}\n\nRESPONSE END\n", body);
        format!("Error parsing {what} response: path={} error={}", e.path(), e)
    })?;
    Ok(parsed)
}
