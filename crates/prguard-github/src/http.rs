use crate::api::HttpFetch;
use crate::github::check_status;
use crate::PlatformError;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;

/// Unauthenticated blocking HTTP client for the contributor stats service.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::transport("<client>", e))?;
        Ok(Self { client })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, PlatformError> {
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, concat!("prguard/", env!("CARGO_PKG_VERSION")))
            .send()
            .map_err(|e| PlatformError::transport(url, e))?;
        check_status(url, resp)
    }
}

impl HttpFetch for HttpClient {
    fn fetch_json(&self, url: &str) -> Result<serde_json::Value, PlatformError> {
        self.get(url)?
            .json()
            .map_err(|e| PlatformError::decode(url, e))
    }

    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, PlatformError> {
        let bytes = self
            .get(url)?
            .bytes()
            .map_err(|e| PlatformError::decode(url, e))?;
        Ok(bytes.to_vec())
    }
}
