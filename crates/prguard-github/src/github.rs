use crate::api::{CommentRef, PlatformApi, SearchQuery, SearchResults};
use crate::error::truncate_body;
use crate::PlatformError;
use prguard_domain::model::PrRef;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

/// Blocking GitHub REST client covering the two endpoints prguard needs.
pub struct GithubClient {
    api_url: String,
    token: Option<String>,
    client: Client,
}

impl GithubClient {
    pub fn new(
        api_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlatformError::transport(api_url, e))?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            client,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder
            .header(USER_AGENT, concat!("prguard/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

impl PlatformApi for GithubClient {
    fn search_issues(&self, query: &SearchQuery) -> Result<SearchResults, PlatformError> {
        let url = search_url(&self.api_url, query)?;
        let resp = self
            .authorized(self.client.get(url.clone()))
            .send()
            .map_err(|e| PlatformError::transport(url.as_str(), e))?;
        decode(url.as_str(), resp)
    }

    fn create_comment(&self, pr: &PrRef, body: &str) -> Result<CommentRef, PlatformError> {
        let url = comment_url(&self.api_url, pr);
        let resp = self
            .authorized(self.client.post(&url))
            .json(&json!({ "body": body }))
            .send()
            .map_err(|e| PlatformError::transport(&url, e))?;
        decode(&url, resp)
    }
}

pub(crate) fn check_status(url: &str, resp: Response) -> Result<Response, PlatformError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(PlatformError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body: truncate_body(&body),
    })
}

fn decode<T: DeserializeOwned>(url: &str, resp: Response) -> Result<T, PlatformError> {
    check_status(url, resp)?
        .json::<T>()
        .map_err(|e| PlatformError::decode(url, e))
}

fn search_url(api_url: &str, query: &SearchQuery) -> Result<Url, PlatformError> {
    let per_page = query.per_page.to_string();
    let page = query.page.to_string();
    Url::parse_with_params(
        &format!("{api_url}/search/issues"),
        &[
            ("q", query.q.as_str()),
            ("per_page", per_page.as_str()),
            ("page", page.as_str()),
        ],
    )
    .map_err(|e| PlatformError::InvalidRequest(format!("search url: {e}")))
}

fn comment_url(api_url: &str, pr: &PrRef) -> String {
    format!(
        "{api_url}/repos/{}/{}/issues/{}/comments",
        pr.owner, pr.repo, pr.number
    )
}
