use crate::PlatformError;
use prguard_domain::model::PrRef;
use serde::Deserialize;

/// Query for the platform's issue/PR search endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub per_page: u32,
    pub page: u32,
}

impl SearchQuery {
    pub fn first_page(q: impl Into<String>, per_page: u32) -> Self {
        Self {
            q: q.into(),
            per_page,
            page: 1,
        }
    }
}

/// Only the fields the evaluator reads; items are not decoded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SearchResults {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CommentRef {
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Hosting platform operations used by the evaluator.
pub trait PlatformApi {
    fn search_issues(&self, query: &SearchQuery) -> Result<SearchResults, PlatformError>;

    fn create_comment(&self, pr: &PrRef, body: &str) -> Result<CommentRef, PlatformError>;
}

/// Plain HTTP GETs against third-party services.
pub trait HttpFetch {
    fn fetch_json(&self, url: &str) -> Result<serde_json::Value, PlatformError>;

    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, PlatformError>;
}
