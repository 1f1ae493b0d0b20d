//! In-memory platform doubles that record every call.

use prguard_domain::model::PrRef;
use prguard_github::{CommentRef, HttpFetch, PlatformApi, PlatformError, SearchQuery, SearchResults};
use std::cell::RefCell;

fn status_error(url: &str, status: u16) -> PlatformError {
    PlatformError::Status {
        url: url.to_string(),
        status,
        body: String::new(),
    }
}

#[derive(Default)]
pub(crate) struct FakePlatform {
    pub total_count: u64,
    pub fail_search: bool,
    pub fail_comment: bool,
    pub searches: RefCell<Vec<SearchQuery>>,
    pub comments: RefCell<Vec<(PrRef, String)>>,
}

impl FakePlatform {
    pub fn with_total_count(total_count: u64) -> Self {
        Self {
            total_count,
            ..Self::default()
        }
    }
}

impl PlatformApi for FakePlatform {
    fn search_issues(&self, query: &SearchQuery) -> Result<SearchResults, PlatformError> {
        self.searches.borrow_mut().push(query.clone());
        if self.fail_search {
            return Err(status_error("https://api.github.com/search/issues", 403));
        }
        Ok(SearchResults {
            total_count: self.total_count,
            incomplete_results: false,
        })
    }

    fn create_comment(&self, pr: &PrRef, body: &str) -> Result<CommentRef, PlatformError> {
        self.comments
            .borrow_mut()
            .push((pr.clone(), body.to_string()));
        if self.fail_comment {
            return Err(status_error("https://api.github.com/repos/comments", 404));
        }
        Ok(CommentRef {
            id: self.comments.borrow().len() as u64,
            html_url: None,
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeHttp {
    pub stats: Option<serde_json::Value>,
    pub fail_image: bool,
    pub json_calls: RefCell<Vec<String>>,
    pub binary_calls: RefCell<Vec<String>>,
}

impl FakeHttp {
    pub fn with_stats(stats: serde_json::Value) -> Self {
        Self {
            stats: Some(stats),
            ..Self::default()
        }
    }
}

impl HttpFetch for FakeHttp {
    fn fetch_json(&self, url: &str) -> Result<serde_json::Value, PlatformError> {
        self.json_calls.borrow_mut().push(url.to_string());
        self.stats.clone().ok_or_else(|| status_error(url, 502))
    }

    fn fetch_binary(&self, url: &str) -> Result<Vec<u8>, PlatformError> {
        self.binary_calls.borrow_mut().push(url.to_string());
        if self.fail_image {
            return Err(status_error(url, 500));
        }
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}
