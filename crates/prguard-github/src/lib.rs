//! Outbound collaborators of the evaluator.
//!
//! The application layer only sees the [`PlatformApi`] and [`HttpFetch`] traits; the
//! reqwest-backed [`GithubClient`] and [`HttpClient`] are wired in by the CLI, and tests
//! substitute fakes.

#![forbid(unsafe_code)]

mod api;
mod error;
mod github;
mod http;

pub use api::{CommentRef, HttpFetch, PlatformApi, SearchQuery, SearchResults};
pub use error::PlatformError;
pub use github::{DEFAULT_API_URL, GithubClient};
pub use http::HttpClient;
