use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl PlatformError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn decode(url: &str, source: reqwest::Error) -> Self {
        Self::Decode {
            url: url.to_string(),
            source,
        }
    }
}

/// Body excerpts kept in errors are capped so logs stay readable.
pub(crate) const MAX_ERROR_BODY: usize = 512;

pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_url_and_code() {
        let err = PlatformError::Status {
            url: "https://api.github.com/search/issues".to_string(),
            status: 403,
            body: "rate limited".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "https://api.github.com/search/issues returned HTTP 403: rate limited"
        );
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundary() {
        let body = "é".repeat(400);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= MAX_ERROR_BODY + 3);
        assert_eq!(truncate_body("short"), "short");
    }
}
