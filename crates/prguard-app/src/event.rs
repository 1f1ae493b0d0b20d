//! GitHub Actions event payload (`$GITHUB_EVENT_PATH`) parsing.

use anyhow::Context;
use prguard_domain::model::{AuthorAssociation, PrMetadata, PrRef};
use serde::Deserialize;

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
    repository: Option<RepositoryPayload>,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    number: u64,
    #[serde(default)]
    merged: Option<bool>,
    #[serde(default)]
    author_association: Option<String>,
    user: UserPayload,
    base: Option<BasePayload>,
}

#[derive(Deserialize)]
struct BasePayload {
    repo: RepositoryPayload,
}

#[derive(Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: UserPayload,
}

#[derive(Deserialize)]
struct UserPayload {
    login: String,
}

/// Extract PR metadata from an event payload.
///
/// Returns `Ok(None)` for events that carry no pull request.
pub fn parse_event_json(text: &str) -> anyhow::Result<Option<PrMetadata>> {
    let payload: EventPayload = serde_json::from_str(text).context("parse event payload")?;

    let Some(pr) = payload.pull_request else {
        return Ok(None);
    };

    let repo = payload
        .repository
        .or(pr.base.map(|b| b.repo))
        .context("event payload has no repository")?;

    // An absent association is not `NONE`; it must never earn the welcome.
    let association = match pr.author_association.as_deref() {
        Some(raw) => {
            let Ok(association) = raw.parse::<AuthorAssociation>();
            association
        }
        None => AuthorAssociation::Unknown(String::new()),
    };

    Ok(Some(PrMetadata {
        author: pr.user.login,
        association,
        merged: pr.merged.unwrap_or(false),
        pr: PrRef {
            owner: repo.owner.login,
            repo: repo.name,
            number: pr.number,
        },
    }))
}
