//! Contributor recognition on merge.
//!
//! Everything here is best-effort: a failure is logged and recorded in the receipt, and never
//! changes the verdict or the exit code.

use anyhow::Context;
use prguard_domain::model::{ContributorStats, PrMetadata};
use prguard_domain::recognition::{
    RecognitionLinks, SEARCH_PER_PAGE, closed_prs_query, compose_recognition_message, is_first_pr,
};
use prguard_github::{HttpFetch, PlatformApi, SearchQuery};
use prguard_settings::RecognitionSettings;
use prguard_types::{RecognitionReceipt, RecognitionStatus};
use tracing::{debug, error, info};

struct Posted {
    first_pr: bool,
    stats: ContributorStats,
}

/// Post the recognition comment for a merged PR.
pub fn run_recognition(
    platform: &dyn PlatformApi,
    http: &dyn HttpFetch,
    pr: &PrMetadata,
    settings: &RecognitionSettings,
) -> RecognitionReceipt {
    match recognize(platform, http, pr, settings) {
        Ok(posted) => RecognitionReceipt {
            status: RecognitionStatus::Posted,
            first_pr: Some(posted.first_pr),
            merged_prs_count: Some(posted.stats.merged_prs_count),
            rank: Some(posted.stats.rank),
            reason: None,
        },
        Err(err) => {
            let reason = format!("{err:#}");
            error!(pr = %pr.pr, error = %reason, "error handling PR merge");
            RecognitionReceipt {
                status: RecognitionStatus::Failed,
                first_pr: None,
                merged_prs_count: None,
                rank: None,
                reason: Some(reason),
            }
        }
    }
}

fn recognize(
    platform: &dyn PlatformApi,
    http: &dyn HttpFetch,
    pr: &PrMetadata,
    settings: &RecognitionSettings,
) -> anyhow::Result<Posted> {
    let login = pr.author.as_str();

    let query = SearchQuery::first_page(
        closed_prs_query(login, &settings.reference_repo),
        SEARCH_PER_PAGE,
    );
    let results = platform
        .search_issues(&query)
        .context("search closed pull requests")?;

    let first_pr = is_first_pr(results.total_count);
    let stats = if first_pr {
        settings.first_pr_stats
    } else {
        fetch_contributor_stats(http, &settings.links, login)?
    };

    prefetch_share_image(http, &settings.links, login);

    let body = compose_recognition_message(login, &stats, &settings.links);
    let comment = platform
        .create_comment(&pr.pr, &body)
        .context("post recognition comment")?;

    info!(
        pr = %pr.pr,
        comment_id = comment.id,
        first_pr,
        merged_prs_count = stats.merged_prs_count,
        "posted contributor recognition"
    );

    Ok(Posted { first_pr, stats })
}

fn fetch_contributor_stats(
    http: &dyn HttpFetch,
    links: &RecognitionLinks,
    login: &str,
) -> anyhow::Result<ContributorStats> {
    let url = links.stats_url(login);
    let value = http
        .fetch_json(&url)
        .with_context(|| format!("fetch contributor stats for {login}"))?;
    serde_json::from_value(value).with_context(|| format!("decode contributor stats from {url}"))
}

/// Warm the share image cache so the comment renders with the image. Failure is not fatal.
fn prefetch_share_image(http: &dyn HttpFetch, links: &RecognitionLinks, login: &str) {
    let url = links.share_image_url(login);
    match http.fetch_binary(&url) {
        Ok(bytes) => debug!(url = %url, bytes = bytes.len(), "fetched contributor image"),
        Err(err) => error!(url = %url, error = %err, "error fetching contributor image"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeHttp, FakePlatform};
    use prguard_domain::model::{AuthorAssociation, PrRef};
    use serde_json::json;

    fn merged_pr() -> PrMetadata {
        PrMetadata {
            author: "octocat".to_string(),
            association: AuthorAssociation::Contributor,
            merged: true,
            pr: PrRef {
                owner: "twentyhq".to_string(),
                repo: "twenty".to_string(),
                number: 7,
            },
        }
    }

    #[test]
    fn first_pr_uses_fallback_stats_without_stats_call() {
        let platform = FakePlatform::with_total_count(1);
        let http = FakeHttp::default();

        let receipt = run_recognition(&platform, &http, &merged_pr(), &RecognitionSettings::default());

        assert_eq!(receipt.status, RecognitionStatus::Posted);
        assert_eq!(receipt.first_pr, Some(true));
        assert_eq!(receipt.merged_prs_count, Some(1));
        assert!(http.json_calls.borrow().is_empty());
        assert_eq!(http.binary_calls.borrow().len(), 1);

        let comments = platform.comments.borrow();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].0.number, 7);
        assert!(comments[0].1.contains("This marks your **1st** PR on the repo."));
        assert!(comments[0].1.contains("**top 52%**"));
    }

    #[test]
    fn search_uses_reference_repo_and_page_size() {
        let platform = FakePlatform::with_total_count(1);
        let http = FakeHttp::default();

        run_recognition(&platform, &http, &merged_pr(), &RecognitionSettings::default());

        let searches = platform.searches.borrow();
        assert_eq!(
            searches[0].q,
            "is:pr author:octocat is:closed repo:ady-beraud/test-bot"
        );
        assert_eq!(searches[0].per_page, 2);
        assert_eq!(searches[0].page, 1);
    }

    #[test]
    fn repeat_contributor_gets_fetched_stats() {
        let platform = FakePlatform::with_total_count(5);
        let http = FakeHttp::with_stats(json!({ "mergedPRsCount": 5, "rank": 12 }));

        let receipt = run_recognition(&platform, &http, &merged_pr(), &RecognitionSettings::default());

        assert_eq!(receipt.status, RecognitionStatus::Posted);
        assert_eq!(receipt.first_pr, Some(false));
        assert_eq!(receipt.rank, Some(12));
        assert_eq!(
            http.json_calls.borrow().as_slice(),
            ["https://twenty.ngrok.app/api/contributors/contributorStats/octocat"]
        );
        let comments = platform.comments.borrow();
        assert!(comments[0].1.contains("**5th**"));
        assert!(comments[0].1.contains("**top 12%**"));
    }

    #[test]
    fn stats_failure_posts_nothing() {
        let platform = FakePlatform::with_total_count(3);
        let http = FakeHttp::default();

        let receipt = run_recognition(&platform, &http, &merged_pr(), &RecognitionSettings::default());

        assert_eq!(receipt.status, RecognitionStatus::Failed);
        assert!(receipt.reason.as_deref().unwrap_or_default().contains("contributor stats"));
        assert!(platform.comments.borrow().is_empty());
    }

    #[test]
    fn malformed_stats_posts_nothing() {
        let platform = FakePlatform::with_total_count(3);
        let http = FakeHttp::with_stats(json!({ "rank": "high" }));

        let receipt = run_recognition(&platform, &http, &merged_pr(), &RecognitionSettings::default());

        assert_eq!(receipt.status, RecognitionStatus::Failed);
        assert!(platform.comments.borrow().is_empty());
    }

    #[test]
    fn image_failure_still_posts() {
        let platform = FakePlatform::with_total_count(1);
        let http = FakeHttp {
            fail_image: true,
            ..FakeHttp::default()
        };

        let receipt = run_recognition(&platform, &http, &merged_pr(), &RecognitionSettings::default());

        assert_eq!(receipt.status, RecognitionStatus::Posted);
        assert_eq!(platform.comments.borrow().len(), 1);
    }

    #[test]
    fn search_failure_is_recorded() {
        let platform = FakePlatform {
            fail_search: true,
            ..FakePlatform::default()
        };
        let http = FakeHttp::default();

        let receipt = run_recognition(&platform, &http, &merged_pr(), &RecognitionSettings::default());

        assert_eq!(receipt.status, RecognitionStatus::Failed);
        assert!(http.binary_calls.borrow().is_empty());
        assert!(platform.comments.borrow().is_empty());
    }

    #[test]
    fn comment_failure_is_recorded() {
        let platform = FakePlatform {
            total_count: 1,
            fail_comment: true,
            ..FakePlatform::default()
        };
        let http = FakeHttp::default();

        let receipt = run_recognition(&platform, &http, &merged_pr(), &RecognitionSettings::default());

        assert_eq!(receipt.status, RecognitionStatus::Failed);
        assert!(receipt.reason.as_deref().unwrap_or_default().contains("post recognition comment"));
    }
}
