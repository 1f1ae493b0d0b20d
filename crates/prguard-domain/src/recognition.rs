//! Pure pieces of the merge recognition flow: URLs, search query, message body.

use crate::model::ContributorStats;
use crate::ordinal::ordinal;

pub const LINKEDIN_SHARE_URL: &str = "https://www.linkedin.com/sharing/share-offsite/?url=";
pub const TWITTER_SHARE_URL: &str = "https://www.twitter.com/share?url=";

/// Results per page requested from the search API. Two is enough to tell
/// "exactly one" from "more than one".
pub const SEARCH_PER_PAGE: u32 = 2;

/// Stats used when the merged PR is the author's first one; the stats API is not consulted.
pub const FIRST_PR_STATS: ContributorStats = ContributorStats {
    merged_prs_count: 1,
    rank: 52,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecognitionLinks {
    site_url: String,
    stats_base_url: String,
}

impl RecognitionLinks {
    pub fn new(site_url: &str, stats_base_url: &str) -> Self {
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            stats_base_url: stats_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn contributor_url(&self, login: &str) -> String {
        format!("{}/contributors/{}", self.site_url, login)
    }

    pub fn stats_url(&self, login: &str) -> String {
        format!(
            "{}/api/contributors/contributorStats/{}",
            self.stats_base_url, login
        )
    }

    pub fn share_image_url(&self, login: &str) -> String {
        format!("{}/api/contributors/{}/og.png", self.stats_base_url, login)
    }
}

/// Search query for the author's closed pull requests on `reference_repo`.
pub fn closed_prs_query(login: &str, reference_repo: &str) -> String {
    format!("is:pr author:{login} is:closed repo:{reference_repo}")
}

pub fn is_first_pr(total_count: u64) -> bool {
    total_count == 1
}

pub fn compose_recognition_message(
    login: &str,
    stats: &ContributorStats,
    links: &RecognitionLinks,
) -> String {
    let contributor_url = links.contributor_url(login);
    format!(
        "Thanks @{login} for your contribution!\n\
         This marks your **{count}** PR on the repo. \
         You're **top {rank}%** of all our contributors 🎉\n\
         [See contributor page]({contributor_url}) - \
         [Share on LinkedIn]({LINKEDIN_SHARE_URL}{contributor_url}) - \
         [Share on Twitter]({TWITTER_SHARE_URL}{contributor_url})\n\n\
         ![Contributions]({image})",
        count = ordinal(u64::from(stats.merged_prs_count)),
        rank = stats.rank,
        image = links.share_image_url(login),
    )
}
