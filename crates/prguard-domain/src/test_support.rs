use crate::model::{AuthorAssociation, ChangeSet, PrMetadata, PrRef};
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn, SentinelFiles, WelcomePolicy};
use prguard_types::{Severity, ids};
use std::collections::BTreeMap;

pub fn change_set(paths: &[&str]) -> ChangeSet {
    ChangeSet::new(paths.iter().copied())
}

pub fn pr_metadata(association: AuthorAssociation, merged: bool) -> PrMetadata {
    PrMetadata {
        author: "octocat".to_string(),
        association,
        merged,
        pr: PrRef {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
            number: 42,
        },
    }
}

pub fn config_with_check(check_id: &str, severity: Severity) -> EffectiveConfig {
    let mut checks = BTreeMap::new();
    checks.insert(check_id.to_string(), CheckPolicy::enabled(severity));
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks,
        files: SentinelFiles::default(),
        welcome: WelcomePolicy::default(),
    }
}

pub fn default_config() -> EffectiveConfig {
    let mut cfg = config_with_check(ids::CHECK_DEPS_LOCKFILE_SYNC, Severity::Warning);
    cfg.checks.insert(
        ids::CHECK_ENV_DOCS_SYNC.to_string(),
        CheckPolicy::enabled(Severity::Warning),
    );
    cfg.checks.insert(
        ids::CHECK_COMMUNITY_FIRST_TIME_WELCOME.to_string(),
        CheckPolicy::enabled(Severity::Info),
    );
    cfg
}
