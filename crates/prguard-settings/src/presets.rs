use prguard_domain::policy::{
    CheckPolicy, EffectiveConfig, FailOn, SentinelFiles, WelcomePolicy,
};
use prguard_types::Severity;
use std::collections::BTreeMap;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "strict" => strict_profile(),
        // default
        _ => advisory_profile(),
    }
}

fn advisory_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "advisory".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks: default_checks(),
        files: SentinelFiles::default(),
        welcome: WelcomePolicy::default(),
    }
}

fn strict_profile() -> EffectiveConfig {
    // Same checks, but any warning fails the job.
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Warning,
        ..advisory_profile()
    }
}

fn default_checks() -> BTreeMap<String, CheckPolicy> {
    use prguard_types::ids::*;
    let mut m = BTreeMap::new();

    m.insert(
        CHECK_DEPS_LOCKFILE_SYNC.to_string(),
        CheckPolicy::enabled(Severity::Warning),
    );
    m.insert(
        CHECK_ENV_DOCS_SYNC.to_string(),
        CheckPolicy::enabled(Severity::Warning),
    );
    m.insert(
        CHECK_COMMUNITY_FIRST_TIME_WELCOME.to_string(),
        CheckPolicy::enabled(Severity::Info),
    );

    m
}
