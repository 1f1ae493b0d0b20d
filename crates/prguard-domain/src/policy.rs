use prguard_types::Severity;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    Error,
    Warning,
}

#[derive(Clone, Debug)]
pub struct CheckPolicy {
    pub enabled: bool,
    pub severity: Severity,
}

impl CheckPolicy {
    pub fn enabled(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: Severity::Info,
        }
    }
}

/// Path fragments the changed-file checks look for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentinelFiles {
    pub manifest: String,
    pub lockfile: String,
    /// Command suggested when the lockfile was not regenerated.
    pub install_hint: String,
    pub env_sentinels: Vec<String>,
    /// Matched by equality, unlike every other sentinel.
    pub env_docs: String,
}

impl Default for SentinelFiles {
    fn default() -> Self {
        Self {
            manifest: "package.json".to_string(),
            lockfile: "yarn.lock".to_string(),
            install_hint: "yarn install".to_string(),
            env_sentinels: vec![
                ".env.example".to_string(),
                "environment.service.ts".to_string(),
            ],
            env_docs: "self-hosting.mdx".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WelcomePolicy {
    pub cla_url: String,
}

impl Default for WelcomePolicy {
    fn default() -> Self {
        Self {
            cla_url: "https://github.com/twentyhq/twenty/blob/main/.github/CLA.md".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    pub max_findings: usize,
    pub checks: BTreeMap<String, CheckPolicy>,
    pub files: SentinelFiles,
    pub welcome: WelcomePolicy,
}

impl EffectiveConfig {
    pub fn check_policy(&self, check_id: &str) -> Option<&CheckPolicy> {
        self.checks.get(check_id).filter(|p| p.enabled)
    }
}
