use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `prguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PrguardConfigV1 {
    /// Optional schema string for tooling (`prguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `advisory` (default) or `strict`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When to fail the job: `error` (default) or `warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many findings to emit before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FilesConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome: Option<WelcomeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recognition: Option<RecognitionConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<TodosConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Override preset severity: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Path fragments watched by the changed-file checks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FilesConfig {
    /// Package manifest file name, matched as a substring of changed paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,

    /// Lockfile name, matched as a substring of changed paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lockfile: Option<String>,

    /// Command suggested when the lockfile is stale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_hint: Option<String>,

    /// Environment configuration fragments, matched as substrings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_sentinels: Option<Vec<String>>,

    /// Documentation path that must be changed alongside env files (exact match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_docs: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WelcomeConfig {
    /// Contributor License Agreement linked from the welcome note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cla_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RecognitionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// `owner/name` of the repository whose closed PRs are counted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_repo: Option<String>,

    /// Base URL of the contributor stats and share image API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_base_url: Option<String>,

    /// Base URL of the public site hosting contributor pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_merged_prs: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_rank: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TodosConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Markers to look for (whole word, case-sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Glob patterns of paths to skip.
    #[serde(default)]
    pub ignore: Vec<String>,
}
