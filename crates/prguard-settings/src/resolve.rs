use crate::{model::PrguardConfigV1, presets};
use anyhow::Context;
use prguard_domain::model::ContributorStats;
use prguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use prguard_domain::recognition::{FIRST_PR_STATS, RecognitionLinks};
use prguard_domain::todos::TodoScanOptions;
use prguard_types::Severity;

pub const DEFAULT_REFERENCE_REPO: &str = "ady-beraud/test-bot";
pub const DEFAULT_STATS_BASE_URL: &str = "https://twenty.ngrok.app";
pub const DEFAULT_SITE_URL: &str = "https://twenty.com";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct RecognitionSettings {
    pub enabled: bool,
    pub reference_repo: String,
    pub links: RecognitionLinks,
    /// Used instead of the stats API for an author's first merged PR.
    pub first_pr_stats: ContributorStats,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            reference_repo: DEFAULT_REFERENCE_REPO.to_string(),
            links: RecognitionLinks::new(DEFAULT_SITE_URL, DEFAULT_STATS_BASE_URL),
            first_pr_stats: FIRST_PR_STATS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TodoSettings {
    pub enabled: bool,
    pub scan: TodoScanOptions,
}

impl Default for TodoSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            scan: TodoScanOptions::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub recognition: RecognitionSettings,
    pub todos: TodoSettings,
}

pub fn resolve_config(
    cfg: PrguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "advisory".to_string());

    let mut effective = presets::preset(&profile);

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        let entry = effective
            .checks
            .entry(check_id.clone())
            .or_insert_with(CheckPolicy::disabled);

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
    }

    // fail_on override from config
    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    if let Some(files) = cfg.files {
        if let Some(v) = files.manifest {
            effective.files.manifest = non_empty("files.manifest", v)?;
        }
        if let Some(v) = files.lockfile {
            effective.files.lockfile = non_empty("files.lockfile", v)?;
        }
        if let Some(v) = files.install_hint {
            effective.files.install_hint = v;
        }
        if let Some(v) = files.env_sentinels {
            effective.files.env_sentinels = v
                .into_iter()
                .map(|s| non_empty("files.env_sentinels", s))
                .collect::<anyhow::Result<_>>()?;
        }
        if let Some(v) = files.env_docs {
            effective.files.env_docs = non_empty("files.env_docs", v)?;
        }
    }

    if let Some(url) = cfg.welcome.and_then(|w| w.cla_url) {
        effective.welcome.cla_url = url;
    }

    let recognition = resolve_recognition(cfg.recognition.unwrap_or_default())?;

    let todos_cfg = cfg.todos.unwrap_or_default();
    let mut todos = TodoSettings::default();
    if let Some(enabled) = todos_cfg.enabled {
        todos.enabled = enabled;
    }
    let keywords = match todos_cfg.keywords {
        Some(k) => k
            .into_iter()
            .map(|s| non_empty("todos.keywords", s))
            .collect::<anyhow::Result<Vec<_>>>()?,
        None => vec!["TODO".to_string(), "FIXME".to_string()],
    };
    todos.scan = TodoScanOptions::new(keywords, &todos_cfg.ignore)
        .context("invalid todos.ignore glob")?;

    Ok(ResolvedConfig {
        effective,
        recognition,
        todos,
    })
}

fn resolve_recognition(
    cfg: crate::model::RecognitionConfig,
) -> anyhow::Result<RecognitionSettings> {
    let mut out = RecognitionSettings::default();
    if let Some(enabled) = cfg.enabled {
        out.enabled = enabled;
    }
    if let Some(repo) = cfg.reference_repo {
        if repo.split('/').filter(|s| !s.is_empty()).count() != 2 {
            anyhow::bail!("recognition.reference_repo must look like owner/name, got: {repo}");
        }
        out.reference_repo = repo;
    }
    if cfg.site_url.is_some() || cfg.stats_base_url.is_some() {
        let site = cfg.site_url.as_deref().unwrap_or(DEFAULT_SITE_URL);
        let stats = cfg.stats_base_url.as_deref().unwrap_or(DEFAULT_STATS_BASE_URL);
        validate_url("recognition.site_url", site)?;
        validate_url("recognition.stats_base_url", stats)?;
        out.links = RecognitionLinks::new(site, stats);
    }
    if let Some(n) = cfg.fallback_merged_prs {
        out.first_pr_stats.merged_prs_count = n;
    }
    if let Some(rank) = cfg.fallback_rank {
        if rank > 100 {
            anyhow::bail!("recognition.fallback_rank is a percentile, got: {rank}");
        }
        out.first_pr_stats.rank = rank;
    }
    Ok(out)
}

fn validate_url(key: &str, v: &str) -> anyhow::Result<()> {
    if v.starts_with("https://") || v.starts_with("http://") {
        Ok(())
    } else {
        anyhow::bail!("{key} must be an http(s) URL, got: {v}")
    }
}

fn non_empty(key: &str, v: String) -> anyhow::Result<String> {
    if v.trim().is_empty() {
        anyhow::bail!("{key} must not be empty");
    }
    Ok(v)
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
