//! The `check` use case: evaluate policy and produce a report.

use anyhow::Context;
use prguard_domain::model::PrContext;
use prguard_settings::{Overrides, ResolvedConfig};
use prguard_types::{
    PrguardReport, RunMeta, RunPr, SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictCounts,
    VerdictStatus,
};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Change set and PR metadata for this event.
    pub context: PrContext,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: PrguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config, evaluate policy, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        prguard_settings::PrguardConfigV1::default()
    } else {
        prguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = prguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let domain_report = prguard_domain::evaluate(&input.context, &resolved.effective);

    let finished_at = OffsetDateTime::now_utc();
    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    let pr = input.context.pr.as_ref().map(|pr| RunPr {
        owner: pr.pr.owner.clone(),
        repo: pr.pr.repo.clone(),
        number: pr.pr.number,
        author: pr.author.clone(),
        merged: pr.merged,
    });

    let report = PrguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "prguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            ended_at: Some(finished_at),
            duration_ms: Some(duration_ms),
            pr,
        },
        verdict: Verdict {
            status: domain_report.verdict,
            counts: VerdictCounts {
                info: domain_report.counts.info,
                warn: domain_report.counts.warning,
                error: domain_report.counts.error,
            },
            reasons: Vec::new(),
        },
        findings: domain_report.findings,
        notes: domain_report.notes,
        recognition: None,
        data: domain_report.data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: VerdictStatus) -> i32 {
    match verdict {
        VerdictStatus::Pass => 0,
        VerdictStatus::Warn => 0,
        VerdictStatus::Fail => 2,
    }
}
