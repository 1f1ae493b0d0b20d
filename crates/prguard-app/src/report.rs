use anyhow::Context;
use prguard_domain::todos::{TodoItem, todo_findings, todo_note};
use prguard_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus,
};
use prguard_types::{
    Finding, PrguardData, PrguardReport, RunMeta, SCHEMA_REPORT_V1, Severity, ToolMeta, Verdict,
    VerdictCounts, VerdictStatus,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<PrguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse prguard report")
}

pub fn serialize_report(report: &PrguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &PrguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict.status {
            VerdictStatus::Pass => RenderableVerdictStatus::Pass,
            VerdictStatus::Warn => RenderableVerdictStatus::Warn,
            VerdictStatus::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        notes: report.notes.iter().map(|n| n.to_markdown()).collect(),
        data: RenderableData {
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: Some(f.check_id.clone()),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.as_str().to_string(),
            line: loc.line,
            col: loc.col,
        }),
        help: f.help.clone(),
        url: f.url.clone(),
    }
}

/// Fold the results of a finished TODO scan into a report.
///
/// TODO findings are informational, so the verdict status is left alone. They still count
/// against `max_findings`.
pub fn merge_todos(report: &mut PrguardReport, items: &[TodoItem], max_findings: usize) {
    report.data.todos_found = Some(items.len() as u32);
    if items.is_empty() {
        return;
    }

    if let Some(note) = todo_note(items) {
        report.notes.push(note);
    }

    let findings = todo_findings(items);
    let room = max_findings.saturating_sub(report.findings.len());
    let total = report.data.findings_total + findings.len() as u32;
    let kept: Vec<Finding> = findings.into_iter().take(room).collect();

    report.verdict.counts.info += kept.len() as u32;
    report.findings.extend(kept);
    report.data.findings_total = total;
    report.data.findings_emitted = report.findings.len() as u32;
    if report.data.findings_emitted < total && report.data.truncated_reason.is_none() {
        report.data.truncated_reason =
            Some(format!("findings truncated to max_findings={max_findings}"));
    }
}

pub fn runtime_error_report(message: &str) -> PrguardReport {
    let now = OffsetDateTime::now_utc();

    PrguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "prguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at: now,
            ended_at: Some(now),
            duration_ms: Some(0),
            pr: None,
        },
        verdict: Verdict {
            status: VerdictStatus::Fail,
            counts: VerdictCounts {
                info: 0,
                warn: 0,
                error: 1,
            },
            reasons: vec!["tool_error".to_string()],
        },
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: prguard_types::ids::CHECK_TOOL_RUNTIME.to_string(),
            code: prguard_types::ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run prguard.".to_string()),
            url: None,
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        notes: Vec::new(),
        recognition: None,
        data: PrguardData {
            profile: "unknown".to_string(),
            changed_files: 0,
            findings_total: 1,
            findings_emitted: 1,
            truncated_reason: None,
            todos_found: None,
        },
    }
}
