use crate::checks;
use crate::model::PrContext;
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::{DomainReport, SeverityCounts};
use prguard_types::{Finding, Note, PrguardData, Severity, VerdictStatus};

pub fn evaluate(ctx: &PrContext, cfg: &EffectiveConfig) -> DomainReport {
    let mut findings: Vec<Finding> = Vec::new();
    let mut notes: Vec<Note> = Vec::new();

    checks::run_all(ctx, cfg, &mut findings, &mut notes);

    // Deterministic ordering before truncation.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&emitted);

    let data = PrguardData {
        profile: cfg.profile.clone(),
        changed_files: ctx.changes.len() as u32,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
        todos_found: None,
    };

    DomainReport {
        verdict,
        findings: emitted,
        notes,
        data,
        counts,
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> VerdictStatus {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return VerdictStatus::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => VerdictStatus::Fail,
            FailOn::Error => VerdictStatus::Warn,
        };
    }

    VerdictStatus::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) location.path (missing last)
    // 3) location.line (missing last)
    // 4) check_id
    // 5) code
    // 6) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };
    let (ap, al) = match &a.location {
        Some(l) => (l.path.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };
    let (bp, bl) = match &b.location {
        Some(l) => (l.path.as_str(), l.line.unwrap_or(u32::MAX)),
        None => ("~", u32::MAX),
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(ap.cmp(bp))
        .then(al.cmp(&bl))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
