use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

/// Render the PR summary comment: verdict, findings, then notes verbatim.
pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("## Prguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict, report.data.findings_emitted, report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
    } else {
        out.push_str("### Findings\n\n");
    }

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };

        out.push_str(&format!("- [{}] {}", sev, f.message));
        if let Some(help) = &f.help {
            out.push_str(&format!(" - <i>{}</i>", help));
        }
        if let Some(loc) = &f.location {
            match loc.line {
                Some(line) => out.push_str(&format!(" (`{}`:{})", loc.path, line)),
                None => out.push_str(&format!(" (`{}`)", loc.path)),
            }
        }
        if let Some(check_id) = &f.check_id {
            out.push_str(&format!(" `{}`", check_id));
        }
        out.push('\n');

        if let Some(url) = &f.url {
            out.push_str(&format!("  - url: {}\n", url));
        }
    }

    for note in &report.notes {
        out.push('\n');
        out.push_str(note);
        out.push('\n');
    }

    out
}
