//! The full PR evaluation: policy checks, the background TODO scan and merge recognition.

use crate::check::{CheckInput, run_check};
use crate::recognition::run_recognition;
use crate::todos::{DiffLoader, TodoJob, schedule_todo_scan};
use prguard_domain::model::PrRef;
use prguard_github::{HttpFetch, PlatformApi};
use prguard_settings::ResolvedConfig;
use prguard_types::{PrguardReport, RecognitionReceipt};
use tracing::{debug, info, warn};

/// Network collaborators. `None` means offline: nothing is posted or fetched.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub platform: &'a dyn PlatformApi,
    pub http: &'a dyn HttpFetch,
}

pub struct EvaluationInput<'a> {
    pub check: CheckInput<'a>,
    /// Source of the unified diff for the TODO scan. `None` skips the scan.
    pub diff: Option<DiffLoader>,
}

pub struct EvaluationOutput {
    pub report: PrguardReport,
    pub resolved_config: ResolvedConfig,
    /// Still-running TODO scan. Dropping it detaches the thread.
    pub todo_job: Option<TodoJob>,
}

pub fn run_evaluation(
    input: EvaluationInput<'_>,
    services: Option<Services<'_>>,
) -> anyhow::Result<EvaluationOutput> {
    let merged_pr = input.check.context.pr.clone().filter(|pr| pr.merged);

    let output = run_check(input.check)?;
    let resolved = output.resolved_config;
    let mut report = output.report;

    // Started before recognition so the scan overlaps the network calls.
    let todo_job = match input.diff {
        Some(loader) if resolved.todos.enabled => {
            Some(schedule_todo_scan(loader, resolved.todos.scan.clone())?)
        }
        Some(_) => {
            debug!("todo scan disabled in config");
            None
        }
        None => None,
    };

    if let Some(pr) = merged_pr {
        let receipt = if !resolved.recognition.enabled {
            RecognitionReceipt::skipped("disabled in config")
        } else if let Some(services) = services {
            run_recognition(services.platform, services.http, &pr, &resolved.recognition)
        } else {
            info!(pr = %pr.pr, "offline; contributor recognition skipped");
            RecognitionReceipt::skipped("offline")
        };
        report.recognition = Some(receipt);
    }

    Ok(EvaluationOutput {
        report,
        resolved_config: resolved,
        todo_job,
    })
}

/// Post the rendered report as a PR comment. Best-effort; returns whether it was posted.
pub fn post_summary(platform: &dyn PlatformApi, report: &PrguardReport, markdown: &str) -> bool {
    let Some(pr) = &report.run.pr else {
        debug!("no pull request in this run; summary not posted");
        return false;
    };
    let pr_ref = PrRef {
        owner: pr.owner.clone(),
        repo: pr.repo.clone(),
        number: pr.number,
    };

    match platform.create_comment(&pr_ref, markdown) {
        Ok(comment) => {
            info!(pr = %pr_ref, comment_id = comment.id, "posted prguard summary");
            true
        }
        Err(err) => {
            warn!(pr = %pr_ref, error = %err, "failed to post prguard summary");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeHttp, FakePlatform};
    use prguard_domain::model::{AuthorAssociation, ChangeSet, PrContext, PrMetadata};
    use prguard_settings::Overrides;
    use prguard_types::{RecognitionStatus, VerdictStatus, ids};

    fn context(paths: &[&str], association: AuthorAssociation, merged: bool) -> PrContext {
        PrContext {
            changes: ChangeSet::new(paths.iter().copied()),
            pr: Some(PrMetadata {
                author: "octocat".to_string(),
                association,
                merged,
                pr: PrRef {
                    owner: "twentyhq".to_string(),
                    repo: "twenty".to_string(),
                    number: 9,
                },
            }),
        }
    }

    fn input(config_text: &str, ctx: PrContext) -> EvaluationInput<'_> {
        EvaluationInput {
            check: CheckInput {
                config_text,
                overrides: Overrides::default(),
                context: ctx,
            },
            diff: None,
        }
    }

    #[test]
    fn open_pr_gets_no_recognition() {
        let platform = FakePlatform::with_total_count(1);
        let http = FakeHttp::default();
        let services = Services {
            platform: &platform,
            http: &http,
        };

        let out = run_evaluation(
            input("", context(&["package.json"], AuthorAssociation::Member, false)),
            Some(services),
        )
        .expect("evaluate");

        assert!(out.report.recognition.is_none());
        assert_eq!(out.report.verdict.status, VerdictStatus::Warn);
        assert!(platform.searches.borrow().is_empty());
    }

    #[test]
    fn merged_pr_posts_recognition_and_keeps_verdict() {
        let platform = FakePlatform::with_total_count(1);
        let http = FakeHttp::default();
        let services = Services {
            platform: &platform,
            http: &http,
        };

        let out = run_evaluation(
            input(
                "",
                context(&["package.json", "yarn.lock"], AuthorAssociation::NoAssociation, true),
            ),
            Some(services),
        )
        .expect("evaluate");

        let receipt = out.report.recognition.expect("receipt");
        assert_eq!(receipt.status, RecognitionStatus::Posted);
        assert_eq!(out.report.verdict.status, VerdictStatus::Pass);
        assert_eq!(out.report.notes.len(), 1);
        assert_eq!(out.report.notes[0].check_id, ids::CHECK_COMMUNITY_FIRST_TIME_WELCOME);
    }

    #[test]
    fn recognition_failure_does_not_change_verdict() {
        let platform = FakePlatform::with_total_count(4);
        let http = FakeHttp::default();
        let services = Services {
            platform: &platform,
            http: &http,
        };

        let out = run_evaluation(
            input("", context(&["src/a.ts"], AuthorAssociation::Member, true)),
            Some(services),
        )
        .expect("evaluate");

        let receipt = out.report.recognition.expect("receipt");
        assert_eq!(receipt.status, RecognitionStatus::Failed);
        assert_eq!(out.report.verdict.status, VerdictStatus::Pass);
    }

    #[test]
    fn offline_merged_pr_is_skipped() {
        let out = run_evaluation(
            input("", context(&[], AuthorAssociation::Member, true)),
            None,
        )
        .expect("evaluate");

        let receipt = out.report.recognition.expect("receipt");
        assert_eq!(receipt.status, RecognitionStatus::Skipped);
        assert_eq!(receipt.reason.as_deref(), Some("offline"));
    }

    #[test]
    fn recognition_can_be_disabled() {
        let platform = FakePlatform::with_total_count(1);
        let http = FakeHttp::default();
        let services = Services {
            platform: &platform,
            http: &http,
        };

        let out = run_evaluation(
            input(
                "[recognition]\nenabled = false\n",
                context(&[], AuthorAssociation::Member, true),
            ),
            Some(services),
        )
        .expect("evaluate");

        let receipt = out.report.recognition.expect("receipt");
        assert_eq!(receipt.status, RecognitionStatus::Skipped);
        assert!(platform.searches.borrow().is_empty());
    }

    #[test]
    fn todo_scan_is_scheduled_and_joinable() {
        let mut evaluation = input("", context(&["src/a.ts"], AuthorAssociation::Member, false));
        evaluation.diff = Some(Box::new(|| {
            Ok("+++ b/src/a.ts\n@@ -0,0 +1 @@\n+// FIXME: flaky\n".to_string())
        }));

        let out = run_evaluation(evaluation, None).expect("evaluate");

        let items = out.todo_job.expect("job").wait().expect("scan ok");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].keyword, "FIXME");
    }

    #[test]
    fn todo_scan_can_be_disabled() {
        let mut evaluation = input(
            "[todos]\nenabled = false\n",
            context(&[], AuthorAssociation::Member, false),
        );
        evaluation.diff = Some(Box::new(|| Ok(String::new())));

        let out = run_evaluation(evaluation, None).expect("evaluate");
        assert!(out.todo_job.is_none());
    }

    #[test]
    fn summary_is_posted_to_the_run_pr() {
        let platform = FakePlatform::default();
        let out = run_evaluation(
            input("", context(&[], AuthorAssociation::Member, false)),
            None,
        )
        .expect("evaluate");

        assert!(post_summary(&platform, &out.report, "## Prguard report"));
        let comments = platform.comments.borrow();
        assert_eq!(comments[0].0.to_string(), "twentyhq/twenty#9");
        assert_eq!(comments[0].1, "## Prguard report");
    }

    #[test]
    fn summary_failure_is_not_fatal() {
        let platform = FakePlatform {
            fail_comment: true,
            ..FakePlatform::default()
        };
        let out = run_evaluation(
            input("", context(&[], AuthorAssociation::Member, false)),
            None,
        )
        .expect("evaluate");

        assert!(!post_summary(&platform, &out.report, "body"));
    }
}
