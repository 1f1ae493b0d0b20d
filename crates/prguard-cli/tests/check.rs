//! End-to-end runs of `prguard check` in offline mode.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

#[allow(deprecated)]
fn prguard_cmd(repo_root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("prguard").unwrap();
    cmd.env_remove("GITHUB_EVENT_PATH")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_API_URL")
        .env_remove("PRGUARD_LOG")
        .arg("--repo-root")
        .arg(repo_root);
    cmd
}

fn write_event(dir: &Path, association: &str, merged: bool) -> std::path::PathBuf {
    let event = serde_json::json!({
        "action": if merged { "closed" } else { "opened" },
        "pull_request": {
            "number": 42,
            "merged": merged,
            "author_association": association,
            "user": { "login": "octocat" }
        },
        "repository": { "name": "twenty", "owner": { "login": "twentyhq" } }
    });
    let path = dir.join("event.json");
    std::fs::write(&path, event.to_string()).unwrap();
    path
}

fn read_report(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn manifest_without_lockfile_warns_and_exits_zero() {
    let tmp = tempfile::tempdir().unwrap();
    let report_out = tmp.path().join("out/report.json");

    prguard_cmd(tmp.path())
        .args(["check", "--offline", "--changed-file", "package.json"])
        .arg("--report-out")
        .arg(&report_out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "::warning file=package.json::[deps.lockfile_sync:lockfile_not_updated] \
             Changes were made to package.json, but not to yarn.lock",
        ));

    let report = read_report(&report_out);
    assert_eq!(report["schema"], "prguard.report.v1");
    assert_eq!(report["verdict"]["status"], "warn");
    assert_eq!(report["findings"].as_array().unwrap().len(), 1);
    assert!(report.get("recognition").is_none());
}

#[test]
fn manifest_and_lockfile_pass() {
    let tmp = tempfile::tempdir().unwrap();
    let report_out = tmp.path().join("report.json");

    prguard_cmd(tmp.path())
        .args([
            "check",
            "--offline",
            "--changed-file",
            "package.json",
            "--changed-file",
            "yarn.lock",
        ])
        .arg("--report-out")
        .arg(&report_out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(read_report(&report_out)["verdict"]["status"], "pass");
}

#[test]
fn strict_profile_fails_on_env_warning() {
    let tmp = tempfile::tempdir().unwrap();
    let report_out = tmp.path().join("report.json");

    prguard_cmd(tmp.path())
        .args(["--profile", "strict", "check", "--offline"])
        .args(["--changed-file", "packages/server/.env.example"])
        .arg("--report-out")
        .arg(&report_out)
        .assert()
        .code(2);

    let report = read_report(&report_out);
    assert_eq!(report["verdict"]["status"], "fail");
    assert_eq!(report["findings"][0]["check_id"], "env.docs_sync");
}

#[test]
fn config_file_sets_fail_on() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("prguard.toml"), "fail_on = \"warning\"\n").unwrap();
    let report_out = tmp.path().join("report.json");

    prguard_cmd(tmp.path())
        .args(["check", "--offline", "--changed-file", "package.json"])
        .arg("--report-out")
        .arg(&report_out)
        .assert()
        .code(2);
}

#[test]
fn first_time_contributor_is_welcomed_in_markdown() {
    let tmp = tempfile::tempdir().unwrap();
    let event = write_event(tmp.path(), "FIRST_TIME_CONTRIBUTOR", false);
    let report_out = tmp.path().join("report.json");
    let markdown_out = tmp.path().join("comment.md");

    prguard_cmd(tmp.path())
        .args(["check", "--offline", "--write-markdown"])
        .arg("--event")
        .arg(&event)
        .arg("--report-out")
        .arg(&report_out)
        .arg("--markdown-out")
        .arg(&markdown_out)
        .assert()
        .success();

    let md = std::fs::read_to_string(&markdown_out).unwrap();
    assert!(md.contains("# Welcome! <br>"));
    assert!(md.contains("congrats on your first PR!"));

    let report = read_report(&report_out);
    assert_eq!(report["run"]["pr"]["author"], "octocat");
    assert_eq!(report["run"]["pr"]["number"], 42);
}

#[test]
fn member_is_not_welcomed() {
    let tmp = tempfile::tempdir().unwrap();
    let event = write_event(tmp.path(), "MEMBER", false);
    let report_out = tmp.path().join("report.json");

    prguard_cmd(tmp.path())
        .args(["check", "--offline"])
        .arg("--event")
        .arg(&event)
        .arg("--report-out")
        .arg(&report_out)
        .assert()
        .success();

    let report = read_report(&report_out);
    assert!(report["notes"].as_array().unwrap().is_empty());
}

#[test]
fn merged_pr_offline_records_skipped_recognition() {
    let tmp = tempfile::tempdir().unwrap();
    let event = write_event(tmp.path(), "CONTRIBUTOR", true);
    let report_out = tmp.path().join("report.json");

    prguard_cmd(tmp.path())
        .args(["check", "--offline"])
        .arg("--event")
        .arg(&event)
        .arg("--report-out")
        .arg(&report_out)
        .assert()
        .success();

    let report = read_report(&report_out);
    assert_eq!(report["recognition"]["status"], "skipped");
    assert_eq!(report["recognition"]["reason"], "offline");
}

#[test]
fn malformed_event_is_a_runtime_error() {
    let tmp = tempfile::tempdir().unwrap();
    let event = tmp.path().join("event.json");
    std::fs::write(&event, "{ not json").unwrap();
    let report_out = tmp.path().join("report.json");

    prguard_cmd(tmp.path())
        .args(["check", "--offline"])
        .arg("--event")
        .arg(&event)
        .arg("--report-out")
        .arg(&report_out)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("event payload"));

    let report = read_report(&report_out);
    assert_eq!(report["verdict"]["status"], "fail");
    assert_eq!(report["findings"][0]["check_id"], "tool.runtime");
    assert_eq!(report["findings"][0]["code"], "runtime_error");
}

#[test]
fn md_and_annotations_rerender_an_existing_report() {
    let tmp = tempfile::tempdir().unwrap();
    let report_out = tmp.path().join("report.json");

    prguard_cmd(tmp.path())
        .args(["check", "--offline", "--changed-file", "package.json"])
        .arg("--report-out")
        .arg(&report_out)
        .assert()
        .success();

    prguard_cmd(tmp.path())
        .arg("md")
        .arg("--report")
        .arg(&report_out)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- <i>Perhaps you need to run `yarn install`?</i>",
        ));

    prguard_cmd(tmp.path())
        .args(["annotations", "--max", "1"])
        .arg("--report")
        .arg(&report_out)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("::warning file=package.json::"));
}

#[test]
fn explain_known_and_unknown() {
    let tmp = tempfile::tempdir().unwrap();

    prguard_cmd(tmp.path())
        .args(["explain", "deps.lockfile_sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"));

    prguard_cmd(tmp.path())
        .args(["explain", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Available check_ids:"));
}
