//! CLI entry point for prguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `prguard-app` crate.

mod git;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use prguard_app::{
    CheckInput, EvaluationInput, ExplainOutput, Services, merge_todos, parse_event_json,
    parse_report_json, post_summary, render_annotations, render_markdown, run_evaluation,
    run_explain, runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
use prguard_domain::model::{ChangeSet, PrContext, PrMetadata};
use prguard_github::{DEFAULT_API_URL, GithubClient, HttpClient};
use prguard_settings::Overrides;
use prguard_types::PrguardReport;
use std::io::IsTerminal;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "prguard",
    version,
    about = "Pull request policy checks, contributor welcome and merge recognition"
)]
struct Cli {
    /// Repository root (where git runs and the config is looked up).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to prguard config TOML, relative to the repository root.
    #[arg(long, default_value = "prguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (advisory|strict).
    #[arg(long)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// GitHub event payload describing the pull request.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event: Option<Utf8PathBuf>,

    /// Changed file path (repeatable). Takes precedence over --base/--head.
    #[arg(long = "changed-file")]
    changed_files: Vec<String>,

    /// Git base revision (e.g. origin/main).
    #[arg(long, requires = "head")]
    base: Option<String>,

    /// Git head revision (e.g. HEAD).
    #[arg(long, requires = "base")]
    head: Option<String>,

    /// Where to write the JSON report.
    #[arg(long, default_value = "artifacts/prguard/report.json")]
    report_out: Utf8PathBuf,

    /// Write a Markdown report alongside the JSON.
    #[arg(long)]
    write_markdown: bool,

    /// Where to write the Markdown report (if enabled).
    #[arg(long, default_value = "artifacts/prguard/comment.md")]
    markdown_out: Utf8PathBuf,

    /// Maximum number of annotations to print on stdout.
    #[arg(long, default_value = "10")]
    max_annotations: usize,

    /// Skip every outbound call (recognition, summary comment).
    #[arg(long)]
    offline: bool,

    /// Post the Markdown summary, welcome note included, as a PR comment.
    /// Without this flag notes only reach the report and comment.md artifacts.
    #[arg(long)]
    post_summary: bool,

    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    github_api_url: String,

    /// Token used for GitHub API calls.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Per-request timeout for outbound HTTP calls.
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the pull request and write artifacts.
    Check(CheckArgs),

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/prguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/prguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit (default 10, per GHA best practices).
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "deps.lockfile_sync") or code (e.g., "lockfile_not_updated").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match &cli.cmd {
        Commands::Check(args) => cmd_check(&cli, args),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

/// Logs go to stderr; stdout carries workflow commands only.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("PRGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("prguard=info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .try_init();
}

fn cmd_check(cli: &Cli, args: &CheckArgs) -> anyhow::Result<()> {
    let repo_root = cli
        .repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.repo_root.clone());

    match run_check_command(cli, args, &repo_root) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            error!("{err:#}");
            let report = runtime_error_report(&format!("{err:#}"));
            if let Err(write_err) = write_report_file(&args.report_out, &report) {
                error!("could not write runtime error report: {write_err:#}");
            }
            std::process::exit(1);
        }
    }
}

fn run_check_command(cli: &Cli, args: &CheckArgs, repo_root: &Utf8Path) -> anyhow::Result<i32> {
    if !repo_root.exists() {
        anyhow::bail!("repo root does not exist: {}", repo_root);
    }

    // Missing config file is allowed (defaults apply); an unreadable one is not.
    let cfg_path = repo_root.join(&cli.config);
    let cfg_text = if cfg_path.exists() {
        std::fs::read_to_string(&cfg_path).with_context(|| format!("read config: {cfg_path}"))?
    } else {
        debug!(path = %cfg_path, "no config file; using defaults");
        String::new()
    };

    let pr = load_event(args.event.as_deref())?;
    let changes = collect_changes(args, repo_root)?;

    let diff = match (&args.base, &args.head) {
        (Some(base), Some(head)) => {
            let (root, base, head) = (repo_root.to_owned(), base.clone(), head.clone());
            Some(Box::new(move || git::unified_diff(&root, &base, &head))
                as prguard_app::DiffLoader)
        }
        _ => None,
    };

    let input = EvaluationInput {
        check: CheckInput {
            config_text: &cfg_text,
            overrides: Overrides {
                profile: cli.profile.clone(),
                max_findings: cli.max_findings,
            },
            context: PrContext { changes, pr },
        },
        diff,
    };

    let clients = if args.offline {
        info!("offline mode; outbound calls disabled");
        None
    } else {
        Some(build_clients(args)?)
    };
    let services = clients.as_ref().map(|(platform, http)| Services {
        platform,
        http,
    });

    let output = run_evaluation(input, services)?;
    let mut report = output.report;

    // The scan ran concurrently with recognition; collect it before writing artifacts.
    if let Some(job) = output.todo_job
        && let Some(items) = job.wait()
    {
        merge_todos(
            &mut report,
            &items,
            output.resolved_config.effective.max_findings,
        );
    }

    let renderable = to_renderable(&report);
    let md = render_markdown(&renderable);

    if args.post_summary {
        match services {
            Some(services) => {
                post_summary(services.platform, &report, &md);
            }
            None => info!("offline; summary comment not posted"),
        }
    }

    write_report_file(&args.report_out, &report).context("write report json")?;
    if args.write_markdown {
        write_text_file(&args.markdown_out, &md).context("write markdown")?;
    }

    for annotation in render_annotations(&renderable, args.max_annotations) {
        println!("{annotation}");
    }

    Ok(verdict_exit_code(report.verdict.status))
}

fn load_event(path: Option<&Utf8Path>) -> anyhow::Result<Option<PrMetadata>> {
    let Some(path) = path else {
        debug!("no event payload; running without PR metadata");
        return Ok(None);
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read event payload: {path}"))?;
    let pr = parse_event_json(&text).with_context(|| format!("event payload: {path}"))?;
    match &pr {
        Some(pr) => info!(pr = %pr.pr, author = %pr.author, merged = pr.merged, "loaded pull request"),
        None => info!("event carries no pull request"),
    }
    Ok(pr)
}

fn collect_changes(args: &CheckArgs, repo_root: &Utf8Path) -> anyhow::Result<ChangeSet> {
    if !args.changed_files.is_empty() {
        return Ok(ChangeSet::new(args.changed_files.iter()));
    }
    match (&args.base, &args.head) {
        (Some(base), Some(head)) => {
            let paths = git::changed_files(repo_root, base, head)
                .context("git diff --name-only failed")?;
            Ok(ChangeSet::new(paths.iter().map(|p| p.as_str())))
        }
        _ => {
            warn!("no --changed-file or --base/--head given; changed-file checks see no files");
            Ok(ChangeSet::default())
        }
    }
}

fn build_clients(args: &CheckArgs) -> anyhow::Result<(GithubClient, HttpClient)> {
    let timeout = Duration::from_secs(args.timeout_secs);
    let platform = GithubClient::new(&args.github_api_url, args.github_token.clone(), timeout)
        .context("build GitHub client")?;
    if !platform.has_token() {
        warn!("GITHUB_TOKEN is not set; comments cannot be posted");
    }
    let http = HttpClient::new(timeout).context("build HTTP client")?;
    Ok((platform, http))
}

fn write_report_file(path: &Utf8Path, report: &PrguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<PrguardReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {}", path))?;
    parse_report_json(&text)
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", prguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                prguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
