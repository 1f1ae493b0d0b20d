//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to resolve a finding.
    pub remediation: &'static str,
    /// Before/after change sets.
    pub examples: ExamplePair,
}

/// Before and after examples, written as changed-file listings.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Change set that would trigger the check.
    pub before: &'static str,
    /// Change set that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_DEPS_LOCKFILE_SYNC => Some(explain_lockfile_sync()),
        ids::CHECK_ENV_DOCS_SYNC => Some(explain_env_docs_sync()),
        ids::CHECK_COMMUNITY_FIRST_TIME_WELCOME => Some(explain_first_time_welcome()),
        ids::CHECK_COMMUNITY_MERGE_RECOGNITION => Some(explain_merge_recognition()),
        ids::CHECK_TODOS_SCAN => Some(explain_todos_scan()),

        // Codes
        ids::CODE_LOCKFILE_NOT_UPDATED => Some(explain_lockfile_not_updated()),
        ids::CODE_ENV_DOCS_NOT_UPDATED => Some(explain_env_docs_not_updated()),
        ids::CODE_FIRST_TIME_CONTRIBUTOR => Some(explain_first_time_contributor()),
        ids::CODE_TODO_MARKER => Some(explain_todo_marker()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_DEPS_LOCKFILE_SYNC,
        ids::CHECK_ENV_DOCS_SYNC,
        ids::CHECK_COMMUNITY_FIRST_TIME_WELCOME,
        ids::CHECK_COMMUNITY_MERGE_RECOGNITION,
        ids::CHECK_TODOS_SCAN,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_LOCKFILE_NOT_UPDATED,
        ids::CODE_ENV_DOCS_NOT_UPDATED,
        ids::CODE_FIRST_TIME_CONTRIBUTOR,
        ids::CODE_TODO_MARKER,
    ]
}

// --- Check-level explanations ---

fn explain_lockfile_sync() -> Explanation {
    Explanation {
        title: "Lockfile Kept In Sync",
        description: "\
Warns when a pull request changes a package manifest (`package.json` by default)
without touching the lockfile (`yarn.lock` by default).

A manifest edit that is not reflected in the lockfile usually means:
- the install step was skipped after editing dependencies
- CI resolves different versions than the author tested with

Paths are matched by substring, so `packages/app/package.json` counts as a
manifest change. The warning is advisory and never blocks the PR unless
`fail_on = \"warning\"` is configured.",
        remediation: "\
Run the package manager install step and commit the regenerated lockfile:

    yarn install
    git add yarn.lock",
        examples: ExamplePair {
            before: "packages/app/package.json",
            after: "packages/app/package.json\nyarn.lock",
        },
    }
}

fn explain_env_docs_sync() -> Explanation {
    Explanation {
        title: "Environment Variables Documented",
        description: "\
Warns when a pull request touches environment configuration (`.env.example` or
`environment.service.ts` by default) but not the self-hosting documentation
(`self-hosting.mdx` by default).

Environment sentinels are matched by substring. The documentation file must be
listed with exactly the configured path.",
        remediation: "\
Review the changed variables and document additions, removals and renamed
variables in the self-hosting guide.",
        examples: ExamplePair {
            before: "packages/server/.env.example",
            after: "packages/server/.env.example\nself-hosting.mdx",
        },
    }
}

fn explain_first_time_welcome() -> Explanation {
    Explanation {
        title: "First-Time Contributor Welcome",
        description: "\
Posts a welcome note when the PR author's association with the repository is
`FIRST_TIME_CONTRIBUTOR` or `NONE`. The note links the Contributor License
Agreement.

The note is emitted on every evaluation of a matching event; configure the CI
trigger if it should fire only once per PR.",
        remediation: "\
Nothing to fix. Disable the check in prguard.toml to suppress the note:

    [checks.\"community.first_time_welcome\"]
    enabled = false",
        examples: ExamplePair {
            before: "author_association = FIRST_TIME_CONTRIBUTOR",
            after: "author_association = CONTRIBUTOR",
        },
    }
}

fn explain_merge_recognition() -> Explanation {
    Explanation {
        title: "Merge Contributor Recognition",
        description: "\
When a PR is merged, comments on it with the author's merged PR count and
percentile rank, links to the contributor page and share links.

The flow is best-effort: search, stats, image and comment failures are logged
and never fail the CI job.",
        remediation: "\
Nothing to fix. Disable the flow in prguard.toml:

    [recognition]
    enabled = false",
        examples: ExamplePair {
            before: "merged = true",
            after: "merged = true (comment posted)",
        },
    }
}

fn explain_todos_scan() -> Explanation {
    Explanation {
        title: "TODO / FIXME Markers",
        description: "\
Lists TODO and FIXME markers on lines added by the pull request. The scan runs
as a background job and reports independently of the other checks.",
        remediation: "\
Resolve the marker before merging, or link it to a tracked issue.",
        examples: ExamplePair {
            before: "+ // TODO: handle the empty case",
            after: "+ // Empty input is rejected by the caller.",
        },
    }
}

// --- Code-level explanations ---

fn explain_lockfile_not_updated() -> Explanation {
    let mut exp = explain_lockfile_sync();
    exp.title = "Lockfile Not Updated";
    exp
}

fn explain_env_docs_not_updated() -> Explanation {
    let mut exp = explain_env_docs_sync();
    exp.title = "Environment Documentation Not Updated";
    exp
}

fn explain_first_time_contributor() -> Explanation {
    let mut exp = explain_first_time_welcome();
    exp.title = "First-Time Contributor";
    exp
}

fn explain_todo_marker() -> Explanation {
    let mut exp = explain_todos_scan();
    exp.title = "TODO Marker Added";
    exp
}
