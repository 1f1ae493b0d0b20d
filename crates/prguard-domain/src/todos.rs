//! TODO/FIXME detection on lines added by a unified diff.

use crate::fingerprint::fingerprint_for_change;
use globset::{Glob, GlobSet, GlobSetBuilder};
use prguard_types::{Finding, Location, Note, RepoPath, Severity, ids};
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoItem {
    pub path: RepoPath,
    /// Line number in the new version of the file, when the hunk header was readable.
    pub line: Option<u32>,
    pub keyword: String,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct TodoScanOptions {
    keywords: Vec<String>,
    ignore: Option<GlobSet>,
}

impl Default for TodoScanOptions {
    fn default() -> Self {
        Self {
            keywords: vec!["TODO".to_string(), "FIXME".to_string()],
            ignore: None,
        }
    }
}

impl TodoScanOptions {
    pub fn new(keywords: Vec<String>, ignore: &[String]) -> Result<Self, globset::Error> {
        let ignore = if ignore.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in ignore {
                builder.add(Glob::new(pattern)?);
            }
            Some(builder.build()?)
        };
        Ok(Self { keywords, ignore })
    }

    fn is_ignored(&self, path: &RepoPath) -> bool {
        self.ignore
            .as_ref()
            .map(|set| set.is_match(path.as_str()))
            .unwrap_or(false)
    }
}

/// Scan the `+` lines of a unified diff (as printed by `git diff`).
pub fn scan_unified_diff(diff: &str, opts: &TodoScanOptions) -> Vec<TodoItem> {
    let mut items = Vec::new();
    let mut path: Option<RepoPath> = None;
    let mut in_hunk = false;
    let mut next_line: Option<u32> = None;

    for raw in diff.lines() {
        if raw.starts_with("diff --git ") {
            path = None;
            in_hunk = false;
            next_line = None;
            continue;
        }
        if !in_hunk {
            if let Some(target) = raw.strip_prefix("+++ ") {
                path = parse_target_path(target);
            }
            if raw.starts_with("@@") {
                in_hunk = true;
                next_line = parse_hunk_new_start(raw);
            }
            continue;
        }
        if raw.starts_with("@@") {
            next_line = parse_hunk_new_start(raw);
            continue;
        }

        if let Some(added) = raw.strip_prefix('+') {
            if let Some(p) = path.as_ref().filter(|p| !opts.is_ignored(p))
                && let Some(keyword) = find_marker(added, &opts.keywords)
            {
                items.push(TodoItem {
                    path: p.clone(),
                    line: next_line,
                    keyword: keyword.to_string(),
                    text: added.trim().to_string(),
                });
            }
            next_line = next_line.map(|n| n + 1);
        } else if raw.starts_with(' ') {
            next_line = next_line.map(|n| n + 1);
        }
        // '-' lines and "\ No newline at end of file" do not advance the new side.
    }

    items
}

fn parse_target_path(target: &str) -> Option<RepoPath> {
    let target = target.trim_end();
    if target == "/dev/null" {
        return None;
    }
    let target = target.strip_prefix("b/").unwrap_or(target);
    Some(RepoPath::new(target))
}

/// `@@ -a,b +c,d @@` -> `c`.
fn parse_hunk_new_start(header: &str) -> Option<u32> {
    let plus = header.split_whitespace().find(|t| t.starts_with('+'))?;
    let start = plus.trim_start_matches('+').split(',').next()?;
    start.parse().ok()
}

/// First keyword occurring as a whole word in `text`, by position.
fn find_marker<'k>(text: &str, keywords: &'k [String]) -> Option<&'k str> {
    keywords
        .iter()
        .filter_map(|k| find_word(text, k).map(|pos| (pos, k.as_str())))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, k)| k)
}

fn find_word(text: &str, word: &str) -> Option<usize> {
    if word.is_empty() {
        return None;
    }
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';
    let mut from = 0;
    while let Some(offset) = text[from..].find(word) {
        let start = from + offset;
        let end = start + word.len();
        let before_ok = text[..start].chars().next_back().is_none_or(|c| !is_word_char(c));
        let after_ok = text[end..].chars().next().is_none_or(|c| !is_word_char(c));
        if before_ok && after_ok {
            return Some(start);
        }
        from = end;
    }
    None
}

/// Markdown note listing every marker, or `None` when nothing was found.
pub fn todo_note(items: &[TodoItem]) -> Option<Note> {
    if items.is_empty() {
        return None;
    }
    let mut body = String::new();
    for item in items {
        body.push('\n');
        match item.line {
            Some(line) => body.push_str(&format!(
                "- `{}` in `{}` (line {})",
                item.text, item.path, line
            )),
            None => body.push_str(&format!("- `{}` in `{}`", item.text, item.path)),
        }
    }
    Some(Note {
        check_id: ids::CHECK_TODOS_SCAN.to_string(),
        title: "TODOs / FIXMEs".to_string(),
        body,
    })
}

/// One `info` finding per marker, so CI surfaces can annotate the line.
pub fn todo_findings(items: &[TodoItem]) -> Vec<Finding> {
    items
        .iter()
        .map(|item| Finding {
            severity: Severity::Info,
            check_id: ids::CHECK_TODOS_SCAN.to_string(),
            code: ids::CODE_TODO_MARKER.to_string(),
            message: format!("{} added: {}", item.keyword, item.text),
            location: Some(Location {
                path: item.path.clone(),
                line: item.line,
                col: None,
            }),
            help: None,
            url: None,
            fingerprint: Some(fingerprint_for_change(
                ids::CHECK_TODOS_SCAN,
                ids::CODE_TODO_MARKER,
                &[item.path.as_str(), item.text.as_str()],
            )),
            data: json!({ "keyword": item.keyword }),
        })
        .collect()
}
