//! Use case orchestration for prguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, settings,
//! platform and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod evaluate;
mod event;
mod explain;
mod recognition;
mod render;
mod report;
mod todos;

#[cfg(test)]
mod fakes;

pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use evaluate::{EvaluationInput, EvaluationOutput, Services, post_summary, run_evaluation};
pub use event::parse_event_json;
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use recognition::run_recognition;
pub use render::{render_annotations, render_markdown};
pub use report::{
    merge_todos, parse_report_json, runtime_error_report, serialize_report, to_renderable,
};
pub use todos::{DiffLoader, TodoJob, schedule_todo_scan};
