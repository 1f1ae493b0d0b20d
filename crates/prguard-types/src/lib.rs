//! Stable DTOs and IDs used across the prguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs and codes
//! - canonical repo-relative path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::RepoPath;
pub use receipt::{
    Finding, Location, Note, PrguardData, PrguardReport, RecognitionReceipt, RecognitionStatus,
    RunMeta, RunPr, SCHEMA_REPORT_V1, Severity, ToolMeta, Verdict, VerdictCounts, VerdictStatus,
};
