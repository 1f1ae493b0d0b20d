//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_DEPS_LOCKFILE_SYNC: &str = "deps.lockfile_sync";
pub const CHECK_ENV_DOCS_SYNC: &str = "env.docs_sync";
pub const CHECK_COMMUNITY_FIRST_TIME_WELCOME: &str = "community.first_time_welcome";
pub const CHECK_COMMUNITY_MERGE_RECOGNITION: &str = "community.merge_recognition";
pub const CHECK_TODOS_SCAN: &str = "todos.scan";

// Codes: deps.lockfile_sync
pub const CODE_LOCKFILE_NOT_UPDATED: &str = "lockfile_not_updated";

// Codes: env.docs_sync
pub const CODE_ENV_DOCS_NOT_UPDATED: &str = "env_docs_not_updated";

// Codes: community.first_time_welcome
pub const CODE_FIRST_TIME_CONTRIBUTOR: &str = "first_time_contributor";

// Codes: todos.scan
pub const CODE_TODO_MARKER: &str = "todo_marker";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
