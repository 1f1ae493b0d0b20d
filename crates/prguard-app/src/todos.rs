//! Background TODO/FIXME scan.
//!
//! The scan runs on its own thread so the policy checks and the merge recognition flow never
//! wait on it. The caller decides whether to join it before exiting.

use anyhow::Context;
use prguard_domain::todos::{TodoItem, TodoScanOptions, scan_unified_diff};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Produces the unified diff to scan. Runs on the scan thread.
pub type DiffLoader = Box<dyn FnOnce() -> anyhow::Result<String> + Send + 'static>;

/// Handle to a scan started with [`schedule_todo_scan`].
#[derive(Debug)]
pub struct TodoJob {
    handle: JoinHandle<anyhow::Result<Vec<TodoItem>>>,
}

pub fn schedule_todo_scan(load_diff: DiffLoader, options: TodoScanOptions) -> anyhow::Result<TodoJob> {
    let handle = thread::Builder::new()
        .name("prguard-todos".to_string())
        .spawn(move || {
            let diff = load_diff().context("load diff for todo scan")?;
            let items = scan_unified_diff(&diff, &options);
            debug!(found = items.len(), "todo scan finished");
            Ok(items)
        })
        .context("spawn todo scan thread")?;

    Ok(TodoJob { handle })
}

impl TodoJob {
    /// Block until the scan completes. A failed scan is logged and yields `None`.
    pub fn wait(self) -> Option<Vec<TodoItem>> {
        match self.handle.join() {
            Ok(Ok(items)) => Some(items),
            Ok(Err(err)) => {
                warn!(error = %format!("{err:#}"), "todo scan failed");
                None
            }
            Err(_) => {
                warn!("todo scan thread panicked");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "\
diff --git a/src/app.ts b/src/app.ts
--- a/src/app.ts
+++ b/src/app.ts
@@ -1,2 +1,3 @@
 const a = 1;
+// TODO: handle retries
 const b = 2;
";

    #[test]
    fn scan_runs_on_background_thread() {
        let job = schedule_todo_scan(
            Box::new(|| Ok(DIFF.to_string())),
            TodoScanOptions::default(),
        )
        .expect("spawn");

        let items = job.wait().expect("scan succeeds");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].path.as_str(), "src/app.ts");
        assert_eq!(items[0].line, Some(2));
    }

    #[test]
    fn loader_failure_yields_none() {
        let job = schedule_todo_scan(
            Box::new(|| anyhow::bail!("git not available")),
            TodoScanOptions::default(),
        )
        .expect("spawn");

        assert!(job.wait().is_none());
    }
}
