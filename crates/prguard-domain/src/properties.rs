//! Property tests for the changed-file checks and ordinal formatting.

use crate::checks;
use crate::model::{ChangeSet, PrContext};
use crate::ordinal::{ordinal, ordinal_suffix};
use crate::test_support::default_config;
use prguard_types::ids;
use proptest::prelude::*;

fn neutral_path() -> impl Strategy<Value = String> {
    // Lowercase segments without dots cannot contain any default sentinel.
    prop::collection::vec("[a-z]{1,8}", 1..4).prop_map(|segs| segs.join("/"))
}

fn count(findings: &[prguard_types::Finding], check_id: &str) -> usize {
    findings.iter().filter(|f| f.check_id == check_id).count()
}

fn run(paths: Vec<String>) -> Vec<prguard_types::Finding> {
    let ctx = PrContext {
        changes: ChangeSet::new(paths),
        pr: None,
    };
    let mut findings = Vec::new();
    let mut notes = Vec::new();
    checks::run_all(&ctx, &default_config(), &mut findings, &mut notes);
    findings
}

proptest! {
    #[test]
    fn manifest_without_lockfile_warns_exactly_once(
        mut paths in prop::collection::vec(neutral_path(), 0..6),
        manifests in 1usize..4,
        prefix in neutral_path(),
    ) {
        for i in 0..manifests {
            paths.push(format!("{prefix}/{i}/package.json"));
        }
        let findings = run(paths);
        prop_assert_eq!(count(&findings, ids::CHECK_DEPS_LOCKFILE_SYNC), 1);
        prop_assert_eq!(count(&findings, ids::CHECK_ENV_DOCS_SYNC), 0);
    }

    #[test]
    fn manifest_with_lockfile_or_neither_is_silent(
        mut paths in prop::collection::vec(neutral_path(), 0..6),
        with_both in any::<bool>(),
    ) {
        if with_both {
            paths.push("package.json".to_string());
            paths.push("yarn.lock".to_string());
        }
        let findings = run(paths);
        prop_assert_eq!(count(&findings, ids::CHECK_DEPS_LOCKFILE_SYNC), 0);
    }

    #[test]
    fn env_change_warns_unless_docs_listed(
        mut paths in prop::collection::vec(neutral_path(), 0..6),
        use_service in any::<bool>(),
        docs in any::<bool>(),
    ) {
        paths.push(if use_service {
            "src/environment.service.ts".to_string()
        } else {
            "server/.env.example".to_string()
        });
        if docs {
            paths.push("self-hosting.mdx".to_string());
        }
        let findings = run(paths);
        prop_assert_eq!(count(&findings, ids::CHECK_ENV_DOCS_SYNC), usize::from(!docs));
    }

    #[test]
    fn teens_always_take_th(n in 0u64..1_000_000) {
        let teen = n * 100 + 11 + (n % 3);
        prop_assert_eq!(ordinal_suffix(teen), "th");
    }

    #[test]
    fn ordinal_starts_with_number(n in any::<u32>()) {
        let s = ordinal(u64::from(n));
        prop_assert!(s.starts_with(&n.to_string()));
        prop_assert_eq!(s.len(), n.to_string().len() + 2);
    }
}
