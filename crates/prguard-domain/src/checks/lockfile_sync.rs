use crate::fingerprint::fingerprint_for_change;
use crate::model::ChangeSet;
use crate::policy::EffectiveConfig;
use prguard_types::{Finding, Location, ids};
use serde_json::json;

pub fn run(changes: &ChangeSet, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_DEPS_LOCKFILE_SYNC) else {
        return;
    };
    let files = &cfg.files;

    let Some(manifest) = changes.find_containing(&files.manifest) else {
        return;
    };
    if changes.find_containing(&files.lockfile).is_some() {
        return;
    }

    out.push(Finding {
        severity: policy.severity,
        check_id: ids::CHECK_DEPS_LOCKFILE_SYNC.to_string(),
        code: ids::CODE_LOCKFILE_NOT_UPDATED.to_string(),
        message: format!(
            "Changes were made to {}, but not to {}",
            files.manifest, files.lockfile
        ),
        location: Some(Location::path(manifest.clone())),
        help: Some(format!("Perhaps you need to run `{}`?", files.install_hint)),
        url: None,
        fingerprint: Some(fingerprint_for_change(
            ids::CHECK_DEPS_LOCKFILE_SYNC,
            ids::CODE_LOCKFILE_NOT_UPDATED,
            &[manifest.as_str()],
        )),
        data: json!({
            "manifest": manifest.as_str(),
            "lockfile": files.lockfile,
        }),
    });
}
