use crate::fingerprint::fingerprint_for_change;
use crate::model::ChangeSet;
use crate::policy::EffectiveConfig;
use prguard_types::{Finding, Location, ids};
use serde_json::json;

pub fn run(changes: &ChangeSet, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_ENV_DOCS_SYNC) else {
        return;
    };
    let files = &cfg.files;

    // Sentinels are tried in configured order; the first one that matches wins.
    let Some((sentinel, changed)) = files
        .env_sentinels
        .iter()
        .find_map(|s| changes.find_containing(s).map(|p| (s, p)))
    else {
        return;
    };
    if changes.contains_exact(&files.env_docs) {
        return;
    }

    out.push(Finding {
        severity: policy.severity,
        check_id: ids::CHECK_ENV_DOCS_SYNC.to_string(),
        code: ids::CODE_ENV_DOCS_NOT_UPDATED.to_string(),
        message: "Changes were made to the environment variables, but not to the documentation"
            .to_string(),
        location: Some(Location::path(changed.clone())),
        help: Some(
            "Please review your changes and check if a change needs to be documented!"
                .to_string(),
        ),
        url: None,
        fingerprint: Some(fingerprint_for_change(
            ids::CHECK_ENV_DOCS_SYNC,
            ids::CODE_ENV_DOCS_NOT_UPDATED,
            &[changed.as_str()],
        )),
        data: json!({
            "sentinel": sentinel,
            "changed": changed.as_str(),
            "docs": files.env_docs,
        }),
    });
}
