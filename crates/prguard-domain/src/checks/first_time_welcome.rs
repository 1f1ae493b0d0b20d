use crate::model::PrMetadata;
use crate::policy::EffectiveConfig;
use prguard_types::{Note, ids};

pub fn run(pr: Option<&PrMetadata>, cfg: &EffectiveConfig, out: &mut Vec<Note>) {
    if cfg
        .check_policy(ids::CHECK_COMMUNITY_FIRST_TIME_WELCOME)
        .is_none()
    {
        return;
    }
    let Some(pr) = pr else { return };
    if !pr.association.is_welcomed() {
        return;
    }

    out.push(Note {
        check_id: ids::CHECK_COMMUNITY_FIRST_TIME_WELCOME.to_string(),
        title: "Welcome!".to_string(),
        body: format!(
            "\nHello there, congrats on your first PR! We're excited to have you contributing to this project.\n\
             By submitting your Pull Request, you acknowledge that you agree with the terms of our \
             [Contributor License Agreement]({}).",
            cfg.welcome.cla_url
        ),
    });
}
