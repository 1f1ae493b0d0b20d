use crate::model::PrContext;
use crate::policy::EffectiveConfig;
use prguard_types::{Finding, Note};

mod env_docs;
mod first_time_welcome;
mod lockfile_sync;


pub fn run_all(
    ctx: &PrContext,
    cfg: &EffectiveConfig,
    findings: &mut Vec<Finding>,
    notes: &mut Vec<Note>,
) {
    lockfile_sync::run(&ctx.changes, cfg, findings);
    env_docs::run(&ctx.changes, cfg, findings);
    first_time_welcome::run(ctx.pr.as_ref(), cfg, notes);
}
