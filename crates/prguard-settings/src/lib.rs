//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{
    CheckConfig, FilesConfig, PrguardConfigV1, RecognitionConfig, TodosConfig, WelcomeConfig,
};
pub use resolve::{Overrides, RecognitionSettings, ResolvedConfig, TodoSettings};

/// Parse `prguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PrguardConfigV1> {
    let cfg: PrguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profiles + overrides + per-check config).
pub fn resolve_config(
    cfg: PrguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
