//! Pure policy evaluation (no IO).
//!
//! Input: a change set and optional PR metadata, constructed elsewhere.
//! Output: findings + notes + verdict + summary data, plus the pure pieces of the
//! merge recognition and TODO flows (message composition, diff scanning).

#![forbid(unsafe_code)]

pub mod checks;
pub mod fingerprint;
pub mod model;
pub mod ordinal;
pub mod policy;
pub mod recognition;
pub mod report;
pub mod todos;

mod engine;

#[cfg(test)]
mod properties;
#[cfg(test)]
pub(crate) mod test_support;

pub use engine::evaluate;
pub use ordinal::ordinal;
