//! Vizguard Policy Engine
//!
//! Deterministic, versioned policy enforcement for dashboard field
//! collections. Sits between the upstream semantic classifier and the
//! renderer, correcting unsafe or low-quality visualization choices before
//! anything is drawn.
//!
//! Three components, consumed in strict order:
//! - Stats validation (sanitizes cardinality statistics)
//! - Policy rules (ordered per-field pass, then the cross-field hero
//!   constraint), producing a corrected collection plus an audit trail
//! - Story sequencing (orders fields for progressive reveal)

pub mod config;
pub mod engine;
pub mod hero;
pub mod rules;
pub mod stats;
pub mod story;
pub mod violation;

pub use config::{PolicyConfig, PolicyOverrides};
pub use engine::{enforce, PolicyEngine, POLICY_VERSION};
pub use rules::CONSTANT_SKIP_REASON;
pub use stats::{validate_stats, STATS_INVALID_REASON, STATS_INVALID_SKIP};
pub use story::order;
pub use violation::{FieldSnapshot, PolicyResult, PolicyViolation, RuleId, Severity};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{PolicyConfig, PolicyOverrides};
    pub use crate::engine::{enforce, PolicyEngine, POLICY_VERSION};
    pub use crate::story::order;
    pub use crate::violation::{FieldSnapshot, PolicyResult, PolicyViolation, RuleId, Severity};
}
