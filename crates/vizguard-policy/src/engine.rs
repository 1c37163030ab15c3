//! Policy enforcement engine
//!
//! Composes the three passes in their fixed order: stats validation, the
//! per-field rule pipeline, then the cross-field hero constraint. The
//! engine is synchronous and stateless across calls; the only shared value
//! is the immutable default configuration, and every invocation works on
//! its own deep copy of the caller's fields.

use tracing::{debug, info};
use vizguard_core::FieldRecord;

use crate::config::{PolicyConfig, PolicyOverrides};
use crate::hero::enforce_hero_budget;
use crate::rules::FIELD_RULES;
use crate::stats::validate_stats;
use crate::violation::{FieldSnapshot, PolicyResult, PolicyViolation};

/// Fixed version stamp on every result. Bumped whenever rule semantics
/// change, so downstream consumers can detect behavior drift.
pub const POLICY_VERSION: u32 = 3;

/// Policy enforcement engine
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    config: PolicyConfig,
}

impl PolicyEngine {
    /// Create an engine with the default thresholds
    pub fn new() -> Self {
        Self {
            config: PolicyConfig::default(),
        }
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// The thresholds this engine enforces
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Validate statistics and apply the full rule set to a field
    /// collection.
    ///
    /// The caller's fields are never mutated; the result holds a corrected
    /// copy with the same cardinality and identities, plus the complete
    /// audit trail.
    pub fn enforce(&self, fields: &[FieldRecord]) -> PolicyResult {
        let (mut corrected, stats_warnings) = validate_stats(fields);
        let mut violations = Vec::new();

        for field in &mut corrected {
            // Fields skipped before the pass are excluded from rule
            // evaluation entirely
            if field.skip {
                continue;
            }

            let entry = FieldSnapshot::of(field);
            for rule in FIELD_RULES {
                if let Some(correction) = rule(field, &self.config, &entry) {
                    field.policy_actions.push(correction.token);
                    violations.push(PolicyViolation {
                        field: field.name.clone(),
                        rule: correction.rule,
                        severity: correction.severity,
                        action: correction.action,
                        before: entry.clone(),
                        after: FieldSnapshot::of(field),
                    });
                }
            }
        }

        enforce_hero_budget(&mut corrected, &self.config, &mut violations);

        for violation in &violations {
            debug!(
                field = %violation.field,
                rule = %violation.rule,
                severity = %violation.severity,
                "{}",
                violation.action
            );
        }
        info!(
            violations = violations.len(),
            version = POLICY_VERSION,
            "policy enforcement complete"
        );

        let auto_fix_count = violations.len();
        PolicyResult {
            fields: corrected,
            violations,
            auto_fix_count,
            version: POLICY_VERSION,
            stats_warnings,
        }
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined stats-validation and policy-enforcement entry point.
///
/// Unspecified thresholds fall back to the documented defaults; the shared
/// defaults are merged into a fresh configuration per call.
pub fn enforce(fields: &[FieldRecord], overrides: Option<PolicyOverrides>) -> PolicyResult {
    let config = match overrides {
        Some(ref overrides) => PolicyConfig::default().merged(overrides),
        None => PolicyConfig::default(),
    };
    PolicyEngine::with_config(config).enforce(fields)
}
