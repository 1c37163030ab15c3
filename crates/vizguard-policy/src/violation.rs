//! Violation and result records for policy enforcement
//!
//! Every correction the engine applies produces exactly one
//! [`PolicyViolation`] carrying before/after snapshots, so operators can
//! audit what was changed and why. These are explicit tagged structures
//! rather than free-form maps: downstream consumers and tests assert on
//! exact shapes.

use serde::{Deserialize, Serialize};
use vizguard_core::{Aggregation, Component, FieldRecord, Role};

/// Severity of a policy correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Identifier of the policy rule that produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    NoChartIdentifiers,
    NoChartSurrogateKeys,
    MaxPieCardinality,
    MaxBarCategories,
    TimeseriesRequiresTimestamp,
    TimeseriesMinRows,
    SkipConstantFields,
    NoChartDetailShapes,
    SparseFieldGuard,
    NoChartRichText,
    MaxHeroStats,
}

impl RuleId {
    /// Wire spelling of the rule identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoChartIdentifiers => "no_chart_identifiers",
            Self::NoChartSurrogateKeys => "no_chart_surrogate_keys",
            Self::MaxPieCardinality => "max_pie_cardinality",
            Self::MaxBarCategories => "max_bar_categories",
            Self::TimeseriesRequiresTimestamp => "timeseries_requires_timestamp",
            Self::TimeseriesMinRows => "timeseries_min_rows",
            Self::SkipConstantFields => "skip_constant_fields",
            Self::NoChartDetailShapes => "no_chart_detail_shapes",
            Self::SparseFieldGuard => "sparse_field_guard",
            Self::NoChartRichText => "no_chart_rich_text",
            Self::MaxHeroStats => "max_hero_stats",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the mutable presentation state of a field, taken before and
/// after each correction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
    pub component: Component,
    pub role: Role,
    pub aggregation: Aggregation,
    pub skip: bool,
}

impl FieldSnapshot {
    /// Capture the current presentation state of a field
    pub fn of(field: &FieldRecord) -> Self {
        Self {
            component: field.component,
            role: field.role,
            aggregation: field.aggregation,
            skip: field.skip,
        }
    }
}

/// One audit record describing a single correction the engine applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyViolation {
    /// Name of the corrected field
    pub field: String,

    /// Rule that fired
    pub rule: RuleId,

    /// Severity of the correction
    pub severity: Severity,

    /// Human-readable description of what was done
    pub action: String,

    /// Presentation state when the field entered its rule pass
    pub before: FieldSnapshot,

    /// Presentation state at the moment this rule fired
    pub after: FieldSnapshot,
}

/// Complete output of a policy enforcement run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResult {
    /// Corrected field collection, same cardinality and identities as the
    /// input
    pub fields: Vec<FieldRecord>,

    /// Ordered audit trail, one record per correction
    pub violations: Vec<PolicyViolation>,

    /// Number of corrections applied
    pub auto_fix_count: usize,

    /// Engine version stamp, bumped whenever rule semantics change
    pub version: u32,

    /// Warnings emitted by the stats validator
    pub stats_warnings: Vec<String>,
}
