//! Core field-record types for Vizguard
//!
//! A [`FieldRecord`] is one analyzed data column or attribute flowing through
//! the dashboard pipeline: the upstream classifier assigns an initial
//! component/role/aggregation guess, the policy engine corrects it, and the
//! renderer consumes the result. Field names serialize in camelCase because
//! the records cross a process boundary from the JavaScript backend.
//!
//! The shape, aggregation, and role vocabularies grow upstream faster than
//! this engine ships, so those enums parse unknown spellings into a
//! catch-all variant instead of failing the whole payload.

use serde::{Deserialize, Serialize};

/// Semantic content tag assigned by the upstream classifier.
///
/// Immutable to the policy engine — rules read the shape, never rewrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldShape {
    Id,
    Label,
    Status,
    Timestamp,
    LongText,
    HighCardinalityText,
    RichText,
    Numeric,
    Money,
    Duration,
    Percent,
    /// Shapes introduced upstream that this engine does not know yet
    Other,
}

impl FieldShape {
    /// Wire spelling of the shape tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Label => "label",
            Self::Status => "status",
            Self::Timestamp => "timestamp",
            Self::LongText => "long_text",
            Self::HighCardinalityText => "high_cardinality_text",
            Self::RichText => "rich_text",
            Self::Numeric => "numeric",
            Self::Money => "money",
            Self::Duration => "duration",
            Self::Percent => "percent",
            Self::Other => "other",
        }
    }
}

impl From<String> for FieldShape {
    fn from(s: String) -> Self {
        match s.as_str() {
            "id" => Self::Id,
            "label" => Self::Label,
            "status" => Self::Status,
            "timestamp" => Self::Timestamp,
            "long_text" => Self::LongText,
            "high_cardinality_text" => Self::HighCardinalityText,
            "rich_text" => Self::RichText,
            "numeric" => Self::Numeric,
            "money" => Self::Money,
            "duration" => Self::Duration,
            "percent" => Self::Percent,
            _ => Self::Other,
        }
    }
}

impl From<FieldShape> for String {
    fn from(shape: FieldShape) -> String {
        shape.as_str().to_string()
    }
}

/// Visualization widget assigned to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    MetricCard,
    PieChart,
    BarChart,
    TimeseriesChart,
    LineChart,
    AreaChart,
    DonutChart,
    DataTable,
    ContentCard,
}

impl Component {
    /// True for the six chart-family widgets that plot values, as opposed
    /// to tabular or single-value widgets.
    pub fn is_chart(&self) -> bool {
        matches!(
            self,
            Self::PieChart
                | Self::BarChart
                | Self::TimeseriesChart
                | Self::LineChart
                | Self::AreaChart
                | Self::DonutChart
        )
    }
}

/// How a field's values are summarized for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Aggregation {
    Count,
    CountPerCategory,
    Percentage,
    Avg,
    Sum,
    Min,
    Max,
    CountOverTime,
    None,
    /// Aggregations introduced upstream that this engine does not know yet
    Other,
}

impl Aggregation {
    /// Wire spelling of the aggregation tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::CountPerCategory => "count_per_category",
            Self::Percentage => "percentage",
            Self::Avg => "avg",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::CountOverTime => "count_over_time",
            Self::None => "none",
            Self::Other => "other",
        }
    }
}

impl From<String> for Aggregation {
    fn from(s: String) -> Self {
        match s.as_str() {
            "count" => Self::Count,
            "count_per_category" => Self::CountPerCategory,
            "percentage" => Self::Percentage,
            "avg" => Self::Avg,
            "sum" => Self::Sum,
            "min" => Self::Min,
            "max" => Self::Max,
            "count_over_time" => Self::CountOverTime,
            "none" => Self::None,
            _ => Self::Other,
        }
    }
}

impl From<Aggregation> for String {
    fn from(aggregation: Aggregation) -> String {
        aggregation.as_str().to_string()
    }
}

/// Presentation tier controlling progressive-reveal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Hero,
    Trend,
    Breakdown,
    Supporting,
    Detail,
    /// Roles introduced upstream that this engine does not know yet
    Unknown,
}

impl Role {
    /// Fixed reveal rank: heroes first, details last, unrecognized roles
    /// after everything else.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Hero => 0,
            Self::Trend => 1,
            Self::Breakdown => 2,
            Self::Supporting => 3,
            Self::Detail => 4,
            Self::Unknown => 99,
        }
    }

    /// Wire spelling of the role tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Trend => "trend",
            Self::Breakdown => "breakdown",
            Self::Supporting => "supporting",
            Self::Detail => "detail",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "hero" => Self::Hero,
            "trend" => Self::Trend,
            "breakdown" => Self::Breakdown,
            "supporting" => Self::Supporting,
            "detail" => Self::Detail,
            _ => Self::Unknown,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> String {
        role.as_str().to_string()
    }
}

/// Provenance of a field's current classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticSource {
    /// Automatic classifier guess
    Heuristic,
    /// Explicit platform-specific override rule
    SkillOverride,
}

/// Metadata from an upstream override rule applied to a field.
///
/// Consulted by the surrogate-key policy rule, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedRule {
    /// Semantic type the override assigned (e.g. `surrogate_key`)
    pub semantic_type: String,

    /// Why the override fired
    pub reason: String,

    /// Version of the override rule set
    pub version: String,
}

/// One analyzed data column/attribute prepared for visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Identifier, unique within a collection
    pub name: String,

    /// Semantic content tag from the classifier
    pub shape: FieldShape,

    /// Visualization widget currently assigned
    pub component: Component,

    /// How values are summarized
    pub aggregation: Aggregation,

    /// Presentation tier
    pub role: Role,

    /// Observed distinct-value count. Signed so corrupt upstream counts are
    /// representable before validation.
    #[serde(default)]
    pub unique_values: i64,

    /// Observed total row count
    #[serde(default)]
    pub total_rows: i64,

    /// Whether the column admits nulls
    #[serde(default)]
    pub nullable: bool,

    /// Observed null fraction (0.0-1.0), if sampled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_rate: Option<f64>,

    /// Upstream sparsity flag, if computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse_field: Option<bool>,

    /// Excluded from visualization entirely
    #[serde(default)]
    pub skip: bool,

    /// Human-readable explanation, set whenever `skip` becomes true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,

    /// Provenance of the current classification
    pub semantic_source: SemanticSource,

    /// Upstream override metadata, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_rule: Option<AppliedRule>,

    /// Append-only audit tokens, one per correction applied
    #[serde(default)]
    pub policy_actions: Vec<String>,
}

impl FieldRecord {
    /// Create a new field record with the given classification and no
    /// observed statistics.
    pub fn new(
        name: impl Into<String>,
        shape: FieldShape,
        component: Component,
        aggregation: Aggregation,
        role: Role,
    ) -> Self {
        Self {
            name: name.into(),
            shape,
            component,
            aggregation,
            role,
            unique_values: 0,
            total_rows: 0,
            nullable: false,
            null_rate: None,
            sparse_field: None,
            skip: false,
            skip_reason: None,
            semantic_source: SemanticSource::Heuristic,
            applied_rule: None,
            policy_actions: Vec::new(),
        }
    }

    /// Set observed cardinality statistics
    pub fn with_stats(mut self, unique_values: i64, total_rows: i64) -> Self {
        self.unique_values = unique_values;
        self.total_rows = total_rows;
        self
    }

    /// Set the classification provenance
    pub fn with_source(mut self, source: SemanticSource) -> Self {
        self.semantic_source = source;
        self
    }

    /// Attach upstream override metadata
    pub fn with_applied_rule(mut self, rule: AppliedRule) -> Self {
        self.applied_rule = Some(rule);
        self
    }

    /// Set sparsity signals
    pub fn with_sparsity(mut self, null_rate: f64, sparse_field: bool) -> Self {
        self.nullable = true;
        self.null_rate = Some(null_rate);
        self.sparse_field = Some(sparse_field);
        self
    }

    /// Mark this field skipped with an explanation
    pub fn mark_skipped(&mut self, reason: impl Into<String>) {
        self.skip = true;
        self.skip_reason = Some(reason.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_family_membership() {
        assert!(Component::PieChart.is_chart());
        assert!(Component::TimeseriesChart.is_chart());
        assert!(Component::DonutChart.is_chart());
        assert!(!Component::MetricCard.is_chart());
        assert!(!Component::DataTable.is_chart());
        assert!(!Component::ContentCard.is_chart());
    }

    #[test]
    fn test_role_ranks() {
        assert_eq!(Role::Hero.rank(), 0);
        assert_eq!(Role::Trend.rank(), 1);
        assert_eq!(Role::Breakdown.rank(), 2);
        assert_eq!(Role::Supporting.rank(), 3);
        assert_eq!(Role::Detail.rank(), 4);
        assert_eq!(Role::Unknown.rank(), 99);
    }

    #[test]
    fn test_field_record_camel_case_wire_format() {
        let field = FieldRecord::new(
            "created_at",
            FieldShape::Timestamp,
            Component::TimeseriesChart,
            Aggregation::CountOverTime,
            Role::Trend,
        )
        .with_stats(40, 120);

        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"uniqueValues\":40"));
        assert!(json.contains("\"totalRows\":120"));
        assert!(json.contains("\"semanticSource\":\"heuristic\""));
        assert!(json.contains("\"component\":\"TimeseriesChart\""));
        assert!(json.contains("\"aggregation\":\"count_over_time\""));
        assert!(json.contains("\"shape\":\"timestamp\""));

        let back: FieldRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_unknown_upstream_vocabulary_degrades() {
        let json = r#"{
            "name": "custom",
            "shape": "geo_point",
            "component": "BarChart",
            "aggregation": "p95",
            "role": "spotlight",
            "uniqueValues": 3,
            "totalRows": 10,
            "semanticSource": "heuristic"
        }"#;

        let field: FieldRecord = serde_json::from_str(json).unwrap();
        assert_eq!(field.shape, FieldShape::Other);
        assert_eq!(field.aggregation, Aggregation::Other);
        assert_eq!(field.role, Role::Unknown);
    }

    #[test]
    fn test_applied_rule_wire_format() {
        let json = r#"{
            "name": "order_id",
            "shape": "id",
            "component": "PieChart",
            "aggregation": "count_per_category",
            "role": "breakdown",
            "semanticSource": "skill_override",
            "appliedRule": {
                "semanticType": "surrogate_key",
                "reason": "matches platform id convention",
                "version": "2024.11"
            }
        }"#;

        let field: FieldRecord = serde_json::from_str(json).unwrap();
        let rule = field.applied_rule.expect("appliedRule should parse");
        assert_eq!(rule.semantic_type, "surrogate_key");
        assert_eq!(field.semantic_source, SemanticSource::SkillOverride);
    }
}
