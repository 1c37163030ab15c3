//! Per-field policy rules
//!
//! The rule set is an ordered pipeline of pure transforms applied via
//! left-fold over each field. Order is part of the observable contract:
//! each rule inspects the field's current state, so a rule can see
//! corrections made by an earlier rule in the same pass. Reordering changes
//! behavior (a pie chart downgraded to a bar chart by the pie-cardinality
//! rule is then subject to the bar-cardinality ceiling).

use vizguard_core::{Aggregation, Component, FieldRecord, FieldShape, Role};

use crate::config::PolicyConfig;
use crate::violation::{FieldSnapshot, RuleId, Severity};

/// Reason recorded on fields skipped for carrying a single constant value
pub const CONSTANT_SKIP_REASON: &str = "constant value, nothing to visualize";

/// Semantic type tag upstream overrides use for surrogate keys
const SURROGATE_KEY: &str = "surrogate_key";

/// A correction produced by a single rule firing on a single field
#[derive(Debug, Clone)]
pub(crate) struct Correction {
    /// Rule that fired
    pub rule: RuleId,

    /// Severity of the correction
    pub severity: Severity,

    /// Human-readable description for the audit trail
    pub action: String,

    /// Short token appended to the field's `policy_actions`
    pub token: String,
}

/// A rule transform. The snapshot argument is the state the field entered
/// the pass with; violations reuse it as their `before`, and the
/// surrogate-key rule consults it so an identifier fix by the previous rule
/// does not hide a surrogate key from the audit trail.
pub(crate) type FieldRule =
    fn(&mut FieldRecord, &PolicyConfig, &FieldSnapshot) -> Option<Correction>;

/// The per-field rule set, in enforcement order.
pub(crate) const FIELD_RULES: &[FieldRule] = &[
    no_chart_identifiers,
    no_chart_surrogate_keys,
    max_pie_cardinality,
    max_bar_categories,
    timeseries_shape_and_density,
    skip_constant_fields,
    no_chart_detail_shapes,
    sparse_field_guard,
    no_chart_rich_text,
];

/// Identifier fields carry no distribution worth plotting.
fn no_chart_identifiers(
    field: &mut FieldRecord,
    _config: &PolicyConfig,
    _entry: &FieldSnapshot,
) -> Option<Correction> {
    if field.shape != FieldShape::Id || !field.component.is_chart() {
        return None;
    }

    field.component = Component::MetricCard;
    field.aggregation = Aggregation::Count;

    Some(Correction {
        rule: RuleId::NoChartIdentifiers,
        severity: Severity::Error,
        action: "identifier field cannot be charted, forced to MetricCard with count".to_string(),
        token: "id_chart_blocked→MetricCard".to_string(),
    })
}

/// Fields an upstream override tagged as surrogate keys are identifiers in
/// disguise, whatever their shape says.
fn no_chart_surrogate_keys(
    field: &mut FieldRecord,
    _config: &PolicyConfig,
    entry: &FieldSnapshot,
) -> Option<Correction> {
    let tagged = field
        .applied_rule
        .as_ref()
        .is_some_and(|rule| rule.semantic_type == SURROGATE_KEY);
    if !tagged || !entry.component.is_chart() {
        return None;
    }

    field.component = Component::MetricCard;
    field.aggregation = Aggregation::Count;

    Some(Correction {
        rule: RuleId::NoChartSurrogateKeys,
        severity: Severity::Error,
        action: "surrogate key cannot be charted, forced to MetricCard with count".to_string(),
        token: "surrogate_key_chart_blocked→MetricCard".to_string(),
    })
}

/// Pie charts become unreadable past a handful of slices. Moderate overflow
/// downgrades to a bar chart; past the bar ceiling the field goes straight
/// to a table.
fn max_pie_cardinality(
    field: &mut FieldRecord,
    config: &PolicyConfig,
    _entry: &FieldSnapshot,
) -> Option<Correction> {
    if field.component != Component::PieChart || field.unique_values <= config.max_pie_cardinality {
        return None;
    }

    if field.unique_values > config.max_bar_categories {
        field.component = Component::DataTable;
        field.aggregation = Aggregation::None;
        field.role = Role::Detail;

        Some(Correction {
            rule: RuleId::MaxPieCardinality,
            severity: Severity::Warning,
            action: format!(
                "{} categories exceed even the bar ceiling of {}, downgraded to DataTable",
                field.unique_values, config.max_bar_categories
            ),
            token: format!(
                "pie_overflow→DataTable({}>{})",
                field.unique_values, config.max_bar_categories
            ),
        })
    } else {
        field.component = Component::BarChart;

        Some(Correction {
            rule: RuleId::MaxPieCardinality,
            severity: Severity::Warning,
            action: format!(
                "{} categories exceed the pie ceiling of {}, downgraded to BarChart",
                field.unique_values, config.max_pie_cardinality
            ),
            token: format!(
                "pie_overflow→BarChart({}>{})",
                field.unique_values, config.max_pie_cardinality
            ),
        })
    }
}

/// Bar charts have a ceiling too. This also catches pies the previous rule
/// just downgraded.
fn max_bar_categories(
    field: &mut FieldRecord,
    config: &PolicyConfig,
    _entry: &FieldSnapshot,
) -> Option<Correction> {
    if field.component != Component::BarChart || field.unique_values <= config.max_bar_categories {
        return None;
    }

    field.component = Component::DataTable;
    field.aggregation = Aggregation::None;
    field.role = Role::Detail;

    Some(Correction {
        rule: RuleId::MaxBarCategories,
        severity: Severity::Warning,
        action: format!(
            "{} categories exceed the bar ceiling of {}, downgraded to DataTable",
            field.unique_values, config.max_bar_categories
        ),
        token: format!(
            "bar_overflow→DataTable({}>{})",
            field.unique_values, config.max_bar_categories
        ),
    })
}

/// A timeseries needs a timestamp shape and enough distinct time points to
/// show a trend. Only one branch can fire per field.
fn timeseries_shape_and_density(
    field: &mut FieldRecord,
    config: &PolicyConfig,
    _entry: &FieldSnapshot,
) -> Option<Correction> {
    if field.component != Component::TimeseriesChart {
        return None;
    }

    if field.shape != FieldShape::Timestamp {
        field.component = Component::BarChart;

        return Some(Correction {
            rule: RuleId::TimeseriesRequiresTimestamp,
            severity: Severity::Error,
            action: "timeseries assigned to a non-timestamp field, downgraded to BarChart"
                .to_string(),
            token: "timeseries_wrong_shape→BarChart".to_string(),
        });
    }

    if field.unique_values < config.min_rows_for_trends {
        field.component = Component::MetricCard;
        field.aggregation = Aggregation::Count;
        field.role = Role::Supporting;

        return Some(Correction {
            rule: RuleId::TimeseriesMinRows,
            severity: Severity::Warning,
            action: format!(
                "only {} distinct time points, {} required for a trend, downgraded to MetricCard",
                field.unique_values, config.min_rows_for_trends
            ),
            token: format!(
                "timeseries_sparse→MetricCard({}<{})",
                field.unique_values, config.min_rows_for_trends
            ),
        });
    }

    None
}

/// A column with one distinct value across many rows shows nothing.
/// Status fields are exempt: a constant status is still meaningful.
fn skip_constant_fields(
    field: &mut FieldRecord,
    _config: &PolicyConfig,
    _entry: &FieldSnapshot,
) -> Option<Correction> {
    if field.unique_values > 1
        || field.total_rows <= 1
        || field.shape == FieldShape::Status
        || field.skip
    {
        return None;
    }

    field.mark_skipped(CONSTANT_SKIP_REASON);

    Some(Correction {
        rule: RuleId::SkipConstantFields,
        severity: Severity::Warning,
        action: format!(
            "constant field ({} distinct value over {} rows), skipped",
            field.unique_values, field.total_rows
        ),
        token: "constant_skipped".to_string(),
    })
}

/// Long free text and high-cardinality text only make sense row by row.
fn no_chart_detail_shapes(
    field: &mut FieldRecord,
    _config: &PolicyConfig,
    _entry: &FieldSnapshot,
) -> Option<Correction> {
    let detail_only = matches!(
        field.shape,
        FieldShape::LongText | FieldShape::HighCardinalityText
    );
    if !detail_only || !field.component.is_chart() {
        return None;
    }

    field.component = Component::DataTable;
    field.aggregation = Aggregation::None;
    field.role = Role::Detail;

    Some(Correction {
        rule: RuleId::NoChartDetailShapes,
        severity: Severity::Warning,
        action: "detail-only text shape cannot be charted, downgraded to DataTable".to_string(),
        token: "detail_shape_chart_blocked→DataTable".to_string(),
    })
}

/// Mostly-null fields chart as noise. Aggregation is deliberately left
/// unchanged here, unlike the other chart-blocking rules; downstream
/// consumers assert on that asymmetry.
fn sparse_field_guard(
    field: &mut FieldRecord,
    _config: &PolicyConfig,
    _entry: &FieldSnapshot,
) -> Option<Correction> {
    let sparse = field.null_rate.is_some_and(|rate| rate > 0.5)
        && field.sparse_field == Some(true);
    if !sparse || !field.component.is_chart() {
        return None;
    }

    field.component = Component::DataTable;
    field.role = Role::Detail;

    Some(Correction {
        rule: RuleId::SparseFieldGuard,
        severity: Severity::Warning,
        action: "sparse field (over half null) cannot be charted, downgraded to DataTable"
            .to_string(),
        token: "sparse_field_chart_blocked".to_string(),
    })
}

/// Rich text renders as a content card, never a chart.
fn no_chart_rich_text(
    field: &mut FieldRecord,
    _config: &PolicyConfig,
    _entry: &FieldSnapshot,
) -> Option<Correction> {
    if field.shape != FieldShape::RichText || !field.component.is_chart() {
        return None;
    }

    field.component = Component::ContentCard;
    field.aggregation = Aggregation::None;
    field.role = Role::Detail;

    Some(Correction {
        rule: RuleId::NoChartRichText,
        severity: Severity::Warning,
        action: "rich text cannot be charted, downgraded to ContentCard".to_string(),
        token: "rich_text_chart_blocked→ContentCard".to_string(),
    })
}
