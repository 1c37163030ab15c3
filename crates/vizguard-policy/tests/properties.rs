//! Property tests for the policy engine's invariants

use proptest::prelude::*;

use vizguard_core::prelude::*;
use vizguard_policy::prelude::*;
use vizguard_policy::validate_stats;

fn arb_shape() -> impl Strategy<Value = FieldShape> {
    prop_oneof![
        Just(FieldShape::Id),
        Just(FieldShape::Label),
        Just(FieldShape::Status),
        Just(FieldShape::Timestamp),
        Just(FieldShape::LongText),
        Just(FieldShape::HighCardinalityText),
        Just(FieldShape::RichText),
        Just(FieldShape::Numeric),
        Just(FieldShape::Money),
        Just(FieldShape::Duration),
    ]
}

fn arb_component() -> impl Strategy<Value = Component> {
    prop_oneof![
        Just(Component::MetricCard),
        Just(Component::PieChart),
        Just(Component::BarChart),
        Just(Component::TimeseriesChart),
        Just(Component::LineChart),
        Just(Component::AreaChart),
        Just(Component::DonutChart),
        Just(Component::DataTable),
        Just(Component::ContentCard),
    ]
}

fn arb_aggregation() -> impl Strategy<Value = Aggregation> {
    prop_oneof![
        Just(Aggregation::Count),
        Just(Aggregation::CountPerCategory),
        Just(Aggregation::Percentage),
        Just(Aggregation::Avg),
        Just(Aggregation::Sum),
        Just(Aggregation::CountOverTime),
        Just(Aggregation::None),
    ]
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Hero),
        Just(Role::Trend),
        Just(Role::Breakdown),
        Just(Role::Supporting),
        Just(Role::Detail),
    ]
}

fn arb_source() -> impl Strategy<Value = SemanticSource> {
    prop_oneof![
        Just(SemanticSource::Heuristic),
        Just(SemanticSource::SkillOverride),
    ]
}

fn arb_field() -> impl Strategy<Value = FieldRecord> {
    (
        "[a-z_]{1,12}",
        arb_shape(),
        arb_component(),
        arb_aggregation(),
        arb_role(),
        -10i64..300,
        -10i64..300,
        proptest::option::of(0.0f64..=1.0),
        proptest::option::of(any::<bool>()),
        any::<bool>(),
        arb_source(),
    )
        .prop_map(
            |(
                name,
                shape,
                component,
                aggregation,
                role,
                unique_values,
                total_rows,
                null_rate,
                sparse_field,
                skip,
                source,
            )| {
                let mut field = FieldRecord::new(name, shape, component, aggregation, role)
                    .with_stats(unique_values, total_rows)
                    .with_source(source);
                field.null_rate = null_rate;
                field.sparse_field = sparse_field;
                if skip {
                    field.mark_skipped("excluded upstream");
                }
                field
            },
        )
}

fn arb_fields() -> impl Strategy<Value = Vec<FieldRecord>> {
    proptest::collection::vec(arb_field(), 0..24)
}

proptest! {
    #[test]
    fn prop_validator_enforces_cardinality_bounds(fields in arb_fields()) {
        let (validated, _) = validate_stats(&fields);
        for field in &validated {
            if field.total_rows > 0 {
                prop_assert!(field.unique_values >= 0);
                prop_assert!(field.unique_values <= field.total_rows);
            }
        }
    }

    #[test]
    fn prop_validator_skips_rowless_fields(fields in arb_fields()) {
        let (validated, _) = validate_stats(&fields);
        for field in &validated {
            if field.total_rows <= 0 {
                prop_assert!(field.skip);
            }
        }
    }

    #[test]
    fn prop_enforce_preserves_collection(fields in arb_fields()) {
        let result = enforce(&fields, None);
        prop_assert_eq!(result.fields.len(), fields.len());
        for (input, output) in fields.iter().zip(&result.fields) {
            prop_assert_eq!(&input.name, &output.name);
            prop_assert_eq!(input.shape, output.shape);
        }
    }

    #[test]
    fn prop_enforce_never_mutates_input(fields in arb_fields()) {
        let snapshot = fields.clone();
        let _ = enforce(&fields, None);
        prop_assert_eq!(fields, snapshot);
    }

    #[test]
    fn prop_identifiers_are_never_charted(fields in arb_fields()) {
        let result = enforce(&fields, None);
        for field in &result.fields {
            if field.shape == FieldShape::Id && !field.skip {
                prop_assert!(!field.component.is_chart());
            }
        }
    }

    #[test]
    fn prop_active_heroes_stay_within_budget(fields in arb_fields()) {
        let result = enforce(&fields, None);
        let active_heroes = result
            .fields
            .iter()
            .filter(|f| !f.skip && f.role == Role::Hero)
            .count();
        prop_assert!(active_heroes <= PolicyConfig::default().max_hero_stats);
    }

    #[test]
    fn prop_fix_count_matches_violations(fields in arb_fields()) {
        let result = enforce(&fields, None);
        prop_assert_eq!(result.auto_fix_count, result.violations.len());
        prop_assert_eq!(result.version, POLICY_VERSION);
    }

    #[test]
    fn prop_every_violation_names_an_input_field(fields in arb_fields()) {
        let result = enforce(&fields, None);
        for violation in &result.violations {
            prop_assert!(fields.iter().any(|f| f.name == violation.field));
        }
    }

    #[test]
    fn prop_ordering_is_idempotent(fields in arb_fields()) {
        let once = order(&fields);
        let twice = order(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_ordering_preserves_length_and_input(fields in arb_fields()) {
        let snapshot = fields.clone();
        let ordered = order(&fields);
        prop_assert_eq!(ordered.len(), fields.len());
        prop_assert_eq!(fields, snapshot);
    }

    #[test]
    fn prop_ordering_puts_skipped_fields_last(fields in arb_fields()) {
        let ordered = order(&fields);
        let first_skipped = ordered.iter().position(|f| f.skip);
        if let Some(boundary) = first_skipped {
            prop_assert!(ordered[boundary..].iter().all(|f| f.skip));
        }
    }
}
