//! Cross-field hero-stat constraint
//!
//! Runs after every field has completed its individual rule pass. At most
//! `max_hero_stats` fields may stay active heroes; override-confirmed heroes
//! are preferred to survive, and survival among heuristic heroes follows
//! caller order (the sort is stable, so demotion is reproducible across runs
//! with identical input).

use vizguard_core::{FieldRecord, Role, SemanticSource};

use crate::config::PolicyConfig;
use crate::violation::{FieldSnapshot, PolicyViolation, RuleId, Severity};

/// Demote hero fields beyond the configured budget, appending one violation
/// per demotion.
pub(crate) fn enforce_hero_budget(
    fields: &mut [FieldRecord],
    config: &PolicyConfig,
    violations: &mut Vec<PolicyViolation>,
) {
    let mut heroes: Vec<usize> = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.skip && field.role == Role::Hero)
        .map(|(index, _)| index)
        .collect();

    let observed = heroes.len();
    if observed <= config.max_hero_stats {
        return;
    }

    // Stable: override-sourced heroes sort to the front, original relative
    // order is preserved within each tier.
    heroes.sort_by_key(|&index| match fields[index].semantic_source {
        SemanticSource::SkillOverride => 0u8,
        SemanticSource::Heuristic => 1u8,
    });

    for &index in &heroes[config.max_hero_stats..] {
        let field = &mut fields[index];
        let before = FieldSnapshot::of(field);

        field.role = Role::Supporting;
        field.policy_actions.push(format!(
            "hero_overflow→supporting({}>{})",
            observed, config.max_hero_stats
        ));

        violations.push(PolicyViolation {
            field: field.name.clone(),
            rule: RuleId::MaxHeroStats,
            severity: Severity::Warning,
            action: format!(
                "{} hero stats exceed the budget of {}, demoted to supporting",
                observed, config.max_hero_stats
            ),
            before,
            after: FieldSnapshot::of(field),
        });
    }
}
