//! Policy threshold configuration
//!
//! The defaults form an immutable value object. Every enforcement run merges
//! caller overrides into a fresh copy, so the shared defaults can be reused
//! across concurrent invocations without synchronization.

use serde::{Deserialize, Serialize};

/// Thresholds governing the per-field and cross-field policy rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    /// Maximum distinct categories a pie chart may show
    #[serde(default = "default_max_pie_cardinality")]
    pub max_pie_cardinality: i64,

    /// Maximum number of active hero stats on a dashboard
    #[serde(default = "default_max_hero_stats")]
    pub max_hero_stats: usize,

    /// Maximum distinct categories a bar chart may show
    #[serde(default = "default_max_bar_categories")]
    pub max_bar_categories: i64,

    /// Minimum distinct time points required to plot a trend
    #[serde(default = "default_min_rows_for_trends")]
    pub min_rows_for_trends: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_pie_cardinality: default_max_pie_cardinality(),
            max_hero_stats: default_max_hero_stats(),
            max_bar_categories: default_max_bar_categories(),
            min_rows_for_trends: default_min_rows_for_trends(),
        }
    }
}

impl PolicyConfig {
    /// Produce a fresh config with the given overrides applied on top of
    /// these values. `self` is never mutated.
    pub fn merged(&self, overrides: &PolicyOverrides) -> Self {
        Self {
            max_pie_cardinality: overrides.max_pie_cardinality.unwrap_or(self.max_pie_cardinality),
            max_hero_stats: overrides.max_hero_stats.unwrap_or(self.max_hero_stats),
            max_bar_categories: overrides.max_bar_categories.unwrap_or(self.max_bar_categories),
            min_rows_for_trends: overrides.min_rows_for_trends.unwrap_or(self.min_rows_for_trends),
        }
    }
}

/// Partial configuration supplied by callers; unspecified thresholds fall
/// back to the documented defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pie_cardinality: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hero_stats: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bar_categories: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rows_for_trends: Option<i64>,
}

impl PolicyOverrides {
    /// Load overrides from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load overrides from a file
    pub fn from_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }
}

fn default_max_pie_cardinality() -> i64 {
    8
}

fn default_max_hero_stats() -> usize {
    4
}

fn default_max_bar_categories() -> i64 {
    20
}

fn default_min_rows_for_trends() -> i64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let config = PolicyConfig::default();
        assert_eq!(config.max_pie_cardinality, 8);
        assert_eq!(config.max_hero_stats, 4);
        assert_eq!(config.max_bar_categories, 20);
        assert_eq!(config.min_rows_for_trends, 5);
    }

    #[test]
    fn test_merge_leaves_defaults_untouched() {
        let defaults = PolicyConfig::default();
        let overrides = PolicyOverrides {
            max_pie_cardinality: Some(6),
            max_hero_stats: None,
            max_bar_categories: None,
            min_rows_for_trends: Some(10),
        };

        let merged = defaults.merged(&overrides);
        assert_eq!(merged.max_pie_cardinality, 6);
        assert_eq!(merged.min_rows_for_trends, 10);
        assert_eq!(merged.max_hero_stats, 4);
        assert_eq!(merged.max_bar_categories, 20);

        // The shared defaults are a value object; merging never mutates them
        assert_eq!(defaults, PolicyConfig::default());
    }

    #[test]
    fn test_overrides_from_yaml() {
        let yaml = r#"
maxPieCardinality: 12
maxHeroStats: 3
"#;

        let overrides = PolicyOverrides::from_yaml(yaml).unwrap();
        assert_eq!(overrides.max_pie_cardinality, Some(12));
        assert_eq!(overrides.max_hero_stats, Some(3));
        assert_eq!(overrides.max_bar_categories, None);

        let merged = PolicyConfig::default().merged(&overrides);
        assert_eq!(merged.max_pie_cardinality, 12);
        assert_eq!(merged.max_hero_stats, 3);
        assert_eq!(merged.min_rows_for_trends, 5);
    }

    #[test]
    fn test_config_deserializes_partial_documents() {
        let json = r#"{"maxBarCategories": 30}"#;
        let config: PolicyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_bar_categories, 30);
        assert_eq!(config.max_pie_cardinality, 8);
    }
}
