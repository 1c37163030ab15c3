//! Statistics validation pass
//!
//! Sanitizes per-field cardinality statistics before any policy logic runs.
//! The upstream classifier may legitimately produce noisy counts, so this
//! pass corrects rather than rejects: no check halts processing of a field
//! or of the collection, and every correction emits a warning string.

use tracing::warn;
use vizguard_core::FieldRecord;

/// Token appended to `policy_actions` when a field is skipped for invalid
/// row counts
pub const STATS_INVALID_SKIP: &str = "stats_invalid_skip";

/// Reason recorded on fields skipped for invalid row counts
pub const STATS_INVALID_REASON: &str = "invalid statistics: totalRows must be positive";

/// Sanitize cardinality statistics for a whole collection.
///
/// Returns a new collection plus the warnings emitted; the caller's fields
/// are never mutated. The three checks run independently per field, in a
/// fixed order: cardinality clamp, row-count skip, negative-value reset.
/// All of them may fire for the same field.
pub fn validate_stats(fields: &[FieldRecord]) -> (Vec<FieldRecord>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut validated = fields.to_vec();

    for field in &mut validated {
        if field.unique_values > field.total_rows && field.total_rows > 0 {
            let warning = format!(
                "field '{}': uniqueValues {} exceeds totalRows {}, clamping",
                field.name, field.unique_values, field.total_rows
            );
            warn!(field = %field.name, "{}", warning);
            warnings.push(warning);
            field.unique_values = field.total_rows;
        }

        if field.total_rows <= 0 {
            let warning = format!(
                "field '{}': totalRows {} is not positive, skipping field",
                field.name, field.total_rows
            );
            warn!(field = %field.name, "{}", warning);
            warnings.push(warning);
            field.mark_skipped(STATS_INVALID_REASON);
            field.policy_actions.push(STATS_INVALID_SKIP.to_string());
        }

        if field.unique_values < 0 {
            let warning = format!(
                "field '{}': uniqueValues {} is negative, resetting to 0",
                field.name, field.unique_values
            );
            warn!(field = %field.name, "{}", warning);
            warnings.push(warning);
            field.unique_values = 0;
        }
    }

    (validated, warnings)
}
