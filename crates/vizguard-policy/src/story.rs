//! Story sequencer
//!
//! Orders a field collection for progressive reveal: active fields first in
//! role-rank order (hero, trend, breakdown, supporting, detail), skipped
//! fields after everything else. The sort is stable, so fields with equal
//! rank keep whatever order the caller provided. Works on any field
//! collection, including one produced outside the policy engine.

use vizguard_core::FieldRecord;

/// Return a new collection ordered for presentation. The input is not
/// mutated.
pub fn order(fields: &[FieldRecord]) -> Vec<FieldRecord> {
    let mut ordered = fields.to_vec();
    ordered.sort_by_key(|field| (field.skip, field.role.rank()));
    ordered
}
