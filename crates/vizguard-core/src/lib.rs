//! Vizguard Core
//!
//! Core types and utilities shared across Vizguard components.
//!
//! This crate provides:
//! - The field-record contract exchanged between the upstream semantic
//!   classifier, the policy engine, and the downstream renderer
//! - Enumerations for shapes, components, aggregations, roles, and
//!   classification provenance
//! - Error types and result handling

pub mod error;
pub mod field;

pub use error::{Error, Result};
pub use field::{
    Aggregation, AppliedRule, Component, FieldRecord, FieldShape, Role, SemanticSource,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::{
        Aggregation, AppliedRule, Component, FieldRecord, FieldShape, Role, SemanticSource,
    };
}
