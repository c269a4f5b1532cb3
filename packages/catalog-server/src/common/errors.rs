//! Domain error taxonomy.
//!
//! Every failure the engine surfaces carries enough structure (kind plus
//! field/row context) for the caller to render a precise message. Nothing
//! is swallowed: validation enumerates all violations, import collects
//! per-row errors, and store-level failures propagate as an opaque
//! `StoreUnavailable` for the caller to retry or surface.

use serde::Serialize;
use thiserror::Error;

/// A single violated field constraint, e.g. `metrics.dr.value` out of range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors surfaced by the listing/order domain engine
#[derive(Error, Debug)]
pub enum DomainError {
    /// Field-level validation failure. Carries every violated field, not
    /// just the first, so batch tooling can report completely.
    #[error("validation failed: {}", format_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("permission denied: {0}")]
    Forbidden(String),

    /// A state machine rule was violated, including attempts to write a
    /// lifecycle-owned status field directly.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// The operation requires the referenced record to be in a different
    /// state (e.g. ordering against a listing that is not approved).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Referential-integrity block, e.g. deleting a listing with open orders.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A malformed raw value in bulk import input.
    #[error("cannot parse field {field}: {message}")]
    Parse { field: String, message: String },

    /// The persistence collaborator failed; not retried inside the engine.
    /// Carries an opaque description for the caller to surface or retry on.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_transition(
        from: impl std::fmt::Display,
        to: impl std::fmt::Display,
    ) -> Self {
        DomainError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn parse(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Parse {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The violations behind a `Validation` error, if that is what this is.
    pub fn violations(&self) -> Option<&[FieldViolation]> {
        match self {
            DomainError::Validation(violations) => Some(violations),
            _ => None,
        }
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
