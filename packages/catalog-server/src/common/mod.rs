// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod pagination;

pub use auth::{Actor, Capability, Role};
pub use entity_ids::*;
pub use errors::{DomainError, FieldViolation};
pub use id::Id;
pub use pagination::{Page, PageMeta, PageParams};
