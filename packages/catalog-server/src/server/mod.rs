// HTTP surface - a thin axum layer over the domain engine.
//
// Endpoint and payload shapes are part of the external contract; all
// semantics (validation, lifecycles, query behavior) live in the domain
// components.

pub mod app;
pub mod error;
pub mod routes;

pub use app::{build_app, AppState};
