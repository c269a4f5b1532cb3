// Orders domain - purchases of listing placements and their fulfillment
// lifecycle.

pub mod lifecycle;
pub mod models;

pub use lifecycle::{CreateOrder, OrderLifecycle};
