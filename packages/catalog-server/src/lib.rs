// Linkmart Catalog - domain engine core
//
// This crate provides the listing/order domain engine for the placement
// marketplace: the listing store and its validation rules, the filter/sort
// query engine, the listing and order status lifecycles, and the bulk
// import pipeline. Page rendering, authentication and durable persistence
// are external collaborators consumed through the kernel traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
