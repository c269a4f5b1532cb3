// Catalog domain - listings, categories, the query engine, the listing
// approval lifecycle and the bulk import pipeline.

pub mod categories;
pub mod import;
pub mod lifecycle;
pub mod models;
pub mod query;
pub mod store;
pub mod validate;

pub use categories::CategoryStore;
pub use import::{ImportOutcome, ImportPipeline, RawRow, RowError};
pub use lifecycle::ListingLifecycle;
pub use query::{ListingQuery, QueryEngine, SortKey};
pub use store::ListingStore;
