// Kernel - infrastructure seams the domain engine is built against
//
// The persistence collaborator is consumed through the `BaseRecords` trait;
// any backing store offering get/put/delete-by-id and a full scan is
// conformant. `MemoryRecords` is the in-process implementation used by the
// server binary and the test suite.

pub mod deps;
pub mod memory;
pub mod traits;

pub use deps::EngineDeps;
pub use memory::MemoryRecords;
pub use traits::BaseRecords;
