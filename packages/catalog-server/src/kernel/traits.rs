// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Validation,
// lifecycle rules and query semantics live in the domain layer and use
// these traits through an injected handle, never a process-wide singleton.
//
// Naming convention: Base* for trait names (e.g. BaseRecords)

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::errors::DomainError;

/// A keyed record store: get/put/delete by id plus a full scan.
///
/// The engine assumes at least read-committed isolation per record. Infra
/// failures (connectivity, timeouts) surface as
/// [`DomainError::StoreUnavailable`] and are not retried here.
#[async_trait]
pub trait BaseRecords<T: Clone + Send + Sync + 'static>: Send + Sync {
    /// Fetch a record by id, `None` when absent.
    async fn get(&self, id: Uuid) -> Result<Option<T>, DomainError>;

    /// Insert or replace the record under `id`.
    async fn put(&self, id: Uuid, record: T) -> Result<(), DomainError>;

    /// Remove the record under `id`. Returns whether it existed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Point-in-time snapshot of every record.
    async fn scan(&self) -> Result<Vec<T>, DomainError>;
}
