/// Authorization module for the catalog engine
///
/// The auth collaborator verifies credentials and hands the engine an
/// [`Actor`] with an already-trusted role. The engine performs capability
/// checks only:
///
/// ```rust,ignore
/// actor.require(Capability::ModerateListings)?;
/// ```
///
/// Checks live in the lifecycle/action layer, centralized here rather than
/// scattered inline per endpoint.
mod capability;

pub use capability::{Actor, Capability, Role};
