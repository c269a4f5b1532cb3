//! Listing approval lifecycle.
//!
//! pending -> approved | rejected. Approved and rejected are terminal for
//! this engine; a rejected listing is re-submitted by creating a new
//! listing, never by reusing the id. Only the lifecycle writes `status`,
//! and only an admin actor may drive it.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::common::auth::{Actor, Capability};
use crate::common::errors::DomainError;
use crate::common::ListingId;
use crate::domains::catalog::models::{Listing, ListingStatus};
use crate::kernel::traits::BaseRecords;
use crate::kernel::EngineDeps;

pub struct ListingLifecycle {
    listings: Arc<dyn BaseRecords<Listing>>,
    write_gate: Arc<Mutex<()>>,
}

impl ListingLifecycle {
    pub fn new(deps: &EngineDeps) -> Self {
        Self {
            listings: deps.listings.clone(),
            write_gate: deps.catalog_gate.clone(),
        }
    }

    /// Transition a listing to `target`.
    ///
    /// Requesting the current status succeeds trivially as a logged no-op.
    /// The updated listing becomes visible to the query engine only when
    /// `target` is `approved`.
    pub async fn set_status(
        &self,
        id: ListingId,
        target: ListingStatus,
        actor: &Actor,
    ) -> Result<Listing, DomainError> {
        actor.require(Capability::ModerateListings)?;

        let _gate = self.write_gate.lock().await;

        let mut listing = self
            .listings
            .get(id.into_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("listing", id))?;

        if listing.status == target {
            info!(listing_id = %id, status = %target, "Status unchanged (no-op)");
            return Ok(listing);
        }

        // Approved and rejected are terminal here
        if listing.status != ListingStatus::Pending {
            return Err(DomainError::invalid_transition(listing.status, target));
        }

        let previous = listing.status;
        listing.status = target;
        self.listings.put(id.into_uuid(), listing.clone()).await?;

        info!(
            listing_id = %id,
            from = %previous,
            to = %target,
            moderator = %actor.id,
            "Listing status changed"
        );
        Ok(listing)
    }
}
