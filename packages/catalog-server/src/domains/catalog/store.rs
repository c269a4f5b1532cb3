//! Listing store - owns listing records and enforces the schema.
//!
//! All listing mutations come through here or through the lifecycle; both
//! serialize on the catalog write gate so every read-modify-write sequence
//! sees committed state. Reads (`get`, `list`) never take the gate.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::common::errors::{DomainError, FieldViolation};
use crate::common::ListingId;
use crate::domains::catalog::models::{Category, Listing, ListingDraft, ListingPatch, ListingStatus};
use crate::domains::catalog::validate::validate_draft;
use crate::domains::orders::models::Order;
use crate::kernel::traits::BaseRecords;
use crate::kernel::EngineDeps;

pub struct ListingStore {
    listings: Arc<dyn BaseRecords<Listing>>,
    categories: Arc<dyn BaseRecords<Category>>,
    orders: Arc<dyn BaseRecords<Order>>,
    write_gate: Arc<Mutex<()>>,
}

impl ListingStore {
    pub fn new(deps: &EngineDeps) -> Self {
        Self {
            listings: deps.listings.clone(),
            categories: deps.categories.clone(),
            orders: deps.orders.clone(),
            write_gate: deps.catalog_gate.clone(),
        }
    }

    /// Create a listing from a draft.
    ///
    /// Validates every schema invariant and returns a `ValidationError`
    /// enumerating all violated fields. Status is always `pending` and
    /// `created_at` is assigned here.
    pub async fn create(&self, draft: ListingDraft) -> Result<Listing, DomainError> {
        let _gate = self.write_gate.lock().await;

        let mut violations = validate_draft(&draft, &self.category_names().await?);
        if let Some(violation) = self.domain_taken(&draft.website.domain, None).await? {
            violations.push(violation);
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }

        let listing = Listing::from_draft(draft);
        self.listings
            .put(listing.id.into_uuid(), listing.clone())
            .await?;

        info!(listing_id = %listing.id, domain = %listing.website.domain, "Listing created");
        Ok(listing)
    }

    pub async fn get(&self, id: ListingId) -> Result<Listing, DomainError> {
        self.listings
            .get(id.into_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("listing", id))
    }

    /// Apply a patch and re-validate the merged record.
    ///
    /// The status field is write-protected from this path; a patch carrying
    /// one fails with `InvalidTransition` before anything else happens.
    pub async fn update(&self, id: ListingId, patch: ListingPatch) -> Result<Listing, DomainError> {
        let _gate = self.write_gate.lock().await;

        let current = self
            .listings
            .get(id.into_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("listing", id))?;

        if let Some(requested) = patch.status {
            return Err(DomainError::invalid_transition(current.status, requested));
        }

        let merged = current.merged_with(patch);
        let draft = ListingDraft {
            price: merged.price,
            offer_rate: merged.offer_rate,
            website: merged.website.clone(),
            terms: merged.terms.clone(),
            language: merged.language.clone(),
            category: merged.category.clone(),
            metrics: merged.metrics.clone(),
            niches: merged.niches.clone(),
            accepted_content: merged.accepted_content.clone(),
        };

        let mut violations = validate_draft(&draft, &self.category_names().await?);
        if let Some(violation) = self
            .domain_taken(&merged.website.domain, Some(merged.id))
            .await?
        {
            violations.push(violation);
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }

        self.listings.put(merged.id.into_uuid(), merged.clone()).await?;
        info!(listing_id = %merged.id, "Listing updated");
        Ok(merged)
    }

    /// Delete a listing. Fails with `Conflict` while any order references
    /// it - orders hold a non-owning reference and must never be cascaded.
    pub async fn delete(&self, id: ListingId) -> Result<(), DomainError> {
        let _gate = self.write_gate.lock().await;

        let referencing_orders = self
            .orders
            .scan()
            .await?
            .iter()
            .filter(|order| order.listing_id == id)
            .count();
        if referencing_orders > 0 {
            return Err(DomainError::Conflict(format!(
                "listing {id} is referenced by {referencing_orders} order(s)"
            )));
        }

        if !self.listings.delete(id.into_uuid()).await? {
            return Err(DomainError::not_found("listing", id));
        }
        info!(listing_id = %id, "Listing deleted");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Listing>, DomainError> {
        self.listings.scan().await
    }

    async fn category_names(&self) -> Result<BTreeSet<String>, DomainError> {
        Ok(self
            .categories
            .scan()
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect())
    }

    /// `website.domain` must be unique among active (non-rejected)
    /// listings. A rejected listing releases its domain.
    async fn domain_taken(
        &self,
        domain: &str,
        exclude: Option<ListingId>,
    ) -> Result<Option<FieldViolation>, DomainError> {
        let taken = self.listings.scan().await?.iter().any(|listing| {
            listing.status != ListingStatus::Rejected
                && listing.website.domain.eq_ignore_ascii_case(domain)
                && Some(listing.id) != exclude
        });
        Ok(taken.then(|| {
            FieldViolation::new(
                "website.domain",
                format!("domain already has an active listing: {domain}"),
            )
        }))
    }
}
