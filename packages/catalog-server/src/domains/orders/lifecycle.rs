//! Order fulfillment lifecycle.
//!
//! pending -> in_progress -> completed; pending|in_progress -> cancelled;
//! any non-terminal state -> rejected. Payment status is a separate axis
//! driven by the external payment collaborator and never moves `status`.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::common::auth::{Actor, Capability};
use crate::common::errors::{DomainError, FieldViolation};
use crate::common::{ListingId, OrderId, UserId};
use crate::domains::catalog::models::{Listing, ListingStatus};
use crate::domains::orders::models::{Order, OrderStatus, PaymentStatus};
use crate::kernel::traits::BaseRecords;
use crate::kernel::EngineDeps;

/// Input for placing an order. The publisher id comes from the listing's
/// owner record, resolved by the caller outside this engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub listing_id: ListingId,
    pub publisher_id: UserId,
    pub anchor_text: String,
    pub target_url: String,
}

pub struct OrderLifecycle {
    orders: Arc<dyn BaseRecords<Order>>,
    listings: Arc<dyn BaseRecords<Listing>>,
    catalog_gate: Arc<Mutex<()>>,
    order_gate: Arc<Mutex<()>>,
}

impl OrderLifecycle {
    pub fn new(deps: &EngineDeps) -> Self {
        Self {
            orders: deps.orders.clone(),
            listings: deps.listings.clone(),
            catalog_gate: deps.catalog_gate.clone(),
            order_gate: deps.order_gate.clone(),
        }
    }

    /// Place an order against an approved listing.
    ///
    /// Fails `NotFound` when the listing is absent and `InvalidState` when
    /// it is not approved. Payment starts out `pending`. Holds the catalog
    /// gate from the listing check through the order insert, so a
    /// concurrent listing delete cannot slip between them and leave the
    /// order dangling.
    pub async fn create_order(
        &self,
        input: CreateOrder,
        buyer: &Actor,
    ) -> Result<Order, DomainError> {
        buyer.require(Capability::PlaceOrders)?;

        let mut violations = Vec::new();
        if input.anchor_text.trim().is_empty() {
            violations.push(FieldViolation::new("anchorText", "must not be empty"));
        }
        if input.target_url.trim().is_empty() {
            violations.push(FieldViolation::new("targetUrl", "must not be empty"));
        }
        if !violations.is_empty() {
            return Err(DomainError::Validation(violations));
        }

        let _gate = self.catalog_gate.lock().await;

        let listing = self
            .listings
            .get(input.listing_id.into_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("listing", input.listing_id))?;
        if listing.status != ListingStatus::Approved {
            return Err(DomainError::InvalidState(format!(
                "listing {} is {}, orders require an approved listing",
                listing.id, listing.status
            )));
        }

        let now = Utc::now();
        let order = Order {
            id: OrderId::new(),
            listing_id: listing.id,
            user_id: buyer.id,
            publisher_id: input.publisher_id,
            website: listing.website.domain.clone(),
            anchor_text: input.anchor_text,
            target_url: input.target_url,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            published_url: None,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        self.orders.put(order.id.into_uuid(), order.clone()).await?;

        info!(order_id = %order.id, listing_id = %order.listing_id, buyer = %buyer.id, "Order created");
        Ok(order)
    }

    pub async fn get(&self, id: OrderId) -> Result<Order, DomainError> {
        self.orders
            .get(id.into_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("order", id))
    }

    /// Transition an order to `target`.
    ///
    /// Completing requires `published_url` supplied atomically with the
    /// transition; it also stamps `published_at`. A same-value request is
    /// an idempotent no-op that still refreshes `updated_at`.
    pub async fn set_status(
        &self,
        id: OrderId,
        target: OrderStatus,
        published_url: Option<String>,
        actor: &Actor,
    ) -> Result<Order, DomainError> {
        actor.require(Capability::ProgressOrders)?;

        let _gate = self.order_gate.lock().await;

        let mut order = self
            .orders
            .get(id.into_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("order", id))?;

        if order.status == target {
            order.updated_at = Utc::now();
            self.orders.put(id.into_uuid(), order.clone()).await?;
            info!(order_id = %id, status = %target, "Order status unchanged (no-op)");
            return Ok(order);
        }

        if !order.status.can_transition_to(target) {
            return Err(DomainError::invalid_transition(order.status, target));
        }

        if target == OrderStatus::Completed {
            let url = published_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .ok_or_else(|| {
                    DomainError::Validation(vec![FieldViolation::new(
                        "publishedUrl",
                        "required when completing an order",
                    )])
                })?;
            order.published_url = Some(url.to_string());
            order.published_at = Some(Utc::now());
        }

        let previous = order.status;
        order.status = target;
        order.updated_at = Utc::now();
        self.orders.put(id.into_uuid(), order.clone()).await?;

        info!(order_id = %id, from = %previous, to = %target, "Order status changed");
        Ok(order)
    }

    /// Update the payment axis. Driven by the payment collaborator; never
    /// changes the fulfillment status.
    pub async fn set_payment_status(
        &self,
        id: OrderId,
        payment_status: PaymentStatus,
    ) -> Result<Order, DomainError> {
        let _gate = self.order_gate.lock().await;

        let mut order = self
            .orders
            .get(id.into_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("order", id))?;

        order.payment_status = payment_status;
        order.updated_at = Utc::now();
        self.orders.put(id.into_uuid(), order.clone()).await?;

        info!(order_id = %id, payment_status = %payment_status, "Payment status updated");
        Ok(order)
    }
}
