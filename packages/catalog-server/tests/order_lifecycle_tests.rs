//! Order lifecycle integration tests: the full fulfillment path with the
//! payment axis moving independently.

mod common;

use crate::common::{admin, customer, draft, publisher, TestHarness};
use catalog_core::common::errors::DomainError;
use catalog_core::common::UserId;
use catalog_core::domains::catalog::models::ListingStatus;
use catalog_core::domains::orders::models::{OrderStatus, PaymentStatus};
use catalog_core::domains::orders::CreateOrder;

async fn approved_listing(harness: &TestHarness) -> catalog_core::domains::catalog::models::Listing {
    let listing = harness.listings.create(draft("publisher.com")).await.unwrap();
    harness
        .lifecycle
        .set_status(listing.id, ListingStatus::Approved, &admin())
        .await
        .unwrap()
}

fn order_input(listing_id: catalog_core::common::ListingId) -> CreateOrder {
    CreateOrder {
        listing_id,
        publisher_id: UserId::new(),
        anchor_text: "project management tools".to_string(),
        target_url: "https://buyer.example/tools".to_string(),
    }
}

#[tokio::test]
async fn test_full_fulfillment_path() {
    let harness = TestHarness::new().await;
    let listing = approved_listing(&harness).await;

    let order = harness
        .orders
        .create_order(order_input(listing.id), &customer())
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    // Payment arrives without touching fulfillment
    let paid = harness
        .orders
        .set_payment_status(order.id, PaymentStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.status, OrderStatus::Pending);

    let in_progress = harness
        .orders
        .set_status(order.id, OrderStatus::InProgress, None, &publisher())
        .await
        .unwrap();
    assert_eq!(in_progress.status, OrderStatus::InProgress);

    let completed = harness
        .orders
        .set_status(
            order.id,
            OrderStatus::Completed,
            Some("https://publisher.com/guest-post".to_string()),
            &publisher(),
        )
        .await
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    assert!(completed.published_at.is_some());
}

#[tokio::test]
async fn test_create_order_against_missing_listing_is_not_found() {
    let harness = TestHarness::new().await;
    let err = harness
        .orders
        .create_order(order_input(catalog_core::common::ListingId::new()), &customer())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_create_order_requires_non_empty_anchor_and_target() {
    let harness = TestHarness::new().await;
    let listing = approved_listing(&harness).await;

    let mut input = order_input(listing.id);
    input.anchor_text = "  ".to_string();
    input.target_url = String::new();
    let err = harness
        .orders
        .create_order(input, &customer())
        .await
        .unwrap_err();
    let violations = err.violations().expect("expected a validation error");
    assert_eq!(violations.len(), 2);
}

#[tokio::test]
async fn test_customer_cannot_progress_orders() {
    let harness = TestHarness::new().await;
    let listing = approved_listing(&harness).await;
    let order = harness
        .orders
        .create_order(order_input(listing.id), &customer())
        .await
        .unwrap();

    let err = harness
        .orders
        .set_status(order.id, OrderStatus::InProgress, None, &customer())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)));
}

#[tokio::test]
async fn test_cancellation_window_closes_at_completion() {
    let harness = TestHarness::new().await;
    let listing = approved_listing(&harness).await;
    let order = harness
        .orders
        .create_order(order_input(listing.id), &customer())
        .await
        .unwrap();

    // Cancellable while pending
    let cancelled = harness
        .orders
        .set_status(order.id, OrderStatus::Cancelled, None, &publisher())
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    // And terminal afterwards
    let err = harness
        .orders
        .set_status(order.id, OrderStatus::InProgress, None, &publisher())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition { .. }));
}
