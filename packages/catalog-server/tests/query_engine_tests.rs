//! Query engine integration tests: approved-only visibility, predicate
//! conformance and deterministic ordering, end to end through the store
//! and lifecycle.

mod common;

use std::collections::BTreeSet;

use crate::common::{admin, draft, TestHarness};
use catalog_core::domains::catalog::models::{Listing, ListingStatus};
use catalog_core::domains::catalog::{ListingQuery, SortKey};
use rust_decimal::Decimal;

async fn seed_approved(harness: &TestHarness, domain: &str, da: u8, price: i64) -> Listing {
    let mut input = draft(domain);
    input.metrics.da = da;
    input.price = Decimal::from(price);
    let listing = harness.listings.create(input).await.unwrap();
    harness
        .lifecycle
        .set_status(listing.id, ListingStatus::Approved, &admin())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_pending_and_rejected_listings_are_never_visible() {
    let harness = TestHarness::new().await;
    seed_approved(&harness, "visible.com", 50, 100).await;

    let pending = harness.listings.create(draft("pending.com")).await.unwrap();
    let rejected = harness.listings.create(draft("rejected.com")).await.unwrap();
    harness
        .lifecycle
        .set_status(rejected.id, ListingStatus::Rejected, &admin())
        .await
        .unwrap();

    let page = harness.query.search(&ListingQuery::default()).await.unwrap();
    assert_eq!(page.meta.total_items, 1);
    assert_eq!(page.data[0].website.domain, "visible.com");
    assert!(page.data.iter().all(|listing| listing.id != pending.id));
}

#[tokio::test]
async fn test_every_returned_listing_satisfies_every_active_predicate() {
    let harness = TestHarness::new().await;
    seed_approved(&harness, "low.com", 20, 40).await;
    seed_approved(&harness, "mid.com", 50, 150).await;
    seed_approved(&harness, "high.com", 90, 600).await;

    let query = ListingQuery {
        min_da: Some(30),
        price_max: Some(Decimal::from(200)),
        categories: Some(BTreeSet::from(["technology".to_string()])),
        ..Default::default()
    };
    let page = harness.query.search(&query).await.unwrap();
    assert_eq!(page.meta.total_items, 1);
    for listing in &page.data {
        assert!(listing.metrics.da >= 30);
        assert!(listing.price <= Decimal::from(200));
        assert_eq!(listing.category, "technology");
        assert_eq!(listing.status, ListingStatus::Approved);
    }
}

#[tokio::test]
async fn test_pagination_beyond_total_pages_is_an_empty_page() {
    let harness = TestHarness::new().await;
    for n in 0..3 {
        seed_approved(&harness, &format!("site{n}.com"), 40, 100).await;
    }

    let query = ListingQuery {
        page: Some(10),
        page_size: Some(2),
        ..Default::default()
    };
    let page = harness.query.search(&query).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total_items, 3);
    assert_eq!(page.meta.total_pages, 2);
    assert_eq!(page.meta.current_page, 10);
    assert_eq!(page.meta.items_per_page, 2);
}

#[tokio::test]
async fn test_sort_is_total_with_id_tie_break() {
    let harness = TestHarness::new().await;
    // All four share the same DA so only the tie-break orders them
    for n in 0..4 {
        seed_approved(&harness, &format!("tie{n}.com"), 42, 100 + n).await;
    }

    let query = ListingQuery {
        sort: Some(SortKey::DaDesc),
        ..Default::default()
    };
    let page = harness.query.search(&query).await.unwrap();
    assert_eq!(page.data.len(), 4);
    for window in page.data.windows(2) {
        assert_eq!(window[0].metrics.da, window[1].metrics.da);
        assert!(window[0].id < window[1].id);
    }
}

#[tokio::test]
async fn test_newest_sort_returns_latest_first() {
    let harness = TestHarness::new().await;
    let _oldest = seed_approved(&harness, "first.com", 10, 100).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newest = seed_approved(&harness, "second.com", 20, 100).await;

    let query = ListingQuery {
        sort: Some(SortKey::Newest),
        ..Default::default()
    };
    let page = harness.query.search(&query).await.unwrap();
    assert_eq!(page.data[0].id, newest.id);
}
