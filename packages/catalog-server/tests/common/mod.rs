//! Shared test harness for the domain engine integration tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rust_decimal::Decimal;

use catalog_core::common::auth::{Actor, Role};
use catalog_core::common::UserId;
use catalog_core::domains::catalog::models::{
    CountryShare, DomainRating, Languages, ListingDraft, PlacementTerms, PlacementType,
    SiteMetrics, Website,
};
use catalog_core::domains::catalog::{
    CategoryStore, ImportPipeline, ListingLifecycle, ListingStore, QueryEngine,
};
use catalog_core::domains::orders::OrderLifecycle;
use catalog_core::kernel::EngineDeps;

pub struct TestHarness {
    pub deps: EngineDeps,
    pub listings: Arc<ListingStore>,
    pub categories: CategoryStore,
    pub lifecycle: ListingLifecycle,
    pub orders: OrderLifecycle,
    pub query: QueryEngine,
    pub import: ImportPipeline,
}

impl TestHarness {
    /// In-memory engine with the standard seed categories.
    pub async fn new() -> Self {
        let deps = EngineDeps::in_memory();
        let listings = Arc::new(ListingStore::new(&deps));
        let harness = TestHarness {
            categories: CategoryStore::new(&deps),
            lifecycle: ListingLifecycle::new(&deps),
            orders: OrderLifecycle::new(&deps),
            query: QueryEngine::new(&deps, 20, 100),
            import: ImportPipeline::new(listings.clone()),
            listings,
            deps,
        };

        for name in ["technology", "finance", "health"] {
            harness
                .categories
                .create(name.to_string(), None, &admin())
                .await
                .expect("Failed to seed category");
        }
        harness
    }
}

pub fn admin() -> Actor {
    Actor::new(UserId::new(), Role::Admin)
}

pub fn customer() -> Actor {
    Actor::new(UserId::new(), Role::Customer)
}

pub fn publisher() -> Actor {
    Actor::new(UserId::new(), Role::Publisher)
}

/// A complete, valid draft for `domain` in the `technology` category.
pub fn draft(domain: &str) -> ListingDraft {
    ListingDraft {
        price: Decimal::from(150),
        offer_rate: None,
        website: Website {
            domain: domain.to_string(),
            verified: true,
        },
        terms: PlacementTerms {
            listing_type: PlacementType::GuestPost,
            permanent: true,
            months: None,
            word_count: 800,
            working_days: 5,
        },
        language: Languages {
            primary: "en".to_string(),
            native: "en".to_string(),
        },
        category: "technology".to_string(),
        metrics: SiteMetrics {
            dr: DomainRating { value: 60 },
            da: 55,
            authority_score: 35,
            traffic: 50_000,
            keywords: 4_000,
            ref_domains: 300,
            country_traffic: vec![CountryShare {
                country: "US".to_string(),
                percent: 80.0,
            }],
        },
        niches: BTreeSet::from(["saas".to_string()]),
        accepted_content: BTreeMap::new(),
    }
}
