//! Listing query engine - filter, sort and paginate the public catalog.
//!
//! Read-only: runs over a point-in-time snapshot of the listing store, so
//! it is safe to call concurrently with writes. Only approved listings are
//! ever candidates; pending and rejected listings are not publicly
//! queryable.

use std::collections::BTreeSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::common::errors::DomainError;
use crate::common::pagination::{Page, PageParams};
use crate::domains::catalog::models::{Listing, ListingStatus};
use crate::kernel::traits::BaseRecords;
use crate::kernel::EngineDeps;

/// Resolved sort order. Ties always break by id ascending so the order is
/// total and pagination is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    DaAsc,
    DaDesc,
    DrAsc,
    DrDesc,
    #[default]
    Newest,
}

impl std::str::FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "da_asc" => Ok(SortKey::DaAsc),
            "da_desc" => Ok(SortKey::DaDesc),
            "dr_asc" => Ok(SortKey::DrAsc),
            "dr_desc" => Ok(SortKey::DrDesc),
            "newest" => Ok(SortKey::Newest),
            _ => Err(anyhow::anyhow!("Invalid sort key: {}", s)),
        }
    }
}

/// Filter/sort/pagination specification for the public catalog.
///
/// Absent filters are no-ops; numeric ranges are inclusive on both ends.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub min_da: Option<u8>,
    pub max_da: Option<u8>,
    pub min_dr: Option<u8>,
    pub max_dr: Option<u8>,
    pub min_traffic: Option<u64>,
    pub categories: Option<BTreeSet<String>>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub languages: Option<BTreeSet<String>>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub struct QueryEngine {
    listings: Arc<dyn BaseRecords<Listing>>,
    default_page_size: u32,
    max_page_size: u32,
}

impl QueryEngine {
    pub fn new(deps: &EngineDeps, default_page_size: u32, max_page_size: u32) -> Self {
        Self {
            listings: deps.listings.clone(),
            default_page_size,
            max_page_size,
        }
    }

    /// Execute a query against the current snapshot of the store.
    pub async fn search(&self, query: &ListingQuery) -> Result<Page<Listing>, DomainError> {
        let snapshot = self.listings.scan().await?;
        let page_size = query
            .page_size
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size);
        let params = PageParams::new(query.page.unwrap_or(1), page_size);
        Ok(run_query(snapshot, query, params))
    }
}

/// Pure query execution over a snapshot: filter, sort, window.
pub fn run_query(snapshot: Vec<Listing>, query: &ListingQuery, params: PageParams) -> Page<Listing> {
    let mut matched: Vec<Listing> = snapshot
        .into_iter()
        .filter(|listing| listing.status == ListingStatus::Approved)
        .filter(|listing| matches_filters(listing, query))
        .collect();

    sort_listings(&mut matched, query.sort.unwrap_or_default());
    Page::from_items(matched, params)
}

fn matches_filters(listing: &Listing, query: &ListingQuery) -> bool {
    let da = listing.metrics.da;
    let dr = listing.metrics.dr.value;

    if query.min_da.is_some_and(|min| da < min) {
        return false;
    }
    if query.max_da.is_some_and(|max| da > max) {
        return false;
    }
    if query.min_dr.is_some_and(|min| dr < min) {
        return false;
    }
    if query.max_dr.is_some_and(|max| dr > max) {
        return false;
    }
    if query.min_traffic.is_some_and(|min| listing.metrics.traffic < min) {
        return false;
    }
    if query.price_min.is_some_and(|min| listing.price < min) {
        return false;
    }
    if query.price_max.is_some_and(|max| listing.price > max) {
        return false;
    }

    // Set filters: OR within the set, skipped when empty
    if let Some(categories) = &query.categories {
        if !categories.is_empty() && !categories.contains(&listing.category) {
            return false;
        }
    }
    if let Some(languages) = &query.languages {
        if !languages.is_empty() && !languages.contains(&listing.language.primary) {
            return false;
        }
    }

    if let Some(search) = &query.search {
        let needle = search.trim().to_lowercase();
        if !needle.is_empty() {
            let domain = listing.website.domain.to_lowercase();
            let category = listing.category.to_lowercase();
            if !domain.contains(&needle) && !category.contains(&needle) {
                return false;
            }
        }
    }

    true
}

fn sort_listings(listings: &mut [Listing], sort: SortKey) {
    listings.sort_by(|a, b| {
        let ordering = match sort {
            SortKey::PriceAsc => a.price.cmp(&b.price),
            SortKey::PriceDesc => b.price.cmp(&a.price),
            SortKey::DaAsc => a.metrics.da.cmp(&b.metrics.da),
            SortKey::DaDesc => b.metrics.da.cmp(&a.metrics.da),
            SortKey::DrAsc => a.metrics.dr.value.cmp(&b.metrics.dr.value),
            SortKey::DrDesc => b.metrics.dr.value.cmp(&a.metrics.dr.value),
            SortKey::Newest => b.created_at.cmp(&a.created_at),
        };
        // Deterministic total order
        ordering.then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domains::catalog::validate::tests::valid_draft;
    use crate::domains::catalog::models::ListingDraft;

    fn approved(build: impl FnOnce(&mut ListingDraft)) -> Listing {
        let mut draft = valid_draft();
        build(&mut draft);
        let mut listing = Listing::from_draft(draft);
        listing.status = ListingStatus::Approved;
        listing
    }

    fn snapshot() -> Vec<Listing> {
        vec![
            approved(|d| {
                d.website.domain = "alpha.com".to_string();
                d.price = Decimal::from(50);
                d.metrics.da = 30;
                d.metrics.dr.value = 20;
                d.metrics.traffic = 1_000;
            }),
            approved(|d| {
                d.website.domain = "beta.io".to_string();
                d.category = "finance".to_string();
                d.price = Decimal::from(200);
                d.metrics.da = 70;
                d.metrics.dr.value = 80;
                d.metrics.traffic = 90_000;
                d.language.primary = "de".to_string();
            }),
            approved(|d| {
                d.website.domain = "gamma.net".to_string();
                d.price = Decimal::from(120);
                d.metrics.da = 55;
                d.metrics.dr.value = 60;
                d.metrics.traffic = 40_000;
            }),
        ]
    }

    fn all(params_page_size: u32) -> PageParams {
        PageParams::new(1, params_page_size)
    }

    #[test]
    fn test_only_approved_listings_are_candidates() {
        let mut listings = snapshot();
        listings.push(Listing::from_draft(valid_draft())); // pending
        let page = run_query(listings, &ListingQuery::default(), all(10));
        assert_eq!(page.meta.total_items, 3);
        assert!(page
            .data
            .iter()
            .all(|listing| listing.status == ListingStatus::Approved));
    }

    #[test]
    fn test_numeric_ranges_are_inclusive() {
        let query = ListingQuery {
            min_da: Some(30),
            max_da: Some(55),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        let domains: Vec<&str> = page
            .data
            .iter()
            .map(|listing| listing.website.domain.as_str())
            .collect();
        assert_eq!(domains.len(), 2);
        assert!(domains.contains(&"alpha.com"));
        assert!(domains.contains(&"gamma.net"));
    }

    #[test]
    fn test_set_filters_use_or_semantics_and_skip_when_empty() {
        let query = ListingQuery {
            categories: Some(BTreeSet::from(["finance".to_string(), "health".to_string()])),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.meta.total_items, 1);
        assert_eq!(page.data[0].category, "finance");

        let query = ListingQuery {
            categories: Some(BTreeSet::new()),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.meta.total_items, 3);
    }

    #[test]
    fn test_language_filter_uses_or_semantics_and_skips_when_empty() {
        let query = ListingQuery {
            languages: Some(BTreeSet::from(["de".to_string(), "fr".to_string()])),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.meta.total_items, 1);
        assert_eq!(page.data[0].language.primary, "de");

        let query = ListingQuery {
            languages: Some(BTreeSet::new()),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.meta.total_items, 3);
    }

    #[test]
    fn test_min_traffic_and_dr_bounds_are_inclusive() {
        // gamma.net sits exactly on both boundaries
        let query = ListingQuery {
            min_traffic: Some(40_000),
            min_dr: Some(60),
            max_dr: Some(80),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        let domains: Vec<&str> = page
            .data
            .iter()
            .map(|listing| listing.website.domain.as_str())
            .collect();
        assert_eq!(domains.len(), 2);
        assert!(domains.contains(&"beta.io"));
        assert!(domains.contains(&"gamma.net"));

        let query = ListingQuery {
            min_traffic: Some(40_001),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.meta.total_items, 1);
        assert_eq!(page.data[0].website.domain, "beta.io");
    }

    #[test]
    fn test_dr_sort_orders_both_ways() {
        let query = ListingQuery {
            sort: Some(SortKey::DrAsc),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        let values: Vec<u8> = page
            .data
            .iter()
            .map(|listing| listing.metrics.dr.value)
            .collect();
        assert_eq!(values, vec![20, 60, 80]);

        let query = ListingQuery {
            sort: Some(SortKey::DrDesc),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.data[0].metrics.dr.value, 80);
    }

    #[test]
    fn test_search_is_case_insensitive_over_domain_and_category() {
        let query = ListingQuery {
            search: Some("BETA".to_string()),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.meta.total_items, 1);

        let query = ListingQuery {
            search: Some("FINANCE".to_string()),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.meta.total_items, 1);

        // Whitespace-only search is a no-op
        let query = ListingQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.meta.total_items, 3);
    }

    #[test]
    fn test_price_sort_orders_both_ways() {
        let query = ListingQuery {
            sort: Some(SortKey::PriceAsc),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        let prices: Vec<Decimal> = page.data.iter().map(|listing| listing.price).collect();
        assert_eq!(
            prices,
            vec![Decimal::from(50), Decimal::from(120), Decimal::from(200)]
        );

        let query = ListingQuery {
            sort: Some(SortKey::PriceDesc),
            ..Default::default()
        };
        let page = run_query(snapshot(), &query, all(10));
        assert_eq!(page.data[0].price, Decimal::from(200));
    }

    #[test]
    fn test_equal_sort_keys_break_ties_by_id_ascending() {
        let listings: Vec<Listing> = (0..4)
            .map(|_| approved(|d| d.price = Decimal::from(99)))
            .collect();
        let query = ListingQuery {
            sort: Some(SortKey::PriceAsc),
            ..Default::default()
        };
        let page = run_query(listings, &query, all(10));
        for window in page.data.windows(2) {
            assert!(window[0].id < window[1].id);
        }
    }

    #[test]
    fn test_page_beyond_total_degrades_to_empty() {
        let query = ListingQuery::default();
        let page = run_query(snapshot(), &query, PageParams::new(7, 2));
        assert!(page.data.is_empty());
        assert_eq!(page.meta.total_items, 3);
        assert_eq!(page.meta.total_pages, 2);
        assert_eq!(page.meta.current_page, 7);
    }
}
