use std::collections::BTreeSet;
use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::pagination::Page;
use crate::common::ListingId;
use crate::domains::catalog::models::{Listing, ListingDraft, ListingPatch, ListingStatus};
use crate::domains::catalog::{ImportOutcome, ListingQuery, RawRow, SortKey};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::routes::actor_from_headers;

/// Query-string shape of the public catalog search. Set filters arrive as
/// comma-separated values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSearchParams {
    pub min_da: Option<u8>,
    pub max_da: Option<u8>,
    pub min_dr: Option<u8>,
    pub max_dr: Option<u8>,
    pub min_traffic: Option<u64>,
    pub categories: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub languages: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

fn csv_set(raw: Option<String>) -> Option<BTreeSet<String>> {
    raw.map(|csv| {
        csv.split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    })
}

impl ListingSearchParams {
    fn into_query(self) -> Result<ListingQuery, ApiError> {
        let sort = self
            .sort
            .map(|raw| SortKey::from_str(&raw).map_err(|err| ApiError::bad_request("sort", err)))
            .transpose()?;

        Ok(ListingQuery {
            min_da: self.min_da,
            max_da: self.max_da,
            min_dr: self.min_dr,
            max_dr: self.max_dr,
            min_traffic: self.min_traffic,
            categories: csv_set(self.categories),
            price_min: self.price_min,
            price_max: self.price_max,
            languages: csv_set(self.languages),
            search: self.search,
            sort,
            page: self.page,
            page_size: self.page_size,
        })
    }
}

/// GET /api/listings
pub async fn search_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingSearchParams>,
) -> Result<Json<Page<Listing>>, ApiError> {
    let query = params.into_query()?;
    let page = state.query.search(&query).await?;
    Ok(Json(page))
}

/// POST /api/listings
pub async fn create_listing(
    State(state): State<AppState>,
    Json(draft): Json<ListingDraft>,
) -> Result<(StatusCode, Json<Listing>), ApiError> {
    let listing = state.listings.create(draft).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/listings/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, ApiError> {
    let id = parse_listing_id(&id)?;
    Ok(Json(state.listings.get(id).await?))
}

/// PATCH /api/listings/{id}
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ListingPatch>,
) -> Result<Json<Listing>, ApiError> {
    let id = parse_listing_id(&id)?;
    Ok(Json(state.listings.update(id, patch).await?))
}

/// DELETE /api/listings/{id}
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_listing_id(&id)?;
    state.listings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    /// Accepted case-insensitively: `PENDING`, `approved`, ...
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub id: ListingId,
    pub status: ListingStatus,
    pub message: String,
}

/// PATCH /api/listings/{id}/status
pub async fn set_listing_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, ApiError> {
    let actor = actor_from_headers(&headers)?;
    let id = parse_listing_id(&id)?;
    let target = ListingStatus::from_str(&request.status)
        .map_err(|err| ApiError::bad_request("status", err))?;

    let listing = state.listing_lifecycle.set_status(id, target, &actor).await?;
    Ok(Json(StatusUpdateResponse {
        id: listing.id,
        status: listing.status,
        message: format!("listing status is now {}", listing.status),
    }))
}

/// POST /api/listings/import
pub async fn import_listings(
    State(state): State<AppState>,
    Json(rows): Json<Vec<RawRow>>,
) -> Result<Json<ImportOutcome>, ApiError> {
    let outcome = state.import.run(rows).await?;
    Ok(Json(outcome))
}

fn parse_listing_id(raw: &str) -> Result<ListingId, ApiError> {
    ListingId::parse(raw).map_err(|err| ApiError::bad_request("id", err))
}
