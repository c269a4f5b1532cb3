//! Application setup and router configuration.

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::catalog::{
    CategoryStore, ImportPipeline, ListingLifecycle, ListingStore, QueryEngine,
};
use crate::domains::orders::OrderLifecycle;
use crate::kernel::EngineDeps;
use crate::server::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<ListingStore>,
    pub categories: Arc<CategoryStore>,
    pub query: Arc<QueryEngine>,
    pub listing_lifecycle: Arc<ListingLifecycle>,
    pub orders: Arc<OrderLifecycle>,
    pub import: Arc<ImportPipeline>,
}

impl AppState {
    pub fn new(deps: EngineDeps, config: &Config) -> Self {
        let listings = Arc::new(ListingStore::new(&deps));
        Self {
            categories: Arc::new(CategoryStore::new(&deps)),
            query: Arc::new(QueryEngine::new(
                &deps,
                config.default_page_size,
                config.max_page_size,
            )),
            listing_lifecycle: Arc::new(ListingLifecycle::new(&deps)),
            orders: Arc::new(OrderLifecycle::new(&deps)),
            import: Arc::new(ImportPipeline::new(listings.clone())),
            listings,
        }
    }
}

/// Build the axum application
pub fn build_app(deps: EngineDeps, config: &Config) -> Router {
    let state = AppState::new(deps, config);

    Router::new()
        .route("/health", get(routes::health::health_handler))
        .route(
            "/api/listings",
            get(routes::listings::search_listings).post(routes::listings::create_listing),
        )
        .route(
            "/api/listings/:id",
            get(routes::listings::get_listing)
                .patch(routes::listings::update_listing)
                .delete(routes::listings::delete_listing),
        )
        .route(
            "/api/listings/:id/status",
            patch(routes::listings::set_listing_status),
        )
        .route("/api/listings/import", post(routes::listings::import_listings))
        .route(
            "/api/categories",
            get(routes::categories::list_categories).post(routes::categories::create_category),
        )
        .route(
            "/api/categories/:id",
            axum::routing::delete(routes::categories::delete_category),
        )
        .route("/api/orders", post(routes::orders::create_order))
        .route("/api/orders/:id", get(routes::orders::get_order))
        .route("/api/orders/:id/status", patch(routes::orders::set_order_status))
        .route(
            "/api/orders/:id/payment",
            patch(routes::orders::set_payment_status),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
