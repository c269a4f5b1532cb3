use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use crate::common::OrderId;
use crate::domains::orders::models::{Order, OrderStatus, PaymentStatus};
use crate::domains::orders::CreateOrder;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::routes::actor_from_headers;

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateOrder>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let buyer = actor_from_headers(&headers)?;
    let order = state.orders.create_order(input, &buyer).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_order_id(&id)?;
    Ok(Json(state.orders.get(id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusRequest {
    pub status: String,
    /// Required when `status` is `completed`
    pub published_url: Option<String>,
}

/// PATCH /api/orders/{id}/status
pub async fn set_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<OrderStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let actor = actor_from_headers(&headers)?;
    let id = parse_order_id(&id)?;
    let target = OrderStatus::from_str(&request.status)
        .map_err(|err| ApiError::bad_request("status", err))?;

    let order = state
        .orders
        .set_status(id, target, request.published_url, &actor)
        .await?;
    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    pub status: String,
}

/// PATCH /api/orders/{id}/payment
///
/// Called by the payment collaborator; carries no actor headers.
pub async fn set_payment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PaymentStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_order_id(&id)?;
    let target = PaymentStatus::from_str(&request.status)
        .map_err(|err| ApiError::bad_request("status", err))?;
    Ok(Json(state.orders.set_payment_status(id, target).await?))
}

fn parse_order_id(raw: &str) -> Result<OrderId, ApiError> {
    OrderId::parse(raw).map_err(|err| ApiError::bad_request("id", err))
}
