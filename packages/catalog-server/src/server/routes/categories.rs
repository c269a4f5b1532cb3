use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use crate::common::CategoryId;
use crate::domains::catalog::models::Category;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::routes::actor_from_headers;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.categories.list().await?))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let actor = actor_from_headers(&headers)?;
    let category = state
        .categories
        .create(request.name, request.description, &actor)
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let actor = actor_from_headers(&headers)?;
    let id = CategoryId::parse(&id).map_err(|err| ApiError::bad_request("id", err))?;
    state.categories.delete(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}
