//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::products;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use shared::models::{Product, ProductCreate};
use shared::{AppError, AppResult};

#[derive(serde::Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let products = products::find_all(state.pool()).await?;
    Ok(Json(products))
}

/// GET /api/products/search?q=xxx - 搜索商品（名称/描述，最多 20 条）
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = products::search(state.pool(), &query.q).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let product = products::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(Json(product))
}

/// POST /api/products - 创建商品（初始库存默认 0）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    if payload.price < 0.0 {
        return Err(AppError::validation("price must not be negative"));
    }
    if payload.remaining.is_some_and(|r| r < 0) {
        return Err(AppError::validation("remaining must not be negative"));
    }

    let product = products::create(state.pool(), payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
