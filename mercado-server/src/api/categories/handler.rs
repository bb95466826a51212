//! Category API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::categories;
use shared::AppResult;
use shared::models::Category;

/// GET /api/categories - 获取所有分类（可为空）
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = categories::find_all(state.pool()).await?;
    Ok(Json(categories))
}
