//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{orders, users};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use shared::models::{CustomerOrder, ProfileUpdate, UserProfile};
use shared::{AppError, AppResult};

/// GET /api/customers - 获取所有客户
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserProfile>>> {
    let customers = users::list_customers(state.pool()).await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id - 获取客户资料
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserProfile>> {
    let profile = users::find_customer_profile(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;
    Ok(Json(profile))
}

/// PUT /api/customers/:id - 更新客户资料（缺省字段保持原值）
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<UserProfile>> {
    if let Some(email) = &payload.email {
        validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    }
    validate_optional_text(&payload.phonenumber, "phonenumber", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let profile = users::update_customer_profile(state.pool(), id, &payload).await?;
    Ok(Json(profile))
}

/// GET /api/customers/:id/orders - 客户订单历史（按下单时间倒序）
pub async fn order_history(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<CustomerOrder>>> {
    let history = orders::list_customer_orders(state.pool(), id).await?;
    Ok(Json(history))
}
