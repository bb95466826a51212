//! Order API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::core::ServerState;
use crate::db::repository::orders;
use crate::utils::validation::validate_payment_method;
use shared::models::{PlaceCartOrderRequest, PlaceOrderRequest};
use shared::response::OrderCreated;
use shared::{AppError, AppResult};

fn missing_fields() -> AppError {
    AppError::validation("Missing required fields")
}

/// POST /api/orders - 下单（单商品，隐含数量 1）
pub async fn place(
    State(state): State<ServerState>,
    Json(req): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderCreated>)> {
    let customer_id = req.customer_id.ok_or_else(missing_fields)?;
    let product_id = req.product_id.ok_or_else(missing_fields)?;
    let payment_method = req
        .payment_method
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(missing_fields)?;
    validate_payment_method(payment_method)?;

    let order_id = orders::place_order(state.pool(), customer_id, product_id, payment_method).await?;

    Ok((StatusCode::CREATED, Json(OrderCreated::new(order_id))))
}

/// POST /api/orders/cart - 下单（购物车，多商品）
pub async fn place_cart(
    State(state): State<ServerState>,
    Json(req): Json<PlaceCartOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderCreated>)> {
    let customer_id = req.customer_id.ok_or_else(missing_fields)?;
    let items = req.products.ok_or_else(missing_fields)?;
    let payment_method = req
        .payment_method
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(missing_fields)?;
    validate_payment_method(payment_method)?;

    let order_id =
        orders::place_cart_order(state.pool(), customer_id, &items, payment_method).await?;

    Ok((StatusCode::CREATED, Json(OrderCreated::new(order_id))))
}
