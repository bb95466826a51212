//! Customer API 模块
//!
//! 客户列表、资料读写，以及客户的订单历史读路径。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        // Order history (empty array when the customer has no orders)
        .route("/{id}/orders", get(handler::order_history))
}
