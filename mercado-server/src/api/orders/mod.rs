//! Order API 模块
//!
//! 下单接口。两条写路径都走 [`crate::db::repository::orders`] 的
//! 事务化工作流；读路径（订单历史）挂在 customers 路由下。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Single-product order (implicit quantity 1)
        .route("/", post(handler::place))
        // Multi-product cart order
        .route("/cart", post(handler::place_cart))
}
