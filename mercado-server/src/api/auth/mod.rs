//! Authentication Routes
//!
//! - /auth/register, /auth/login: public
//! - /auth/profile: bearer token required

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::auth_middleware;
use crate::core::ServerState;

pub fn router(state: ServerState) -> Router<ServerState> {
    Router::new().nest("/auth", routes(state))
}

fn routes(state: ServerState) -> Router<ServerState> {
    // 公开路由：注册和登录
    let public = Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login));

    // 受保护路由：需要有效的 Bearer token
    let protected = Router::new()
        .route("/profile", get(handler::profile))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
