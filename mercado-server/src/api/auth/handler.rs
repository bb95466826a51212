//! Authentication Handlers
//!
//! Registration creates a Customer-role user and immediately issues a
//! token; login verifies the argon2 hash. Unknown usernames and wrong
//! passwords share one message to prevent username enumeration.

use axum::{Extension, Json, extract::State};

use crate::auth::{CurrentUser, create_token, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::users;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_text, validate_required_text,
};
use shared::models::{LoginRequest, RegisterRequest, UserProfile};
use shared::response::TokenResponse;
use shared::{AppError, AppResult};

/// POST /auth/register - 注册新客户并签发 token
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    validate_required_text(&req.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&req.phonenumber, "phonenumber", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.address, "address", MAX_ADDRESS_LEN)?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hash error: {e}")))?;

    let user_id = users::create(state.pool(), &req, &password_hash).await?;

    let token = create_token(user_id, &req.username, "Customer", &state.jwt_secret)
        .map_err(|e| AppError::internal(format!("Token issuance failed: {e}")))?;

    tracing::info!(user_id, username = %req.username, "Customer registered");
    Ok(Json(TokenResponse { token }))
}

/// POST /auth/login - 登录并签发 token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = users::find_by_username(state.pool(), &req.username)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        tracing::warn!(username = %req.username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = create_token(user.id, &user.username, &user.role, &state.jwt_secret)
        .map_err(|e| AppError::internal(format!("Token issuance failed: {e}")))?;

    Ok(Json(TokenResponse { token }))
}

/// GET /auth/profile - 当前用户资料（需要 Bearer token）
pub async fn profile(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserProfile>> {
    let profile = users::find_profile(state.pool(), current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(profile))
}
