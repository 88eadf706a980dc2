use axum::{extract::State, http::StatusCode, Json};

use crate::domains::auth::models::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, RotateKeyResponse,
};
use crate::shared::errors::AuthError;
use crate::shared::middleware::ApiKey;
use crate::shared::services::AppState;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User and account created", body = RegisterResponse),
        (status = 400, description = "Bad request (email already exists)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), (StatusCode, Json<serde_json::Value>)> {
    let user = app_state
        .auth_state
        .auth_service
        .register(request)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.into(),
            message: "User created successfully".to_string(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<serde_json::Value>)> {
    let user = app_state
        .auth_state
        .auth_service
        .login(&request.email, &request.password)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(LoginResponse {
        user: user.into(),
        message: "Login successful".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/rotate-key",
    responses(
        (status = 200, description = "New API key issued", body = RotateKeyResponse),
        (status = 401, description = "Invalid or missing API key"),
        (status = 500, description = "Internal server error")
    ),
    security(("ApiKeyAuth" = [])),
    tag = "Auth"
)]
pub async fn rotate_key(
    State(app_state): State<AppState>,
    ApiKey(api_key): ApiKey,
) -> Result<Json<RotateKeyResponse>, (StatusCode, Json<serde_json::Value>)> {
    let new_key = app_state
        .auth_state
        .auth_service
        .rotate_api_key(&api_key)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(RotateKeyResponse {
        api_key: new_key,
        message: "API key rotated successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/auth/account",
    responses(
        (status = 200, description = "Account closed"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 500, description = "Internal server error")
    ),
    security(("ApiKeyAuth" = [])),
    tag = "Auth"
)]
pub async fn close_account(
    State(app_state): State<AppState>,
    ApiKey(api_key): ApiKey,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .auth_state
        .auth_service
        .close_account(&api_key)
        .await
        .map_err(|e: AuthError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(serde_json::json!({
        "message": "Account closed successfully"
    })))
}
