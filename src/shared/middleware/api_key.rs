use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use serde_json::json;

/// Bearer credential pulled from the `X-Api-Key` header.
///
/// Extraction only checks presence; resolving the key to a user is the
/// resolver's job, so a bogus key still reaches the service layer and fails
/// there as `Unauthorized`.
///
/// Usage:
/// ```ignore
/// pub async fn buy(
///     State(app_state): State<AppState>,
///     ApiKey(api_key): ApiKey,
///     Json(request): Json<TradeRequest>,
/// ) -> Result<...> {
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiKey(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get("X-Api-Key")
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    axum::Json(json!({ "error": "Invalid or missing API key: X-Api-Key=YOUR-API-KEY" })),
                )
            })?
            .to_str()
            .map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    axum::Json(json!({ "error": "Invalid X-Api-Key header" })),
                )
            })?;

        Ok(ApiKey(api_key.to_string()))
    }
}
