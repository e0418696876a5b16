use auth::Principal;
use axum::extract::State;
use axum::Extension;
use axum::Json;

use super::login::TokenResponseData;
use super::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Mint a fresh token pair for the caller's still-valid token.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<TokenResponseData>, ApiError> {
    let principal = Principal::new(user.user_id, user.email);

    state
        .authenticator
        .refresh(&principal)
        .map(|result| Json(result.into()))
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))
}
