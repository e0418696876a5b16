use auth::JwtError;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Middleware that validates JWT tokens and adds user info to request extensions
///
/// The downstream handler only runs when a token was presented and every
/// validation step passed.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token(&req).ok_or_else(|| {
        tracing::debug!(uri = %req.uri(), "Request without token rejected");
        unauthorized("Missing authentication token")
    })?;

    // Validate token and extract claims (from auth library)
    let claims = state.authenticator.validate_token(&token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        unauthorized(rejection_reason(&e))
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse user ID from token");
        unauthorized("Invalid token format")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Find the presented token: `?token=` wins over the `Authorization` header.
pub fn extract_token(req: &Request) -> Option<String> {
    token_from_query(req.uri()).or_else(|| token_from_header(req.headers()))
}

/// First `token` pair wins when the parameter is repeated.
fn token_from_query(uri: &Uri) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;

    pairs
        .into_iter()
        .find(|(key, _)| key == "token")
        .map(|(_, token)| token)
        .filter(|token| !token.is_empty())
}

/// Accepts exactly `Bearer <token>`; any other shape counts as no token.
fn token_from_header(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut segments = value.split(' ');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token.to_string()),
        _ => None,
    }
}

fn rejection_reason(error: &JwtError) -> &'static str {
    match error {
        JwtError::MalformedToken(_) => "Malformed token",
        JwtError::UnexpectedAlgorithm(_) => "Unexpected signing algorithm",
        JwtError::InvalidSignature => "Invalid token signature",
        JwtError::TokenExpired => "Token has expired",
        JwtError::EncodingFailed(_) | JwtError::InvalidKey(_) => "Invalid token",
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "status": StatusCode::UNAUTHORIZED.as_u16(),
            "error": {
                "unauthorized": message
            }
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http_body_util::BodyExt;

    use super::*;

    fn request(uri: &str, authorization: Option<&str>) -> Request {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_header() {
        let req = request("/api/protected/profile", Some("Bearer abc.def.ghi"));
        assert_eq!(extract_token(&req), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_query_takes_precedence() {
        let req = request("/api/protected/profile?token=from.query.param", Some("Bearer from.header.value"));
        assert_eq!(extract_token(&req), Some("from.query.param".to_string()));
    }

    #[test]
    fn test_repeated_query_token_uses_first() {
        let req = request(
            "/api/protected/profile?token=first.tok.en&token=second.tok.en",
            Some("Bearer from.header.value"),
        );
        assert_eq!(extract_token(&req), Some("first.tok.en".to_string()));
    }

    #[test]
    fn test_query_token_among_other_params() {
        let req = request("/api/protected/profile?page=2&token=abc.def.ghi&page=3", None);
        assert_eq!(extract_token(&req), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_empty_query_falls_back_to_header() {
        let req = request("/api/protected/profile?token=", Some("Bearer from.header.value"));
        assert_eq!(extract_token(&req), Some("from.header.value".to_string()));
    }

    #[test]
    fn test_malformed_headers_count_as_absent() {
        for value in [
            "Bearer",
            "Bearer ",
            "bearer abc",
            "Basic abc",
            "Bearer abc def",
            "Bearer  abc",
            "abc",
        ] {
            let req = request("/api/protected/profile", Some(value));
            assert_eq!(extract_token(&req), None, "header {:?}", value);
        }
    }

    #[test]
    fn test_no_credentials() {
        let req = request("/api/protected/profile?page=2", None);
        assert_eq!(extract_token(&req), None);
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(rejection_reason(&JwtError::TokenExpired), "Token has expired");
        assert_eq!(
            rejection_reason(&JwtError::InvalidSignature),
            "Invalid token signature"
        );
        assert_eq!(
            rejection_reason(&JwtError::MalformedToken("bad base64".to_string())),
            "Malformed token"
        );
    }

    #[tokio::test]
    async fn test_unauthorized_body() {
        let response = unauthorized("Token has expired");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 401);
        assert_eq!(body["error"]["unauthorized"], "Token has expired");
    }
}
