use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{Json, Response},
};

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;

/// Authenticated principal extracted from the bearer JWT.
///
/// Every scoped handler and repository call takes this explicitly; there is
/// no ambient "current user" state anywhere else.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.sub,
        }
    }
}

/// JWT authentication middleware that validates tokens and injects the principal
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (axum::http::StatusCode, Json<serde_json::Value>)> {
    let token = extract_jwt_from_headers(&headers).map_err(unauthorized)?;

    let claims = validate_jwt(&token).map_err(|msg| {
        tracing::debug!("Rejected bearer token: {}", msg);
        // Uniform 401 regardless of why validation failed
        unauthorized("Invalid or expired token".to_string())
    })?;

    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

fn unauthorized(msg: String) -> (axum::http::StatusCode, Json<serde_json::Value>) {
    let api_error = ApiError::unauthorized(msg);
    (api_error.status_code(), Json(api_error.to_json()))
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_jwt_from_headers(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        let headers = HeaderMap::new();
        assert!(extract_jwt_from_headers(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Token abc"));
        assert!(extract_jwt_from_headers(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(extract_jwt_from_headers(&headers).is_err());
    }
}
