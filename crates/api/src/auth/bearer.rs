//! Bearer token extraction from request headers

use axum::http::{header::AUTHORIZATION, HeaderMap};

use super::jwt::{Claims, JwtError, JwtManager};
use crate::error::{ApiError, ApiResult};

/// Read the token from the `Authorization` header
///
/// Accepts both `Bearer <token>` and a bare token. Header names are
/// case-insensitive, so `authorization` and `Authorization` both match.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Validate the request's bearer token
///
/// A missing or malformed token is `Unauthorized`; a well-formed token past
/// its expiry is `InvalidToken` so clients can tell they need to log in again.
pub fn authenticate(jwt: &JwtManager, headers: &HeaderMap) -> ApiResult<Claims> {
    let token = extract_bearer_token(headers).ok_or(ApiError::Unauthorized)?;

    jwt.validate_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Bearer token rejected");
        match e {
            JwtError::Expired => ApiError::InvalidToken,
            _ => ApiError::Unauthorized,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert("authorization", HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn test_extract_with_and_without_prefix() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer_token(&headers("abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer_token(&headers("Bearer ")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_authenticate_roundtrip() {
        let jwt = JwtManager::new("test-secret-key-at-least-32-chars!", 1);
        let user_id = Uuid::new_v4();
        let token = jwt.generate_token(user_id, "a@b.co").unwrap();

        let claims = authenticate(&jwt, &headers(&format!("Bearer {token}"))).unwrap();
        assert_eq!(claims.sub, user_id);

        assert!(matches!(
            authenticate(&jwt, &headers("Bearer nope")),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_is_invalid_token() {
        let jwt = JwtManager::new("test-secret-key-at-least-32-chars!", -1);
        let token = jwt.generate_token(Uuid::new_v4(), "a@b.co").unwrap();

        let err = authenticate(&jwt, &headers(&format!("Bearer {token}"))).unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
