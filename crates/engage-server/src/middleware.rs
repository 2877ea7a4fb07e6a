use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::api::ApiError;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Shared secret gating the trigger routes.
///
/// `None` means `CRON_SECRET` is not configured; every trigger then fails
/// with a server configuration error rather than running unauthenticated.
#[derive(Clone)]
pub struct CronAuth {
    secret: Option<Arc<str>>,
}

impl CronAuth {
    #[must_use]
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.map(Arc::from),
        }
    }

    fn check(&self, token: Option<&str>) -> Result<(), ApiError> {
        let Some(secret) = self.secret.as_deref() else {
            tracing::error!("CRON_SECRET is not configured");
            return Err(ApiError::configuration());
        };
        match token {
            Some(token) if bool::from(token.as_bytes().ct_eq(secret.as_bytes())) => Ok(()),
            _ => {
                tracing::warn!(
                    has_header = token.is_some(),
                    "trigger authorization failed"
                );
                Err(ApiError::unauthorized())
            }
        }
    }
}

/// Axum middleware that extracts or generates a request ID.
///
/// Uses the incoming `x-request-id` header when present, otherwise a new
/// `UUIDv4`, and echoes it on the response.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware requiring `Authorization: Bearer <CRON_SECRET>`.
pub async fn require_cron_secret(
    State(auth): State<CronAuth>,
    req: Request,
    next: Next,
) -> Response {
    let token = extract_bearer_token(req.headers().get(AUTHORIZATION));
    match auth.check(token) {
        Ok(()) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn extract_bearer_token_accepts_valid_header() {
        let header = HeaderValue::from_static("Bearer test-token");
        assert_eq!(extract_bearer_token(Some(&header)), Some("test-token"));
    }

    #[test]
    fn extract_bearer_token_rejects_non_bearer_header() {
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn matching_secret_is_accepted() {
        let auth = CronAuth::new(Some("s3cret".to_owned()));
        assert!(auth.check(Some("s3cret")).is_ok());
    }

    #[test]
    fn prefix_of_secret_is_rejected() {
        let auth = CronAuth::new(Some("s3cret".to_owned()));
        let err = auth.check(Some("s3c")).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_secret_is_a_configuration_error() {
        let auth = CronAuth::new(None);
        let err = auth.check(Some("anything")).unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
