use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, require_cron_secret, CronAuth, RequestId};
use crate::runs::{self, BlueskyReport, LinkedinReport};
use crate::state::AppState;

/// Error response with the fixed `{"error": "..."}` body the trigger
/// callers expect.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl ApiError {
    pub fn configuration() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Server configuration error",
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized",
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error",
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn trigger_router(auth: CronAuth) -> Router<AppState> {
    Router::new()
        .route("/api/bluesky", get(trigger_bluesky))
        .route("/api/linkedin", get(trigger_linkedin))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_cron_secret,
        ))
}

pub fn build_app(state: AppState, auth: CronAuth) -> Router {
    let public_routes = Router::new().route("/api/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(trigger_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
                    let request_id = req
                        .extensions()
                        .get::<RequestId>()
                        .map_or("-", |id| id.0.as_str());
                    tracing::info_span!(
                        "request",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id,
                    )
                })),
        )
        .with_state(state)
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

async fn trigger_bluesky(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<BlueskyReport>, ApiError> {
    runs::run_bluesky(&state).await.map(Json).map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "bluesky run failed");
        ApiError::internal()
    })
}

async fn trigger_linkedin(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<LinkedinReport>, ApiError> {
    runs::run_linkedin(&state).await.map(Json).map_err(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "linkedin run failed");
        ApiError::internal()
    })
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
