use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Duration;

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use common::HistoryRecord;
use moka::future::Cache;
use tokio::sync::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::{OpenApi, ToSchema};

use crate::directory::UserDirectory;
use crate::handlers::auth::LoginBody;
use crate::handlers::history::HistoryQuery;
use crate::handlers::users::{UserCreateBody, UserListQuery, UserUpdateBody};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Accounts accepted by `POST /auth/login` and managed under `/usuarios`
    pub directory: Arc<RwLock<UserDirectory>>,
    pub session_ttl: Duration,
    /// Access token -> user id
    pub sessions: Cache<String, String>,
    /// Run sequence number -> run summary
    pub history: Cache<u64, HistoryRecord>,
    pub run_counter: Arc<AtomicU64>,
}

/// Error body, `{"detail": "..."}` like the real prediction service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human readable message
    pub detail: String,
}

pub type ApiFailure = (StatusCode, Json<ApiError>);

pub fn failure(status: StatusCode, detail: impl Into<String>) -> ApiFailure {
    (status, Json(ApiError { detail: detail.into() }))
}

/// JSON body extractor reporting malformed bodies as 422 `{"detail": ...}`.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                let detail = rejection.body_text();
                warn!("Rejected request body: {}", detail);
                Err(failure(StatusCode::UNPROCESSABLE_ENTITY, detail))
            }
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Forecast runs served since startup
    pub runs_served: u64,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::login,
        crate::handlers::predict::predict,
        crate::handlers::history::list_history,
        crate::handlers::users::list_users,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::users::update_user,
        crate::handlers::users::deactivate_user,
    ),
    components(
        schemas(
            ApiError,
            HealthResponse,
            LoginBody,
            HistoryQuery,
            UserListQuery,
            UserCreateBody,
            UserUpdateBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Demo authentication"),
        (name = "forecast", description = "Synthetic forecast runs"),
        (name = "users", description = "Account management, gestão only"),
    ),
    info(
        title = "DemandCast API stub",
        description = "Local stand-in for the DemandCast prediction service. Produces deterministic synthetic forecasts.",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
