use crate::handlers::{
    auth::login,
    health::health_check,
    history::list_history,
    predict::predict,
    users::{create_user, deactivate_user, get_user, list_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Must exceed the browser's 120 s abort.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(130);

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", post(login))
        .route("/predict", post(predict))
        .route("/previsoes", get(list_history))
        .route("/usuarios", get(list_users).post(create_user))
        .route(
            "/usuarios/:id",
            get(get_user).put(update_user).delete(deactivate_user),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
