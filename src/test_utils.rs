#[cfg(test)]
pub mod test_utils {
    use crate::config::{StubConfig, initialize_app_state};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
    use axum_test::TestServer;
    use common::LoginResponse;
    use serde_json::json;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const ANALYST: &str = "analista@demandcast.local";
    pub const MANAGER: &str = "gestao@demandcast.local";
    pub const SALES: &str = "comercial@demandcast.local";

    /// Create AppState for testing
    pub fn setup_test_app_state() -> AppState {
        initialize_app_state(&StubConfig::default())
    }

    /// Test server over a custom configuration
    pub fn setup_test_server_with(config: &StubConfig) -> TestServer {
        TestServer::new(create_router(initialize_app_state(config)))
            .expect("Failed to start test server")
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN. Keep the
    /// returned guard alive for the duration of the test.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        create_router(setup_test_app_state())
    }

    pub fn setup_test_server() -> TestServer {
        TestServer::new(setup_test_app()).expect("Failed to start test server")
    }

    /// Logs in with a demo account and returns the bearer header.
    pub async fn login_as(server: &TestServer, email: &str) -> (HeaderName, HeaderValue) {
        login_with(server, email, "demandcast").await
    }

    pub async fn login_with(
        server: &TestServer,
        email: &str,
        senha: &str,
    ) -> (HeaderName, HeaderValue) {
        let response = server
            .post("/auth/login")
            .json(&json!({ "email": email, "senha": senha }))
            .await;
        response.assert_status_ok();

        let body: LoginResponse = response.json();
        let value = HeaderValue::from_str(&format!("Bearer {}", body.access_token))
            .expect("token is a valid header value");
        (AUTHORIZATION, value)
    }
}
