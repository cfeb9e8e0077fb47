use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{StubConfig, initialize_app_state};
use crate::router::create_router;

pub async fn serve(config: &StubConfig, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("DemandCast API stub starting up");
    debug!("Bind address: {}", bind_address);
    debug!(
        "Session TTL: {:?}, history capacity: {}",
        config.session_ttl, config.history_capacity
    );

    let state = initialize_app_state(config);
    debug!(
        "Application state initialized with {} accounts",
        state.directory.read().await.list(true).len()
    );

    let app = create_router(state);
    debug!("Router created successfully");

    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("DemandCast API stub running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
