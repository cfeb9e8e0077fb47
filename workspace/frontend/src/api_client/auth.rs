use common::{LoginRequest, LoginResponse};
use crate::api_client;

/// Exchange credentials for an access token
pub async fn login(request: LoginRequest) -> Result<LoginResponse, String> {
    log::debug!("Logging in as {}", request.email);
    let result = api_client::post::<LoginResponse, _>("/auth/login", &request).await;
    match &result {
        Ok(response) => log::info!("Login succeeded for {}", response.user.email),
        Err(e) => log::error!("Login failed: {}", e),
    }
    result
}
