use common::{UserCreateRequest, UserDeleteResponse, UserListResponse, UserRecord, UserUpdateRequest};

use crate::api_client;

/// List accounts; deactivated ones only when `include_inactive`
pub async fn list_users(include_inactive: bool) -> Result<UserListResponse, String> {
    log::trace!("Fetching accounts (include_inactive={})", include_inactive);
    let endpoint = format!("/usuarios?include_inactive={}", include_inactive);
    let result = api_client::get::<UserListResponse>(&endpoint).await;
    match &result {
        Ok(list) => log::info!("Fetched {} accounts", list.total),
        Err(e) => log::error!("Failed to fetch accounts: {}", e),
    }
    result
}

pub async fn create_user(request: &UserCreateRequest) -> Result<UserRecord, String> {
    log::debug!("Creating account {}", request.email);
    api_client::post("/usuarios", request).await
}

pub async fn update_user(id: &str, request: &UserUpdateRequest) -> Result<UserRecord, String> {
    log::debug!("Updating account {}", id);
    api_client::put(&format!("/usuarios/{}", id), request).await
}

/// Deactivate an account; it stays listed as inactive
pub async fn deactivate_user(id: &str) -> Result<UserDeleteResponse, String> {
    log::debug!("Deactivating account {}", id);
    api_client::delete(&format!("/usuarios/{}", id)).await
}
