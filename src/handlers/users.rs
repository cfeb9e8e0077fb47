use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_valid::Valid;
use common::{Role, RouteAccess, UserDeleteResponse, UserListResponse, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::auth::AuthUser;
use crate::directory::{AccountChanges, DirectoryError, NewAccount};
use crate::schemas::{ApiError, ApiFailure, AppState, failure};

fn managers_only(user: &AuthUser) -> Result<(), ApiFailure> {
    user.require(&RouteAccess::AtLeast(Role::Gestao))
}

fn directory_failure(error: DirectoryError) -> ApiFailure {
    warn!("User management request refused: {}", error);
    failure(error.status(), error.to_string())
}

fn known_role(role: Role) -> Result<Role, ApiFailure> {
    match role {
        Role::Unknown => Err(failure(
            StatusCode::BAD_REQUEST,
            "Perfil inválido. Use gestao, analista ou comercial",
        )),
        role => Ok(role),
    }
}

/// Query parameters for `GET /usuarios`
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Also list deactivated accounts
    #[serde(default)]
    pub include_inactive: bool,
}

/// Request body for `POST /usuarios`
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UserCreateBody {
    #[validate(length(min = 3, max = 100))]
    pub nome: String,
    #[validate(email)]
    pub email: String,
    /// `gestao`, `analista` or `comercial`
    #[schema(value_type = String)]
    pub role: Role,
    #[validate(length(min = 6, max = 50))]
    pub senha: String,
    #[serde(default = "active_by_default")]
    pub ativo: bool,
}

fn active_by_default() -> bool {
    true
}

/// Request body for `PUT /usuarios/{id}`; absent fields are kept
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct UserUpdateBody {
    #[validate(length(min = 3, max = 100))]
    pub nome: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
    pub ativo: Option<bool>,
}

/// List accounts in creation order
#[utoipa::path(
    get,
    path = "/usuarios",
    tag = "users",
    params(UserListQuery),
    responses(
        (status = 200, description = "{total, usuarios}"),
        (status = 401, description = "Missing or expired token", body = ApiError),
        (status = 403, description = "Role below gestao", body = ApiError)
    )
)]
#[instrument(skip_all, fields(user = %user.0.email))]
pub async fn list_users(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<UserListResponse>, ApiFailure> {
    managers_only(&user)?;

    let usuarios = state.directory.read().await.list(query.include_inactive);
    Ok(Json(UserListResponse { total: usuarios.len(), usuarios }))
}

/// Get one account
#[utoipa::path(
    get,
    path = "/usuarios/{id}",
    tag = "users",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "The account"),
        (status = 403, description = "Role below gestao", body = ApiError),
        (status = 404, description = "No such account", body = ApiError)
    )
)]
#[instrument(skip(user, state), fields(user = %user.0.email))]
pub async fn get_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>, ApiFailure> {
    managers_only(&user)?;

    let record = state.directory.read().await.get(&id).map_err(directory_failure)?;
    Ok(Json(record))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/usuarios",
    tag = "users",
    request_body = UserCreateBody,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid fields or e-mail already in use", body = ApiError),
        (status = 403, description = "Role below gestao", body = ApiError)
    )
)]
#[instrument(skip_all, fields(user = %user.0.email))]
pub async fn create_user(
    user: AuthUser,
    State(state): State<AppState>,
    Valid(Json(body)): Valid<Json<UserCreateBody>>,
) -> Result<(StatusCode, Json<UserRecord>), ApiFailure> {
    managers_only(&user)?;

    let account = NewAccount {
        nome: body.nome,
        email: body.email,
        role: known_role(body.role)?,
        senha: body.senha,
        ativo: body.ativo,
    };
    let created = state
        .directory
        .write()
        .await
        .create(account)
        .map_err(directory_failure)?;
    info!("Account {} created", created.email);

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an account
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    tag = "users",
    params(("id" = String, Path, description = "Account id")),
    request_body = UserUpdateBody,
    responses(
        (status = 200, description = "Updated account"),
        (status = 400, description = "Invalid fields or e-mail already in use", body = ApiError),
        (status = 403, description = "Role below gestao", body = ApiError),
        (status = 404, description = "No such account", body = ApiError)
    )
)]
#[instrument(skip(user, state, body), fields(user = %user.0.email))]
pub async fn update_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Valid(Json(body)): Valid<Json<UserUpdateBody>>,
) -> Result<Json<UserRecord>, ApiFailure> {
    managers_only(&user)?;

    let changes = AccountChanges {
        nome: body.nome,
        email: body.email,
        role: body.role.map(known_role).transpose()?,
        ativo: body.ativo,
    };
    let updated = state
        .directory
        .write()
        .await
        .update(&id, changes)
        .map_err(directory_failure)?;
    info!("Account {} updated", updated.email);

    Ok(Json(updated))
}

/// Deactivate an account; it stays listed with `ativo = false`
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    tag = "users",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "{message, usuario_id}"),
        (status = 400, description = "Attempt to deactivate the caller's own account", body = ApiError),
        (status = 403, description = "Role below gestao", body = ApiError),
        (status = 404, description = "No such account", body = ApiError)
    )
)]
#[instrument(skip(user, state), fields(user = %user.0.email))]
pub async fn deactivate_user(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserDeleteResponse>, ApiFailure> {
    managers_only(&user)?;

    let acting_id = user.0.id_usuario.clone().unwrap_or_default();
    let deactivated = state
        .directory
        .write()
        .await
        .deactivate(&id, &acting_id)
        .map_err(directory_failure)?;
    info!("Account {} deactivated", deactivated.email);

    Ok(Json(UserDeleteResponse {
        message: "Usuário desativado com sucesso".to_string(),
        usuario_id: id,
    }))
}
