use axum::{
    Json, async_trait,
    extract::{FromRequestParts, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use axum_valid::Valid;
use common::{AccessDecision, LoginResponse, RouteAccess, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::schemas::{ApiError, ApiFailure, AppState, failure};

/// Request body for `POST /auth/login`
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct LoginBody {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub senha: String,
}

/// User behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserRecord);

impl AuthUser {
    /// Rejects the request with 403 unless the user satisfies `access`.
    pub fn require(&self, access: &RouteAccess) -> Result<(), ApiFailure> {
        match access.check(Some(&self.0)) {
            AccessDecision::Granted => Ok(()),
            _ => {
                warn!("User {} ({:?}) denied, requires {:?}", self.0.email, self.0.role, access);
                Err(failure(
                    StatusCode::FORBIDDEN,
                    "Seu perfil não tem permissão para esta operação",
                ))
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiFailure;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "Não autenticado"))?;

        let user = match state.sessions.get(token).await {
            Some(user_id) => state.directory.read().await.active(&user_id),
            None => None,
        };

        match user {
            Some(user) => Ok(AuthUser(user)),
            None => {
                debug!("Rejected unknown, expired or deactivated session");
                state.sessions.invalidate(token).await;
                Err(failure(StatusCode::UNAUTHORIZED, "Sessão inválida ou expirada"))
            }
        }
    }
}

/// Opaque random token; not a signed JWT.
fn issue_token() -> String {
    format!("dc.{}", Uuid::new_v4().simple())
}

/// Exchange account credentials for an access token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Token issued; body is {access_token, token_type, expires_in, user}"),
        (status = 400, description = "Malformed e-mail or empty password"),
        (status = 401, description = "Unknown account, wrong password or deactivated account", body = ApiError)
    )
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Valid(Json(body)): Valid<Json<LoginBody>>,
) -> Result<Json<LoginResponse>, ApiFailure> {
    debug!("Login attempt for {}", body.email);
    let user = state
        .directory
        .read()
        .await
        .authenticate(&body.email, &body.senha)
        .map_err(|e| {
            warn!("Failed login attempt: {}", e);
            failure(e.status(), e.to_string())
        })?;

    let token = issue_token();
    let user_id = user.id_usuario.clone().unwrap_or_default();
    state.sessions.insert(token.clone(), user_id).await;
    info!("Issued session for {} ({})", user.email, user.role.label());

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        expires_in: Some(state.session_ttl.as_secs()),
        user,
    }))
}
