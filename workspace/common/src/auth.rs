use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

/// Token issued by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the token in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: UserRecord,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Authenticated user as returned by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    #[serde(default)]
    pub id_usuario: Option<String>,
    #[serde(default)]
    pub nome: Option<String>,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub ativo: Option<bool>,
}

impl UserRecord {
    /// Name to show in the navbar, falling back to the e-mail.
    pub fn display_name(&self) -> &str {
        self.nome.as_deref().unwrap_or(&self.email)
    }
}

/// Access roles, ordered by privilege.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Gestao,
    Analista,
    Comercial,
    /// Any role this client does not know about; it has no privileges.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Roles an account can be given.
    pub const ASSIGNABLE: [Role; 3] = [Role::Gestao, Role::Analista, Role::Comercial];

    /// Wire name, as serialized.
    pub fn key(self) -> &'static str {
        match self {
            Role::Gestao => "gestao",
            Role::Analista => "analista",
            Role::Comercial => "comercial",
            Role::Unknown => "unknown",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ASSIGNABLE.into_iter().find(|role| role.key() == key)
    }

    /// Position in the role hierarchy; higher grants more.
    pub fn level(self) -> u8 {
        match self {
            Role::Gestao => 3,
            Role::Analista => 2,
            Role::Comercial => 1,
            Role::Unknown => 0,
        }
    }

    /// Whether this role carries at least the privileges of `required`.
    pub fn has_permission(self, required: Role) -> bool {
        self.level() >= required.level()
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Gestao => "Gestão",
            Role::Analista => "Analista",
            Role::Comercial => "Comercial",
            Role::Unknown => "Desconhecido",
        }
    }
}

/// What a route demands from the current session.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAccess {
    /// Any logged-in user
    Authenticated,
    /// One of the listed roles, matched exactly
    AnyOf(Vec<Role>),
    /// The given role or any role above it
    AtLeast(Role),
}

/// Outcome of checking a session against a [`RouteAccess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    /// No session: the login page must be shown
    Unauthenticated,
    /// Logged in but the role is not allowed
    Denied,
}

impl RouteAccess {
    pub fn check(&self, user: Option<&UserRecord>) -> AccessDecision {
        let Some(user) = user else {
            return AccessDecision::Unauthenticated;
        };

        let allowed = match self {
            RouteAccess::Authenticated => true,
            RouteAccess::AnyOf(roles) => roles.contains(&user.role),
            RouteAccess::AtLeast(required) => user.role.has_permission(*required),
        };

        if allowed {
            AccessDecision::Granted
        } else {
            AccessDecision::Denied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> UserRecord {
        UserRecord {
            id_usuario: None,
            nome: Some("Ana".to_string()),
            email: "ana@demandcast.local".to_string(),
            role,
            ativo: Some(true),
        }
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(Role::Gestao.has_permission(Role::Analista));
        assert!(Role::Analista.has_permission(Role::Analista));
        assert!(!Role::Comercial.has_permission(Role::Analista));
        assert!(!Role::Unknown.has_permission(Role::Comercial));
    }

    #[test]
    fn test_role_keys_match_wire_names() {
        for role in Role::ASSIGNABLE {
            let wire = serde_json::to_string(&role).unwrap();
            assert_eq!(wire, format!("\"{}\"", role.key()));
            assert_eq!(Role::from_key(role.key()), Some(role));
        }
        assert_eq!(Role::from_key("unknown"), None);
    }

    #[test]
    fn test_unknown_role_deserializes() {
        let user: UserRecord =
            serde_json::from_str(r#"{"email":"x@y.z","role":"estagiario"}"#).unwrap();
        assert_eq!(user.role, Role::Unknown);
        assert_eq!(user.display_name(), "x@y.z");
    }

    #[test]
    fn test_route_access_decisions() {
        let analyst = user(Role::Analista);
        let sales = user(Role::Comercial);

        assert_eq!(RouteAccess::Authenticated.check(None), AccessDecision::Unauthenticated);
        assert_eq!(RouteAccess::Authenticated.check(Some(&sales)), AccessDecision::Granted);

        let at_least = RouteAccess::AtLeast(Role::Analista);
        assert_eq!(at_least.check(Some(&analyst)), AccessDecision::Granted);
        assert_eq!(at_least.check(Some(&sales)), AccessDecision::Denied);

        // exact match: a manager is not implicitly an analyst here
        let any_of = RouteAccess::AnyOf(vec![Role::Analista]);
        assert_eq!(any_of.check(Some(&user(Role::Gestao))), AccessDecision::Denied);
        assert_eq!(any_of.check(Some(&analyst)), AccessDecision::Granted);
    }

    #[test]
    fn test_login_response_defaults() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"access_token":"abc","user":{"email":"a@b.c","role":"gestao"}}"#,
        )
        .unwrap();
        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, None);
        assert_eq!(response.user.role, Role::Gestao);
    }
}
