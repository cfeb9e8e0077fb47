use serde::{Deserialize, Serialize};

use crate::auth::{Role, UserRecord};

/// Body of `POST /usuarios`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserCreateRequest {
    pub nome: String,
    pub email: String,
    pub role: Role,
    pub senha: String,
    #[serde(default = "default_active")]
    pub ativo: bool,
}

fn default_active() -> bool {
    true
}

/// Body of `PUT /usuarios/{id}`; absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

/// Response of `GET /usuarios`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UserListResponse {
    pub total: usize,
    pub usuarios: Vec<UserRecord>,
}

/// Response of `DELETE /usuarios/{id}`. Accounts are deactivated, not removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDeleteResponse {
    pub message: String,
    pub usuario_id: String,
}

/// Field-level problems of the account form, checked before it is sent.
///
/// `senha` is only required when creating an account.
pub fn account_form_problems(
    nome: &str,
    email: &str,
    senha: Option<&str>,
) -> Vec<(&'static str, &'static str)> {
    let mut problems = Vec::new();

    if nome.trim().chars().count() < 3 {
        problems.push(("nome", "Nome deve ter pelo menos 3 caracteres"));
    }

    let email = email.trim();
    if email.is_empty() {
        problems.push(("email", "E-mail é obrigatório"));
    } else if !looks_like_email(email) {
        problems.push(("email", "E-mail inválido"));
    }

    if senha.is_some_and(|senha| senha.chars().count() < 6) {
        problems.push(("senha", "Senha deve ter pelo menos 6 caracteres"));
    }

    problems
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.contains(char::is_whitespace)
        && domain.split('.').count() > 1
        && domain.split('.').all(|part| !part.is_empty())
}
