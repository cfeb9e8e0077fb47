//! In-memory account store behind `/auth/login` and `/usuarios`.

use axum::http::StatusCode;
use common::{Role, UserRecord};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("E-mail ou senha inválidos")]
    InvalidCredentials,

    #[error("Usuário desativado. Entre em contato com o administrador")]
    Inactive,

    #[error("Usuário {0} não encontrado")]
    NotFound(String),

    #[error("Usuário com o e-mail {0} já existe")]
    DuplicateEmail(String),

    #[error("Não é possível desativar o próprio usuário")]
    SelfDeactivation,
}

impl DirectoryError {
    pub fn status(&self) -> StatusCode {
        match self {
            DirectoryError::InvalidCredentials | DirectoryError::Inactive => StatusCode::UNAUTHORIZED,
            DirectoryError::NotFound(_) => StatusCode::NOT_FOUND,
            DirectoryError::DuplicateEmail(_) | DirectoryError::SelfDeactivation => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

/// Fields of a new account; the e-mail is matched case-insensitively.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub nome: String,
    pub email: String,
    pub role: Role,
    pub senha: String,
    pub ativo: bool,
}

/// Partial update; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub ativo: Option<bool>,
}

#[derive(Debug, Clone)]
struct Account {
    user: UserRecord,
    password: String,
}

impl Account {
    fn id(&self) -> &str {
        self.user.id_usuario.as_deref().unwrap_or_default()
    }

    fn is_active(&self) -> bool {
        self.user.ativo.unwrap_or(true)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Accounts in creation order.
#[derive(Debug, Default)]
pub struct UserDirectory {
    accounts: Vec<Account>,
}

impl UserDirectory {
    /// Seeds the directory with `users`, all sharing `password`.
    pub fn with_accounts(users: Vec<UserRecord>, password: &str) -> Self {
        let accounts = users
            .into_iter()
            .map(|user| Account { user, password: password.to_string() })
            .collect();
        Self { accounts }
    }

    fn find(&self, id: &str) -> Result<&Account, DirectoryError> {
        self.accounts
            .iter()
            .find(|account| account.id() == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    fn email_taken(&self, email: &str, except_id: Option<&str>) -> bool {
        self.accounts
            .iter()
            .any(|account| account.user.email == email && Some(account.id()) != except_id)
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<UserRecord, DirectoryError> {
        let email = normalize_email(email);
        let account = self
            .accounts
            .iter()
            .find(|account| account.user.email == email && account.password == password)
            .ok_or(DirectoryError::InvalidCredentials)?;

        if !account.is_active() {
            return Err(DirectoryError::Inactive);
        }
        Ok(account.user.clone())
    }

    /// The account behind a session, if it still exists and is active.
    pub fn active(&self, id: &str) -> Option<UserRecord> {
        self.find(id)
            .ok()
            .filter(|account| account.is_active())
            .map(|account| account.user.clone())
    }

    pub fn get(&self, id: &str) -> Result<UserRecord, DirectoryError> {
        self.find(id).map(|account| account.user.clone())
    }

    pub fn list(&self, include_inactive: bool) -> Vec<UserRecord> {
        self.accounts
            .iter()
            .filter(|account| include_inactive || account.is_active())
            .map(|account| account.user.clone())
            .collect()
    }

    pub fn create(&mut self, new: NewAccount) -> Result<UserRecord, DirectoryError> {
        let email = normalize_email(&new.email);
        if self.email_taken(&email, None) {
            return Err(DirectoryError::DuplicateEmail(email));
        }

        let user = UserRecord {
            id_usuario: Some(Uuid::new_v4().to_string()),
            nome: Some(new.nome.trim().to_string()),
            email,
            role: new.role,
            ativo: Some(new.ativo),
        };
        debug!("Created account {} ({})", user.email, user.role.label());
        self.accounts.push(Account { user: user.clone(), password: new.senha });
        Ok(user)
    }

    pub fn update(&mut self, id: &str, changes: AccountChanges) -> Result<UserRecord, DirectoryError> {
        let email = changes.email.as_deref().map(normalize_email);
        self.find(id)?;
        if let Some(email) = &email {
            if self.email_taken(email, Some(id)) {
                return Err(DirectoryError::DuplicateEmail(email.clone()));
            }
        }

        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.id() == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        if let Some(nome) = changes.nome {
            account.user.nome = Some(nome.trim().to_string());
        }
        if let Some(email) = email {
            account.user.email = email;
        }
        if let Some(role) = changes.role {
            account.user.role = role;
        }
        if let Some(ativo) = changes.ativo {
            account.user.ativo = Some(ativo);
        }
        Ok(account.user.clone())
    }

    /// Soft delete: the account stays listed with `ativo = false`.
    pub fn deactivate(&mut self, id: &str, acting_id: &str) -> Result<UserRecord, DirectoryError> {
        if id == acting_id {
            return Err(DirectoryError::SelfDeactivation);
        }
        self.update(id, AccountChanges { ativo: Some(false), ..AccountChanges::default() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::demo_users;

    fn directory() -> UserDirectory {
        UserDirectory::with_accounts(demo_users(), "demandcast")
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            nome: " Bruno Lima ".to_string(),
            email: email.to_string(),
            role: Role::Comercial,
            senha: "segredo1".to_string(),
            ativo: true,
        }
    }

    #[test]
    fn test_authenticate() {
        let directory = directory();

        let user = directory.authenticate(" Gestao@DemandCast.local", "demandcast").unwrap();
        assert_eq!(user.role, Role::Gestao);

        assert_eq!(
            directory.authenticate("gestao@demandcast.local", "errada"),
            Err(DirectoryError::InvalidCredentials)
        );
        assert_eq!(
            directory.authenticate("ninguem@demandcast.local", "demandcast"),
            Err(DirectoryError::InvalidCredentials)
        );
    }

    #[test]
    fn test_create_assigns_id_and_rejects_duplicates() {
        let mut directory = directory();

        let created = directory.create(new_account("Bruno@DemandCast.local")).unwrap();
        assert_eq!(created.email, "bruno@demandcast.local");
        assert_eq!(created.nome.as_deref(), Some("Bruno Lima"));
        assert!(created.id_usuario.as_deref().is_some_and(|id| id.len() == 36));

        let login = directory.authenticate("bruno@demandcast.local", "segredo1").unwrap();
        assert_eq!(login, created);

        assert_eq!(
            directory.create(new_account("analista@demandcast.local")),
            Err(DirectoryError::DuplicateEmail("analista@demandcast.local".to_string()))
        );
        assert_eq!(directory.list(false).len(), 4);
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let mut directory = directory();

        let updated = directory
            .update("u-3", AccountChanges { role: Some(Role::Analista), ..AccountChanges::default() })
            .unwrap();
        assert_eq!(updated.role, Role::Analista);
        assert_eq!(updated.email, "comercial@demandcast.local");

        let clash = AccountChanges {
            email: Some("gestao@demandcast.local".to_string()),
            ..AccountChanges::default()
        };
        assert!(matches!(directory.update("u-3", clash), Err(DirectoryError::DuplicateEmail(_))));

        // an account may keep its own e-mail
        let same = AccountChanges {
            email: Some("COMERCIAL@demandcast.local".to_string()),
            ..AccountChanges::default()
        };
        assert!(directory.update("u-3", same).is_ok());

        assert_eq!(
            directory.update("u-9", AccountChanges::default()),
            Err(DirectoryError::NotFound("u-9".to_string()))
        );
    }

    #[test]
    fn test_deactivated_account_cannot_log_in() {
        let mut directory = directory();

        assert_eq!(directory.deactivate("u-1", "u-1"), Err(DirectoryError::SelfDeactivation));

        let deactivated = directory.deactivate("u-3", "u-1").unwrap();
        assert_eq!(deactivated.ativo, Some(false));
        assert_eq!(
            directory.authenticate("comercial@demandcast.local", "demandcast"),
            Err(DirectoryError::Inactive)
        );
        assert_eq!(directory.active("u-3"), None);

        assert_eq!(directory.list(false).len(), 2);
        assert_eq!(directory.list(true).len(), 3);
    }
}
