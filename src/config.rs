use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Duration;

use anyhow::{Result, ensure};
use common::{Role, UserRecord};
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use tokio::sync::RwLock;

use crate::directory::UserDirectory;
use crate::schemas::AppState;

/// Runtime settings of the stub server.
#[derive(Debug, Clone)]
pub struct StubConfig {
    pub session_ttl: Duration,
    pub history_capacity: u64,
    pub demo_password: String,
}

impl StubConfig {
    pub fn new(session_ttl_secs: u64, history_capacity: u64, demo_password: String) -> Result<Self> {
        ensure!(session_ttl_secs > 0, "session TTL must be positive");
        ensure!(history_capacity > 0, "history capacity must be positive");
        ensure!(!demo_password.is_empty(), "demo password must not be empty");

        Ok(Self {
            session_ttl: Duration::from_secs(session_ttl_secs),
            history_capacity,
            demo_password,
        })
    }
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(3600),
            history_capacity: 200,
            demo_password: "demandcast".to_string(),
        }
    }
}

fn demo_user(id: &str, name: &str, email: &str, role: Role) -> UserRecord {
    UserRecord {
        id_usuario: Some(id.to_string()),
        nome: Some(name.to_string()),
        email: email.to_string(),
        role,
        ativo: Some(true),
    }
}

/// One account per role.
pub fn demo_users() -> Vec<UserRecord> {
    vec![
        demo_user("u-1", "Gestora Demo", "gestao@demandcast.local", Role::Gestao),
        demo_user("u-2", "Analista Demo", "analista@demandcast.local", Role::Analista),
        demo_user("u-3", "Comercial Demo", "comercial@demandcast.local", Role::Comercial),
    ]
}

/// Upper bound on live sessions; the least recently used are dropped first.
const MAX_SESSIONS: u64 = 1000;

/// Initialize application state
pub fn initialize_app_state(config: &StubConfig) -> AppState {
    // LRU: a full cache must drop its oldest entries, never refuse new ones
    let sessions = Cache::builder()
        .max_capacity(MAX_SESSIONS)
        .time_to_live(config.session_ttl)
        .eviction_policy(EvictionPolicy::lru())
        .build();

    let history = Cache::builder()
        .max_capacity(config.history_capacity)
        .eviction_policy(EvictionPolicy::lru())
        .build();

    AppState {
        directory: Arc::new(RwLock::new(UserDirectory::with_accounts(
            demo_users(),
            &config.demo_password,
        ))),
        session_ttl: config.session_ttl,
        sessions,
        history,
        run_counter: Arc::new(AtomicU64::new(0)),
    }
}
