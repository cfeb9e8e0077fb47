use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{list_users, serve};

use crate::config::StubConfig;

#[derive(Parser)]
#[command(name = "demandcast")]
#[command(about = "Development stub of the DemandCast prediction API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:8000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8000")]
        bind_address: String,

        /// Lifetime of issued access tokens, in seconds
        #[arg(long, env = "SESSION_TTL_SECS", default_value_t = 3600)]
        session_ttl_secs: u64,

        /// Number of forecast runs kept for `GET /previsoes`
        #[arg(long, env = "HISTORY_CAPACITY", default_value_t = 200)]
        history_capacity: u64,

        /// Password accepted for every demo account
        #[arg(long, env = "DEMO_PASSWORD", default_value = "demandcast")]
        demo_password: String,
    },
    /// Print the demo accounts and their roles
    Users,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                bind_address,
                session_ttl_secs,
                history_capacity,
                demo_password,
            } => {
                let config = StubConfig::new(session_ttl_secs, history_capacity, demo_password)?;
                serve(&config, &bind_address).await?;
            }
            Commands::Users => list_users(),
        }
        Ok(())
    }
}
