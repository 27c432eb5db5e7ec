use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use rocket::{Build, Config, Rocket};

use crate::args::Args;
use crate::plaid_api::{Plaid, PlaidApi};
use crate::session::{InMemorySessionStore, SessionStore};

mod body;
mod error;
mod routes;

pub use body::Body;
pub use error::ApiError;

pub struct ServerState {
    pub plaid: Arc<dyn PlaidApi>,
    pub sessions: Arc<dyn SessionStore>,
    pub settings: ServerSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Date range served by /api/transactions
    pub transactions_start_date: NaiveDate,
    pub transactions_end_date: NaiveDate,
    pub max_transaction_pages: usize,
    pub expose_access_token: bool,
}

impl ServerSettings {
    pub fn from_args(args: &Args) -> Self {
        Self {
            transactions_start_date: args.transactions_start_date,
            transactions_end_date: args.transactions_end_date,
            max_transaction_pages: args.max_transaction_pages,
            expose_access_token: args.expose_access_token,
        }
    }
}

pub fn build(state: ServerState, config: Config, base_path: &str) -> Rocket<Build> {
    rocket::custom(config)
        .manage(state)
        .mount(base_path, routes::routes())
}

pub async fn serve(args: Args) -> Result<()> {
    if !args.expose_access_token {
        log::info!("Access tokens will not be returned to the browser");
    }
    let state = ServerState {
        plaid: Arc::new(Plaid::from_args(&args)),
        sessions: Arc::new(InMemorySessionStore::new(Duration::from_secs(
            args.session_ttl_secs,
        ))),
        settings: ServerSettings::from_args(&args),
    };
    let log_level = if args.rocket_log {
        rocket::config::LogLevel::Normal
    } else {
        rocket::config::LogLevel::Critical
    };
    let server = build(
        state,
        Config {
            log_level,
            address: args.address,
            port: args.port,
            ..Default::default()
        },
        &args.base_path,
    )
    .ignite()
    .await?;

    log::info!(
        "Server is running on http://{}:{}{} against Plaid {:?}",
        args.address,
        args.port,
        args.base_path,
        args.plaid_env,
    );

    // runs until ctrl-c
    server.launch().await?;
    Ok(())
}
