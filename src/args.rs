use std::net::{IpAddr, Ipv4Addr};

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use rocket::http::uri::Origin;

/// Broker Plaid Link and serve balance and transaction data to a browser client.
#[derive(Parser, Debug)]
pub struct Args {
    /// Plaid environment to talk to
    #[arg(long, env = "PLAID_ENV", value_enum, default_value_t = PlaidEnvironment::Sandbox)]
    pub plaid_env: PlaidEnvironment,

    #[arg(long, env = "PLAID_CLIENT_ID")]
    pub plaid_client_id: String,

    #[arg(long, env = "PLAID_SECRET", hide_env_values = true)]
    pub plaid_secret: String,

    /// OAuth redirect URI registered with Plaid
    #[arg(long, env = "PLAID_SANDBOX_REDIRECT_URI")]
    pub redirect_uri: Option<String>,

    /// Plaid products to request when creating link tokens
    #[arg(
        long,
        env = "PLAID_PRODUCTS",
        value_delimiter = ',',
        default_value = "auth,transactions"
    )]
    pub products: Vec<String>,

    #[arg(long, env = "APPADDR", default_value_t = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)))]
    pub address: IpAddr,

    #[arg(long, env = "APPPORT", default_value_t = 9000)]
    pub port: u16,

    /// Path prefix all routes are mounted under, e.g. /.netlify/functions/api
    #[arg(long, env = "APPBASEPATH", default_value = "/", value_parser = parse_base_path)]
    pub base_path: String,

    /// First day of the range served by /api/transactions
    #[arg(long, default_value = "2018-01-01")]
    pub transactions_start_date: NaiveDate,

    /// Last day (inclusive) of the range served by /api/transactions
    #[arg(long, default_value = "2024-01-16")]
    pub transactions_end_date: NaiveDate,

    /// Give up on a transaction listing that needs more pages than this
    #[arg(long, default_value_t = 1000, value_parser = parse_page_cap)]
    pub max_transaction_pages: usize,

    /// Sessions idle for longer than this are forgotten
    #[arg(long, default_value_t = 24 * 60 * 60)]
    pub session_ttl_secs: u64,

    /// Return the access token to the browser after exchanging a public token
    #[arg(
        long,
        env = "EXPOSE_ACCESS_TOKEN",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub expose_access_token: bool,

    /// Let rocket print its own request logs
    #[arg(long)]
    pub rocket_log: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlaidEnvironment {
    Sandbox,
    Development,
    Production,
}

impl PlaidEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            PlaidEnvironment::Sandbox => "https://sandbox.plaid.com",
            PlaidEnvironment::Development => "https://development.plaid.com",
            PlaidEnvironment::Production => "https://production.plaid.com",
        }
    }
}

fn parse_base_path(path: &str) -> Result<String, String> {
    if !path.starts_with('/') {
        return Err(format!("Base path must start with '/' but was {path:?}"));
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok("/".to_string());
    }
    if trimmed.contains("//") {
        return Err(format!("Base path must not contain empty segments but was {path:?}"));
    }
    if trimmed.contains(|c: char| c.is_whitespace() || c == '<' || c == '>') {
        return Err(format!("Base path must be a static URI path but was {path:?}"));
    }
    let origin = Origin::parse(trimmed)
        .map_err(|err| format!("Base path {path:?} isn't a valid URI path: {err}"))?;
    if origin.query().is_some() {
        return Err(format!("Base path must not have a query but was {path:?}"));
    }
    Ok(trimmed.to_string())
}

fn parse_page_cap(value: &str) -> Result<usize, String> {
    let cap: usize = value.parse().map_err(|err| format!("{err}"))?;
    if cap == 0 {
        return Err("Need to allow at least one page".to_string());
    }
    Ok(cap)
}

pub fn parse() -> Args {
    Args::parse()
}
