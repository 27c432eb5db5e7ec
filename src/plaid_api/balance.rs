use anyhow::Result;
use serde_json::Value;

use super::{AccessToken, Plaid};

pub(super) async fn get_balances(client: &Plaid, access_token: &AccessToken) -> Result<Value> {
    log::info!("Requesting balances...");

    let response = client
        .client()
        .accounts_balance_get(access_token.get())
        .await?;

    log::info!("Requesting balances...done");
    Ok(serde_json::to_value(response)?)
}
