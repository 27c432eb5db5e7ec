use anyhow::Result;
use plaid::model::LinkTokenCreateRequestUser;
use plaid::request::LinkTokenCreateRequired;
use serde_json::Value;

use super::{AccessToken, Plaid, PublicToken};

const COUNTRY_CODES: &[&str] = &["US"];
const LANGUAGE: &str = "en";

pub(super) async fn link_token_create(client: &Plaid, client_user_id: &str) -> Result<Value> {
    log::info!("Requesting link token...");

    let settings = client.link_settings();
    let products: Vec<&str> = settings.products.iter().map(String::as_str).collect();
    let mut request = client
        .client()
        .link_token_create(LinkTokenCreateRequired {
            client_name: &settings.client_name,
            country_codes: COUNTRY_CODES,
            language: LANGUAGE,
            user: LinkTokenCreateRequestUser {
                client_user_id: client_user_id.to_string(),
                ..Default::default()
            },
        })
        .products(&products);
    if let Some(redirect_uri) = &settings.redirect_uri {
        request = request.redirect_uri(redirect_uri);
    }
    let response = request.await?;

    log::info!("Requesting link token...done");
    Ok(serde_json::to_value(response)?)
}

pub(super) async fn exchange_public_token(
    client: &Plaid,
    public_token: &PublicToken,
) -> Result<AccessToken> {
    log::info!("Exchanging public token...");

    let response = client
        .client()
        .item_public_token_exchange(&public_token.0)
        .await?;

    log::info!("Exchanging public token...done");
    Ok(AccessToken::new(response.access_token))
}
