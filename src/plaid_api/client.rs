use plaid::{PlaidAuth, PlaidClient};

use crate::args::{Args, PlaidEnvironment};

const PLAID_VERSION: &str = "2020-09-14";

/// Settings used when creating link tokens.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    pub client_name: String,
    pub products: Vec<String>,
    pub redirect_uri: Option<String>,
}

pub struct Plaid {
    client: PlaidClient,
    link_settings: LinkSettings,
}

impl Plaid {
    pub fn new(
        env: PlaidEnvironment,
        client_id: String,
        secret: String,
        link_settings: LinkSettings,
    ) -> Plaid {
        let http = httpclient::Client::new().base_url(env.base_url());
        let auth = PlaidAuth::ClientId {
            client_id,
            secret,
            plaid_version: PLAID_VERSION.to_string(),
        };
        Plaid {
            client: PlaidClient::new_with(http, auth),
            link_settings,
        }
    }

    pub fn from_args(args: &Args) -> Plaid {
        Self::new(
            args.plaid_env,
            args.plaid_client_id.clone(),
            args.plaid_secret.clone(),
            LinkSettings {
                client_name: env!("CARGO_PKG_NAME").to_string(),
                products: args.products.clone(),
                redirect_uri: args.redirect_uri.clone(),
            },
        )
    }

    pub(super) fn client(&self) -> &PlaidClient {
        &self.client
    }

    pub(super) fn link_settings(&self) -> &LinkSettings {
        &self.link_settings
    }
}
