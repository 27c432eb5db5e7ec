//! Scripted in-memory stand-in for the Plaid API, used by tests.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use super::{AccessToken, PlaidApi, PublicToken, TransactionsPage, TransactionsQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LinkTokenCreate { client_user_id: String },
    ExchangePublicToken { public_token: String },
    GetBalances { access_token: String },
    GetTransactionsPage { access_token: String, offset: u64 },
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    queries: Vec<TransactionsQuery>,
    reported_total: Option<u64>,
    reported_total_after_first_page: Option<u64>,
    fail_transactions_at_offset: Option<u64>,
    fail_everything: bool,
}

pub struct FakePlaid {
    transactions: Vec<Value>,
    page_size: usize,
    state: Mutex<State>,
}

impl FakePlaid {
    pub fn new() -> Self {
        Self::with_transactions(0, 100)
    }

    pub fn with_transactions(count: usize, page_size: usize) -> Self {
        Self {
            transactions: (0..count)
                .map(|i| json!({"transaction_id": format!("tx-{i}")}))
                .collect(),
            page_size,
            state: Mutex::new(State::default()),
        }
    }

    pub fn all_transactions(&self) -> Vec<Value> {
        self.transactions.clone()
    }

    /// Report `total` as the total transaction count on every page
    pub fn report_total(&self, total: u64) {
        self.state.lock().unwrap().reported_total = Some(total);
    }

    /// Report `total` as the total transaction count on every page except the first
    pub fn report_total_after_first_page(&self, total: u64) {
        self.state.lock().unwrap().reported_total_after_first_page = Some(total);
    }

    pub fn fail_transactions_at_offset(&self, offset: u64) {
        self.state.lock().unwrap().fail_transactions_at_offset = Some(offset);
    }

    pub fn fail_everything(&self) {
        self.state.lock().unwrap().fail_everything = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn transaction_offsets(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::GetTransactionsPage { offset, .. } => Some(offset),
                _ => None,
            })
            .collect()
    }

    pub fn transaction_queries(&self) -> Vec<TransactionsQuery> {
        let mut queries = self.state.lock().unwrap().queries.clone();
        queries.dedup();
        queries
    }

    fn record(&self, call: Call) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.fail_everything {
            bail!("Plaid is down");
        }
        Ok(())
    }
}

#[async_trait]
impl PlaidApi for FakePlaid {
    async fn link_token_create(&self, client_user_id: &str) -> Result<Value> {
        self.record(Call::LinkTokenCreate {
            client_user_id: client_user_id.to_string(),
        })?;
        Ok(json!({
            "link_token": format!("link-sandbox-{client_user_id}"),
            "expiration": "2024-01-16T12:00:00Z",
            "request_id": "request-id",
        }))
    }

    async fn exchange_public_token(&self, public_token: &PublicToken) -> Result<AccessToken> {
        self.record(Call::ExchangePublicToken {
            public_token: public_token.0.clone(),
        })?;
        let suffix = public_token
            .0
            .strip_prefix("public-")
            .unwrap_or(&public_token.0);
        Ok(AccessToken::new(format!("access-{suffix}")))
    }

    async fn get_balances(&self, access_token: &AccessToken) -> Result<Value> {
        self.record(Call::GetBalances {
            access_token: access_token.get().to_string(),
        })?;
        Ok(json!({
            "accounts": [{
                "account_id": "account-1",
                "balances": {"available": 100.0, "current": 110.0, "iso_currency_code": "USD"},
            }],
            "item": {"item_id": format!("item-for-{}", access_token.get())},
            "request_id": "request-id",
        }))
    }

    async fn get_transactions_page(
        &self,
        access_token: &AccessToken,
        query: &TransactionsQuery,
        offset: u64,
    ) -> Result<TransactionsPage> {
        self.record(Call::GetTransactionsPage {
            access_token: access_token.get().to_string(),
            offset,
        })?;
        let mut state = self.state.lock().unwrap();
        state.queries.push(query.clone());
        if state.fail_transactions_at_offset == Some(offset) {
            bail!("Plaid is down");
        }

        let start = (offset as usize).min(self.transactions.len());
        let end = (start + self.page_size).min(self.transactions.len());
        let actual_total = self.transactions.len() as u64;
        let total_transactions = match (offset, state.reported_total_after_first_page) {
            (0, _) | (_, None) => state.reported_total.unwrap_or(actual_total),
            (_, Some(total)) => total,
        };
        Ok(TransactionsPage {
            transactions: self.transactions[start..end].to_vec(),
            total_transactions,
        })
    }
}
