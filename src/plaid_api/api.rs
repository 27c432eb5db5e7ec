use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use super::{balance, link_account, transactions, AccessToken, Plaid, PublicToken};

/// Date range and optional account filter for a transaction listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionsQuery {
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    pub account_ids: Option<Vec<String>>,
}

/// One page of a transaction listing. The records are passed through as Plaid returns them.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsPage {
    pub transactions: Vec<Value>,
    pub total_transactions: u64,
}

/// The subset of the Plaid API this server needs.
#[async_trait]
pub trait PlaidApi: Send + Sync {
    /// Create a link token for the Link widget. Returns Plaid's full response.
    async fn link_token_create(&self, client_user_id: &str) -> Result<Value>;

    async fn exchange_public_token(&self, public_token: &PublicToken) -> Result<AccessToken>;

    /// Returns Plaid's balance response unmodified.
    async fn get_balances(&self, access_token: &AccessToken) -> Result<Value>;

    /// Fetch one page of transactions, skipping the first `offset` records.
    async fn get_transactions_page(
        &self,
        access_token: &AccessToken,
        query: &TransactionsQuery,
        offset: u64,
    ) -> Result<TransactionsPage>;
}

#[async_trait]
impl PlaidApi for Plaid {
    async fn link_token_create(&self, client_user_id: &str) -> Result<Value> {
        link_account::link_token_create(self, client_user_id).await
    }

    async fn exchange_public_token(&self, public_token: &PublicToken) -> Result<AccessToken> {
        link_account::exchange_public_token(self, public_token).await
    }

    async fn get_balances(&self, access_token: &AccessToken) -> Result<Value> {
        balance::get_balances(self, access_token).await
    }

    async fn get_transactions_page(
        &self,
        access_token: &AccessToken,
        query: &TransactionsQuery,
        offset: u64,
    ) -> Result<TransactionsPage> {
        transactions::get_transactions_page(self, access_token, query, offset).await
    }
}
