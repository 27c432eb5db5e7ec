mod access_token;
mod api;
mod balance;
mod client;
mod link_account;
mod tokens;
mod transactions;

#[cfg(test)]
pub(crate) mod fake;

pub use access_token::AccessToken;
pub use api::{PlaidApi, TransactionsPage, TransactionsQuery};
pub use client::{LinkSettings, Plaid};
pub use tokens::PublicToken;
pub use transactions::get_transactions;
