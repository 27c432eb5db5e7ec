pub mod args;
pub mod plaid_api;
pub mod server;
pub mod session;
