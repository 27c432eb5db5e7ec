use anyhow::anyhow;
use chrono::{Months, NaiveDate};
use rocket::serde::json::Json;
use rocket::{get, post, routes, FromForm, Route, State};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::plaid_api::{self, AccessToken, PublicToken, TransactionsQuery};
use crate::session::SessionId;

use super::{ApiError, Body, ServerState};

pub fn routes() -> Vec<Route> {
    routes![
        index,
        create_link_token,
        exchange_public_token,
        data,
        data2,
        three_months_transactions,
        transactions,
        is_account_connected,
    ]
}

#[derive(Deserialize, FromForm)]
struct ExchangeRequest {
    public_token: Option<String>,
}

#[derive(Serialize)]
struct ExchangeResponse {
    /// None if the server is configured to keep access tokens to itself
    access_token: Option<String>,
}

#[derive(Deserialize, FromForm)]
struct AccessTokenRequest {
    access_token: Option<String>,
}

#[derive(Deserialize, FromForm)]
struct AccountTransactionsRequest {
    #[serde(rename = "accountId")]
    #[field(name = "accountId")]
    account_id: Option<String>,
    access_token: Option<String>,
}

#[derive(Serialize)]
struct BalanceResponse {
    #[serde(rename = "Balance")]
    balance: Value,
}

#[derive(Serialize)]
struct ConnectionStatus {
    status: bool,
}

#[get("/")]
fn index() -> Json<Value> {
    Json(json!({
        "message": concat!(env!("CARGO_PKG_NAME"), " API works"),
    }))
}

#[get("/api/create_link_token")]
async fn create_link_token(
    session: SessionId,
    state: &State<ServerState>,
) -> Result<Json<Value>, ApiError> {
    let response = state.plaid.link_token_create(session.as_str()).await?;
    Ok(Json(response))
}

#[post("/api/exchange_public_token", data = "<body>")]
async fn exchange_public_token(
    session: SessionId,
    body: Option<Body<ExchangeRequest>>,
    state: &State<ServerState>,
) -> Result<Json<ExchangeResponse>, ApiError> {
    let public_token = required(body.and_then(|b| b.into_inner().public_token), "public_token")?;
    let access_token = state
        .plaid
        .exchange_public_token(&PublicToken(public_token))
        .await?;
    state.sessions.set_access_token(&session, access_token.clone());
    log::info!("Linked session to a Plaid item");

    // TODO Stop returning the access token once the front-end only relies on the session
    let access_token = state
        .settings
        .expose_access_token
        .then(|| access_token.get().to_string());
    Ok(Json(ExchangeResponse { access_token }))
}

#[get("/api/data")]
async fn data(
    session: SessionId,
    state: &State<ServerState>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let access_token = session_access_token(state, &session)?;
    balance(state, &access_token).await
}

#[post("/api/data2", data = "<body>")]
async fn data2(
    body: Option<Body<AccessTokenRequest>>,
    state: &State<ServerState>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let access_token = required(body.and_then(|b| b.into_inner().access_token), "access_token")?;
    balance(state, &AccessToken::new(access_token)).await
}

#[post("/api/three_months_transactions", data = "<body>")]
async fn three_months_transactions(
    body: Option<Body<AccountTransactionsRequest>>,
    state: &State<ServerState>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let (account_id, access_token) = match body {
        Some(body) => {
            let body = body.into_inner();
            (body.account_id, body.access_token)
        }
        None => (None, None),
    };
    let access_token = AccessToken::new(required(access_token, "access_token")?);
    let account_id = required(account_id, "accountId")?;

    let today = chrono::Local::now().date_naive();
    let query = TransactionsQuery {
        start_date: three_months_before(today)?,
        end_date: today,
        account_ids: Some(vec![account_id]),
    };
    let transactions = plaid_api::get_transactions(
        state.plaid.as_ref(),
        &access_token,
        &query,
        state.settings.max_transaction_pages,
    )
    .await?;
    Ok(Json(transactions))
}

#[get("/api/transactions")]
async fn transactions(
    session: SessionId,
    state: &State<ServerState>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let access_token = session_access_token(state, &session)?;
    let query = TransactionsQuery {
        start_date: state.settings.transactions_start_date,
        end_date: state.settings.transactions_end_date,
        account_ids: None,
    };
    let transactions = plaid_api::get_transactions(
        state.plaid.as_ref(),
        &access_token,
        &query,
        state.settings.max_transaction_pages,
    )
    .await?;
    Ok(Json(transactions))
}

#[get("/api/is_account_connected")]
fn is_account_connected(session: SessionId, state: &State<ServerState>) -> Json<ConnectionStatus> {
    Json(ConnectionStatus {
        status: state.sessions.is_linked(&session),
    })
}

async fn balance(
    state: &ServerState,
    access_token: &AccessToken,
) -> Result<Json<BalanceResponse>, ApiError> {
    let balance = state.plaid.get_balances(access_token).await?;
    Ok(Json(BalanceResponse { balance }))
}

fn session_access_token(state: &ServerState, session: &SessionId) -> Result<AccessToken, ApiError> {
    state
        .sessions
        .access_token(session)
        .ok_or(ApiError::SessionState)
}

/// Empty strings count as missing
fn required(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::ClientInput(field))
}

fn three_months_before(date: NaiveDate) -> Result<NaiveDate, ApiError> {
    date.checked_sub_months(Months::new(3))
        .ok_or_else(|| ApiError::Upstream(anyhow!("Can't go three months back from {date}")))
}
