use anyhow::{anyhow, bail, ensure, Result};
use plaid::model::TransactionsGetRequestOptions;
use serde_json::Value;

use super::{AccessToken, Plaid, PlaidApi, TransactionsPage, TransactionsQuery};

/// Fetch all transactions matching `query`, following Plaid's offset pagination until the
/// reported total is reached.
///
/// Fails instead of looping forever if Plaid stops making progress, changes the reported total
/// mid-listing, or needs more than `max_pages` pages. Any failure discards the pages fetched so far.
pub async fn get_transactions(
    client: &dyn PlaidApi,
    access_token: &AccessToken,
    query: &TransactionsQuery,
    max_pages: usize,
) -> Result<Vec<Value>> {
    ensure!(max_pages > 0, "Transaction listing must allow at least one page");
    log::info!("Requesting transactions...");
    log::info!("Requesting transactions...page 1...");

    let first_page = client
        .get_transactions_page(access_token, query, 0)
        .await?;
    let total = first_page.total_transactions;
    let mut result = first_page.transactions;

    let mut pagenum = 1;
    while (result.len() as u64) < total {
        pagenum += 1;
        ensure!(
            pagenum <= max_pages,
            "Transaction listing needs more than {max_pages} pages, got {} of {total} transactions so far",
            result.len(),
        );
        log::info!("Requesting transactions...page {pagenum}...");
        let page = client
            .get_transactions_page(access_token, query, result.len() as u64)
            .await?;
        if page.total_transactions != total {
            bail!(
                "Total transaction count changed from {total} to {} while paginating",
                page.total_transactions,
            );
        }
        if page.transactions.is_empty() {
            bail!(
                "Got an empty page at offset {} but expected {total} transactions in total",
                result.len(),
            );
        }
        result.extend(page.transactions);
    }

    log::info!("Requesting transactions...done");

    Ok(result)
}

pub(super) async fn get_transactions_page(
    client: &Plaid,
    access_token: &AccessToken,
    query: &TransactionsQuery,
    offset: u64,
) -> Result<TransactionsPage> {
    let offset = i64::try_from(offset)?;
    let response = client
        .client()
        .transactions_get(access_token.get(), query.end_date, query.start_date)
        .options(TransactionsGetRequestOptions {
            offset: Some(offset),
            account_ids: query.account_ids.clone(),
            ..Default::default()
        })
        .await?;

    let total_transactions = u64::try_from(response.total_transactions)
        .map_err(|_| anyhow!("Got negative total_transactions {}", response.total_transactions))?;
    let transactions = response
        .transactions
        .into_iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()?;
    Ok(TransactionsPage {
        transactions,
        total_transactions,
    })
}
