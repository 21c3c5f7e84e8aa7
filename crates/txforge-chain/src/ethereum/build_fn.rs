//! Default build function for Ethereum-like accounts.

use std::sync::Arc;

use futures::FutureExt;
use txforge_core::error::BuildError;
use txforge_core::{BigInt, Currency};

use super::builder::EthereumBuildFunction;
use super::explorer::EthereumExplorer;
use super::request::EthereumBuildRequest;
use super::transaction::EthereumTransaction;

/// Build function for the account at `sender`.
///
/// The nonce and balance come from the explorer, and so does the gas price
/// when the request has none. The gas limit is required. A wipe request
/// sends `balance - gas_price * gas_limit`; any other request must carry a
/// value that the balance covers together with the fees.
///
/// Failures surface through the returned future:
/// [`BuildError::MissingField`] for an absent recipient, gas limit or value,
/// [`BuildError::InsufficientFunds`] when the balance is too low, and
/// explorer errors as reported.
#[must_use]
pub fn default_build_function(currency: Currency, sender: String) -> EthereumBuildFunction {
    Arc::new(
        move |request: EthereumBuildRequest, explorer: Arc<dyn EthereumExplorer>| {
            let currency = currency.clone();
            let sender = sender.clone();
            async move { assemble(currency, &sender, request, explorer.as_ref()).await }.boxed()
        },
    )
}

async fn assemble(
    currency: Currency,
    sender: &str,
    request: EthereumBuildRequest,
    explorer: &dyn EthereumExplorer,
) -> Result<EthereumTransaction, BuildError> {
    let to_address = request
        .to_address
        .ok_or_else(|| BuildError::missing_field("to_address"))?;
    let gas_limit = request
        .gas_limit
        .ok_or_else(|| BuildError::missing_field("gas_limit"))?;
    let gas_price = match request.gas_price {
        Some(gas_price) => gas_price,
        None => explorer.get_gas_price().await?,
    };

    let nonce = explorer.get_nonce(sender).await?;
    let balance = explorer.get_balance(sender).await?;
    let fees = &gas_price * &gas_limit;

    let value = if request.wipe {
        let value = &balance - &fees;
        if value.is_negative() {
            return Err(insufficient_funds(&balance, &fees));
        }
        value
    } else {
        let value = request
            .value
            .ok_or_else(|| BuildError::missing_field("value"))?;
        let required = &value + &fees;
        if balance < required {
            return Err(insufficient_funds(&balance, &required));
        }
        value
    };

    tracing::info!(
        correlation_id = request.correlation_id.as_deref().unwrap_or(""),
        nonce = %nonce,
        value = %value,
        wipe = request.wipe,
        "ethereum transaction built"
    );

    Ok(EthereumTransaction::new(
        currency,
        nonce,
        gas_price,
        gas_limit,
        Some(to_address),
        value,
        request.input_data,
    ))
}

fn insufficient_funds(balance: &BigInt, required: &BigInt) -> BuildError {
    BuildError::InsufficientFunds {
        balance: balance.to_string(),
        required: required.to_string(),
    }
}
