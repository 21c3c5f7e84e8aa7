//! Default build function for Cosmos-like accounts.

use std::sync::Arc;

use futures::FutureExt;
use txforge_core::error::BuildError;
use txforge_core::{scale_to_base, BigInt, Currency};

use super::builder::CosmosBuildFunction;
use super::request::CosmosBuildRequest;
use super::transaction::CosmosTransaction;

/// Build function assembling the request as is.
///
/// Gas and fee are required. When a gas adjustment is set, the gas limit
/// becomes `ceil(gas * adjustment)`. A missing memo is empty.
///
/// Failures surface through the returned future:
/// [`BuildError::MissingField`] for an absent gas or fee, and
/// [`BuildError::InvalidAmount`] for an adjustment that is not a positive
/// finite number.
#[must_use]
pub fn default_build_function(currency: Currency) -> CosmosBuildFunction {
    Arc::new(move |request: CosmosBuildRequest| {
        let currency = currency.clone();
        async move { assemble(currency, request) }.boxed()
    })
}

fn assemble(
    currency: Currency,
    request: CosmosBuildRequest,
) -> Result<CosmosTransaction, BuildError> {
    let gas = request.gas.ok_or_else(|| BuildError::missing_field("gas"))?;
    let fee = request.fee.ok_or_else(|| BuildError::missing_field("fee"))?;
    let gas = match request.gas_adjustment {
        Some(adjustment) => adjust_gas(&gas, adjustment)?,
        None => gas,
    };

    tracing::info!(
        correlation_id = request.correlation_id.as_deref().unwrap_or(""),
        gas = %gas,
        fee = %fee,
        messages = request.messages.len(),
        "cosmos transaction built"
    );

    Ok(CosmosTransaction::new(
        currency,
        request.memo.unwrap_or_default(),
        request.account_number,
        request.sequence,
        Some(gas),
        Some(fee),
        request.messages,
    ))
}

/// `ceil(gas * adjustment)`, computed exactly on the shortest decimal form
/// of `adjustment`.
fn adjust_gas(gas: &BigInt, adjustment: f64) -> Result<BigInt, BuildError> {
    if !adjustment.is_finite() || adjustment <= 0.0 {
        return Err(BuildError::invalid_amount(adjustment.to_string()));
    }

    let decimal = adjustment.to_string();
    let decimals = decimal
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len());
    let decimals = u32::try_from(decimals).map_err(|_| BuildError::invalid_amount(&decimal))?;
    let scaled =
        scale_to_base(&decimal, decimals).map_err(|_| BuildError::invalid_amount(&decimal))?;
    let denominator = BigInt::from(10u64).pow(decimals);

    (gas * &scaled)
        .div_ceil(&denominator)
        .ok_or_else(|| BuildError::invalid_amount(&decimal))
}
