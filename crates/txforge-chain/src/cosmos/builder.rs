//! Fluent builder for Cosmos-like transactions.

use std::fmt;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use txforge_core::error::BuildError;
use txforge_core::BigInt;

use super::message::CosmosMessage;
use super::request::CosmosBuildRequest;
use super::transaction::CosmosTransaction;
use crate::build::{deliver, BuildFuture, TransactionCallback};

/// Turns a request snapshot into a transaction.
pub type CosmosBuildFunction =
    Arc<dyn Fn(CosmosBuildRequest) -> BuildFuture<CosmosTransaction> + Send + Sync>;

/// Accumulates the parameters of a Cosmos-like transaction.
///
/// Like the Ethereum-like builder, [`build`](Self::build) leaves the request
/// in place; call [`reset`](Self::reset) to start over.
#[derive(Clone)]
pub struct CosmosTransactionBuilder {
    request: CosmosBuildRequest,
    build_fn: CosmosBuildFunction,
    handle: Handle,
}

impl CosmosTransactionBuilder {
    /// Create a builder with an empty request.
    #[must_use]
    pub fn new(build_fn: CosmosBuildFunction, handle: Handle) -> Self {
        Self {
            request: CosmosBuildRequest::default(),
            build_fn,
            handle,
        }
    }

    /// Set the account sequence.
    pub fn set_sequence(&mut self, sequence: impl Into<String>) -> &mut Self {
        self.request.sequence = Some(sequence.into());
        self
    }

    /// Set the account number.
    pub fn set_account_number(&mut self, account_number: impl Into<String>) -> &mut Self {
        self.request.account_number = Some(account_number.into());
        self
    }

    /// Set the memo.
    pub fn set_memo(&mut self, memo: impl Into<String>) -> &mut Self {
        self.request.memo = Some(memo.into());
        self
    }

    /// Set the gas limit before adjustment.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidAmount`].
    pub fn set_gas(&mut self, amount: &str) -> Result<&mut Self, BuildError> {
        self.request.gas = Some(parse_amount(amount)?);
        Ok(self)
    }

    /// Set the factor the gas limit is multiplied by.
    pub fn set_gas_adjustment(&mut self, adjustment: f64) -> &mut Self {
        self.request.gas_adjustment = Some(adjustment);
        self
    }

    /// Set the fee, in base units.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidAmount`].
    pub fn set_fee(&mut self, amount: &str) -> Result<&mut Self, BuildError> {
        self.request.fee = Some(parse_amount(amount)?);
        Ok(self)
    }

    /// Set the correlation id.
    pub fn set_correlation_id(&mut self, correlation_id: impl Into<String>) -> &mut Self {
        self.request.correlation_id = Some(correlation_id.into());
        self
    }

    /// Append a message.
    pub fn add_message(&mut self, message: CosmosMessage) -> &mut Self {
        self.request.messages.push(message);
        self
    }

    /// The accumulated request.
    #[must_use]
    pub const fn request(&self) -> &CosmosBuildRequest {
        &self.request
    }

    /// Discard every accumulated parameter.
    pub fn reset(&mut self) {
        self.request = CosmosBuildRequest::default();
    }

    /// Run the build function on a snapshot of the request.
    #[must_use]
    pub fn build(&self) -> BuildFuture<CosmosTransaction> {
        tracing::debug!(
            correlation_id = self.request.correlation_id.as_deref().unwrap_or(""),
            messages = self.request.messages.len(),
            "building cosmos transaction"
        );
        (self.build_fn)(self.request.clone())
    }

    /// Run the build on the builder's runtime and hand the outcome to
    /// `callback`.
    pub fn build_with_callback<C>(&self, callback: C) -> JoinHandle<()>
    where
        C: TransactionCallback<CosmosTransaction>,
    {
        deliver(&self.handle, self.build(), callback)
    }
}

impl fmt::Debug for CosmosTransactionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmosTransactionBuilder")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

fn parse_amount(amount: &str) -> Result<BigInt, BuildError> {
    match BigInt::from_decimal_str(amount) {
        Ok(value) if !value.is_negative() => Ok(value),
        _ => Err(BuildError::invalid_amount(amount)),
    }
}
