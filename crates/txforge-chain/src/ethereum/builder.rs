//! Fluent builder for Ethereum-like transactions.

use std::fmt;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use txforge_core::error::BuildError;
use txforge_core::BigInt;

use super::address::to_eip55;
use super::explorer::EthereumExplorer;
use super::request::EthereumBuildRequest;
use super::transaction::EthereumTransaction;
use crate::build::{deliver, BuildFuture, TransactionCallback};

/// Turns a request snapshot into a transaction, consulting the explorer.
pub type EthereumBuildFunction = Arc<
    dyn Fn(EthereumBuildRequest, Arc<dyn EthereumExplorer>) -> BuildFuture<EthereumTransaction>
        + Send
        + Sync,
>;

/// Accumulates the parameters of an Ethereum-like transaction.
///
/// Setters mutate the builder in place and return it for chaining. Fallible
/// setters return `Result<&mut Self, BuildError>` so chains can use `?`.
///
/// [`build`](Self::build) does not reset the request: setters called
/// afterwards modify the request the last build saw. Call
/// [`reset`](Self::reset) to start over.
///
/// # Example
///
/// ```
/// # async fn demo(mut builder: txforge_chain::ethereum::EthereumTransactionBuilder)
/// #     -> Result<(), txforge_core::BuildError> {
/// builder
///     .send_to_address("1000000000000000000", "0x3535353535353535353535353535353535353535")?
///     .set_gas_price("20000000000")?
///     .set_gas_limit("21000")?;
/// let transaction = builder.build().await?;
/// # let _ = transaction;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EthereumTransactionBuilder {
    request: EthereumBuildRequest,
    build_fn: EthereumBuildFunction,
    explorer: Arc<dyn EthereumExplorer>,
    handle: Handle,
}

impl EthereumTransactionBuilder {
    /// Create a builder with an empty request.
    ///
    /// `handle` is the runtime [`build_with_callback`](Self::build_with_callback)
    /// spawns on.
    #[must_use]
    pub fn new(
        build_fn: EthereumBuildFunction,
        explorer: Arc<dyn EthereumExplorer>,
        handle: Handle,
    ) -> Self {
        Self {
            request: EthereumBuildRequest::default(),
            build_fn,
            explorer,
            handle,
        }
    }

    /// Send `amount` wei to `address`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidAmount`] or [`BuildError::InvalidAddress`];
    /// the request is left untouched on error.
    pub fn send_to_address(
        &mut self,
        amount: &str,
        address: &str,
    ) -> Result<&mut Self, BuildError> {
        let value = parse_amount(amount)?;
        let to_address = normalize_address(address)?;
        self.request.value = Some(value);
        self.request.to_address = Some(to_address);
        Ok(self)
    }

    /// Send the whole balance, minus fees, to `address`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidAddress`].
    pub fn wipe_to_address(&mut self, address: &str) -> Result<&mut Self, BuildError> {
        self.request.to_address = Some(normalize_address(address)?);
        self.request.wipe = true;
        Ok(self)
    }

    /// Set the gas price in wei.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidAmount`].
    pub fn set_gas_price(&mut self, amount: &str) -> Result<&mut Self, BuildError> {
        self.request.gas_price = Some(parse_amount(amount)?);
        Ok(self)
    }

    /// Set the gas limit.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidAmount`].
    pub fn set_gas_limit(&mut self, amount: &str) -> Result<&mut Self, BuildError> {
        self.request.gas_limit = Some(parse_amount(amount)?);
        Ok(self)
    }

    /// Set the call data.
    pub fn set_input_data(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.request.input_data = data.into();
        self
    }

    /// Set the correlation id.
    pub fn set_correlation_id(&mut self, correlation_id: impl Into<String>) -> &mut Self {
        self.request.correlation_id = Some(correlation_id.into());
        self
    }

    /// The accumulated request.
    #[must_use]
    pub const fn request(&self) -> &EthereumBuildRequest {
        &self.request
    }

    /// Discard every accumulated parameter.
    pub fn reset(&mut self) {
        self.request = EthereumBuildRequest::default();
    }

    /// Run the build function on a snapshot of the request.
    #[must_use]
    pub fn build(&self) -> BuildFuture<EthereumTransaction> {
        tracing::debug!(
            correlation_id = self.request.correlation_id.as_deref().unwrap_or(""),
            wipe = self.request.wipe,
            "building ethereum transaction"
        );
        (self.build_fn)(self.request.clone(), Arc::clone(&self.explorer))
    }

    /// Run the build on the builder's runtime and hand the outcome to
    /// `callback`.
    pub fn build_with_callback<C>(&self, callback: C) -> JoinHandle<()>
    where
        C: TransactionCallback<EthereumTransaction>,
    {
        deliver(&self.handle, self.build(), callback)
    }
}

impl fmt::Debug for EthereumTransactionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EthereumTransactionBuilder")
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

fn normalize_address(address: &str) -> Result<String, BuildError> {
    to_eip55(address).map_err(|_| BuildError::invalid_address(address))
}
