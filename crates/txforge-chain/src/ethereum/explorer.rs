//! Account state queried by the default Ethereum build function.

use std::collections::HashMap;

use futures::FutureExt;
use txforge_core::error::BuildError;
use txforge_core::BigInt;

use crate::build::BuildFuture;

/// Source of account state for transaction building.
///
/// Network-backed implementations live outside this crate.
pub trait EthereumExplorer: Send + Sync {
    /// Next nonce of `address`.
    fn get_nonce(&self, address: &str) -> BuildFuture<BigInt>;

    /// Balance of `address` in wei.
    fn get_balance(&self, address: &str) -> BuildFuture<BigInt>;

    /// Current gas price in wei.
    fn get_gas_price(&self) -> BuildFuture<BigInt>;
}

/// In-memory explorer with fixed answers.
///
/// Addresses are matched case-insensitively. Unknown addresses have nonce and
/// balance zero.
#[derive(Debug, Default)]
pub struct StaticExplorer {
    accounts: HashMap<String, (BigInt, BigInt)>,
    gas_price: BigInt,
}

impl StaticExplorer {
    /// Create an explorer reporting `gas_price` and no accounts.
    #[must_use]
    pub fn new(gas_price: BigInt) -> Self {
        Self {
            accounts: HashMap::new(),
            gas_price,
        }
    }

    /// Set the nonce and balance reported for `address`.
    #[must_use]
    pub fn with_account(mut self, address: &str, nonce: BigInt, balance: BigInt) -> Self {
        self.accounts.insert(address.to_lowercase(), (nonce, balance));
        self
    }

    fn account(&self, address: &str) -> (BigInt, BigInt) {
        self.accounts
            .get(&address.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

impl EthereumExplorer for StaticExplorer {
    fn get_nonce(&self, address: &str) -> BuildFuture<BigInt> {
        let (nonce, _) = self.account(address);
        async move { Ok::<_, BuildError>(nonce) }.boxed()
    }

    fn get_balance(&self, address: &str) -> BuildFuture<BigInt> {
        let (_, balance) = self.account(address);
        async move { Ok::<_, BuildError>(balance) }.boxed()
    }

    fn get_gas_price(&self) -> BuildFuture<BigInt> {
        let gas_price = self.gas_price.clone();
        async move { Ok::<_, BuildError>(gas_price) }.boxed()
    }
}
