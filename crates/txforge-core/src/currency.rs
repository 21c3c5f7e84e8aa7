//! Currency descriptors and the currency registry.
//!
//! A [`Currency`] is an immutable descriptor of a chain's native asset: its
//! name, BIP-44 coin type, and the table of [`CurrencyUnit`]s it can be
//! expressed in. The unit with zero decimals is the base denomination.
//!
//! The [`CurrencyRegistry`] provides lookup by name. It ships with the
//! built-in `ethereum` and `atom` currencies and can be extended from the
//! `[[currencies]]` section of the configuration file.
//!
//! # Example
//!
//! ```
//! use txforge_core::currency::CurrencyRegistry;
//!
//! let registry = CurrencyRegistry::new();
//! let atom = registry.get("atom").expect("built-in currency");
//! assert_eq!(atom.unit("atom").map(|u| u.number_of_decimals), Some(6));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ConfigError;

// ============================================================================
// Currency
// ============================================================================

/// A named unit of a currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyUnit {
    /// Unit name, also used as the Cosmos `denom`.
    pub name: String,
    /// Display symbol.
    pub symbol: String,
    /// Short code.
    pub code: String,
    /// Number of decimal digits relative to the base denomination.
    pub number_of_decimals: u32,
}

impl CurrencyUnit {
    /// Create a unit.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        code: impl Into<String>,
        number_of_decimals: u32,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            code: code.into(),
            number_of_decimals,
        }
    }
}

/// Descriptor of a chain's native currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Registry name of the currency.
    pub name: String,
    /// BIP-44 coin type.
    pub bip44_coin_type: u32,
    /// Units the currency can be expressed in.
    pub units: Vec<CurrencyUnit>,
}

impl Currency {
    /// Look up a unit by name.
    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&CurrencyUnit> {
        self.units.iter().find(|unit| unit.name == name)
    }

    /// The unit with the fewest decimals.
    #[must_use]
    pub fn base_unit(&self) -> Option<&CurrencyUnit> {
        self.units.iter().min_by_key(|unit| unit.number_of_decimals)
    }

    /// The unit with the most decimals, which is how amounts are usually shown.
    #[must_use]
    pub fn display_unit(&self) -> Option<&CurrencyUnit> {
        self.units.iter().max_by_key(|unit| unit.number_of_decimals)
    }

    /// Ether, in `wei`, `gwei` and `ether`.
    #[must_use]
    pub fn ethereum() -> Self {
        Self {
            name: "ethereum".to_string(),
            bip44_coin_type: 60,
            units: vec![
                CurrencyUnit::new("wei", "wei", "wei", 0),
                CurrencyUnit::new("gwei", "Gwei", "gwei", 9),
                CurrencyUnit::new("ether", "ETH", "ETH", 18),
            ],
        }
    }

    /// The Cosmos Hub atom, in `uatom`, `matom` and `atom`.
    #[must_use]
    pub fn atom() -> Self {
        Self {
            name: "atom".to_string(),
            bip44_coin_type: 118,
            units: vec![
                CurrencyUnit::new("uatom", "uatom", "uatom", 0),
                CurrencyUnit::new("matom", "matom", "matom", 3),
                CurrencyUnit::new("atom", "ATOM", "ATOM", 6),
            ],
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Lookup table of currencies by name.
///
/// Cloning is cheap; the table is shared behind an [`Arc`].
#[derive(Debug, Clone)]
pub struct CurrencyRegistry {
    currencies: Arc<HashMap<String, Currency>>,
}

impl CurrencyRegistry {
    /// Create a registry holding the built-in currencies.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Currency::ethereum());
        registry.register(Currency::atom());
        registry
    }

    /// Create a registry with no currencies.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            currencies: Arc::new(HashMap::new()),
        }
    }

    /// Create a registry of the built-ins overlaid with the currencies
    /// declared in `config`.
    ///
    /// A configured currency with a built-in name replaces the built-in.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] of [`Config::validate`] when the
    /// configuration is invalid.
    pub fn with_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut registry = Self::new();
        for currency in &config.currencies {
            tracing::debug!(currency = %currency.name, "registering configured currency");
            registry.register(currency.clone());
        }
        Ok(registry)
    }

    /// Register a currency, replacing any existing one with the same name.
    pub fn register(&mut self, currency: Currency) {
        Arc::make_mut(&mut self.currencies).insert(currency.name.clone(), currency);
    }

    /// Look up a currency by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Currency> {
        self.currencies.get(name)
    }

    /// Whether a currency with this name is registered.
    #[must_use]
    pub fn supports(&self, name: &str) -> bool {
        self.currencies.contains_key(name)
    }

    /// Registered currency names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.currencies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered currencies, sorted by name.
    #[must_use]
    pub fn currencies(&self) -> Vec<&Currency> {
        let mut currencies: Vec<&Currency> = self.currencies.values().collect();
        currencies.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        currencies
    }

    /// Number of registered currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
