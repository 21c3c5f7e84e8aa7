//! # Currencies Command
//!
//! `txforge currencies` lists the registry: the built-in `ethereum` and
//! `atom` plus the `[[currencies]]` of the configuration file.

use std::fmt::Write as _;

use txforge_core::CurrencyRegistry;

/// The `txforge currencies` command handler.
#[derive(Debug, Clone)]
pub struct CurrenciesCommand {
    registry: CurrencyRegistry,
}

impl CurrenciesCommand {
    /// List the currencies of `registry`.
    #[must_use]
    pub const fn new(registry: CurrencyRegistry) -> Self {
        Self { registry }
    }

    /// Print the listing.
    pub fn run(&self) {
        println!("{}", self.execute());
    }

    /// One block per currency, sorted by name:
    ///
    /// ```text
    /// atom (coin type 118)
    ///   uatom      0  uatom
    ///   matom      3  matom
    ///   atom       6  ATOM
    /// ```
    #[must_use]
    pub fn execute(&self) -> String {
        let mut out = String::new();
        for currency in self.registry.currencies() {
            let _ = writeln!(
                out,
                "{} (coin type {})",
                currency.name, currency.bip44_coin_type
            );
            let mut units: Vec<_> = currency.units.iter().collect();
            units.sort_by_key(|unit| unit.number_of_decimals);
            for unit in units {
                let _ = writeln!(
                    out,
                    "  {:<10} {:>2}  {}",
                    unit.name, unit.number_of_decimals, unit.symbol
                );
            }
        }
        out.truncate(out.trim_end().len());
        out
    }
}
