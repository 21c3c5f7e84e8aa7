//! Chain registry for runtime parser lookup.
//!
//! # Design
//!
//! The registry is:
//! - **Thread-safe**: `Arc` internally, so clones are cheap and can move
//!   across tasks
//! - **Copy-on-write**: [`ChainRegistry::register`] on a clone never affects
//!   the original
//!
//! # Example
//!
//! ```
//! use txforge_chain::ChainRegistry;
//!
//! let registry = ChainRegistry::new();
//! assert_eq!(registry.supported_chains(), vec!["cosmos", "ethereum"]);
//!
//! let parsed = registry
//!     .parse("cosmos", br#"{"memo": "", "msgs": []}"#, false)
//!     .unwrap();
//! assert_eq!(parsed.family(), "cosmos");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use txforge_core::error::ParseError;

use crate::chain::{Chain, ParsedTransaction};

/// Registry of raw transaction parsers keyed by [`Chain::id`].
#[derive(Clone)]
pub struct ChainRegistry {
    chains: Arc<HashMap<String, Arc<dyn Chain>>>,
}

impl ChainRegistry {
    /// Create a registry with the built-in parsers:
    /// - `ethereum` - legacy RLP transactions, in ether
    /// - `cosmos` - amino JSON transactions, in atom
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(crate::EthereumParser::new());
        registry.register(crate::CosmosParser::new());
        registry
    }

    /// Create an empty registry.
    ///
    /// # Example
    ///
    /// ```
    /// use txforge_chain::ChainRegistry;
    ///
    /// let registry = ChainRegistry::empty();
    /// assert!(registry.is_empty());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self {
            chains: Arc::new(HashMap::new()),
        }
    }

    /// Register a chain parser, replacing any parser with the same ID.
    pub fn register<C: Chain + 'static>(&mut self, chain: C) {
        let chains = Arc::make_mut(&mut self.chains);
        chains.insert(chain.id().to_string(), Arc::new(chain));
    }

    /// Look up a chain parser by ID.
    #[must_use]
    pub fn get(&self, chain_id: &str) -> Option<&dyn Chain> {
        self.chains.get(chain_id).map(AsRef::as_ref)
    }

    /// Parse `raw` with the parser registered under `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnsupportedChain`] when no parser is registered
    /// under `chain_id`, or the parser's own error.
    pub fn parse(
        &self,
        chain_id: &str,
        raw: &[u8],
        is_signed: bool,
    ) -> Result<ParsedTransaction, ParseError> {
        let chain = self
            .get(chain_id)
            .ok_or_else(|| ParseError::unsupported_chain(chain_id))?;
        chain.parse(raw, is_signed)
    }

    /// List all registered chain IDs, sorted.
    #[must_use]
    pub fn supported_chains(&self) -> Vec<&str> {
        let mut chains: Vec<&str> = self.chains.keys().map(String::as_str).collect();
        chains.sort_unstable();
        chains
    }

    /// Check if a chain is registered.
    #[must_use]
    pub fn supports(&self, chain_id: &str) -> bool {
        self.chains.contains_key(chain_id)
    }

    /// Get the number of registered chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChainRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainRegistry")
            .field("chains", &self.supported_chains())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
