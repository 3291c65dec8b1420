//! Deterministic proxy lookup
//!
//! The same server ID always resolves to the same proxy handle. Handles are
//! created lazily on first lookup and then cached for the process lifetime.

use std::sync::Arc;

use dashmap::DashMap;
use mcpconn_core::{ProxyAddress, ProxyLocator, ServerProxy};
use tracing::debug;

/// Builds a proxy handle for an address the registry has not seen yet
pub trait ProxyFactory: Send + Sync {
    fn create(&self, address: &ProxyAddress) -> Arc<dyn ServerProxy>;
}

/// Caching `ProxyLocator` keyed by proxy address
pub struct ProxyRegistry<F> {
    factory: F,
    proxies: DashMap<ProxyAddress, Arc<dyn ServerProxy>>,
}

impl<F: ProxyFactory> ProxyRegistry<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            proxies: DashMap::new(),
        }
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<F: ProxyFactory> ProxyLocator for ProxyRegistry<F> {
    fn locate(&self, server_id: &str) -> Arc<dyn ServerProxy> {
        let address = ProxyAddress::for_server(server_id);

        // entry() holds the shard lock, so concurrent lookups for the same
        // address never build two handles
        self.proxies
            .entry(address.clone())
            .or_insert_with(|| {
                debug!(address = %address, "Creating proxy handle");
                self.factory.create(&address)
            })
            .value()
            .clone()
    }
}
