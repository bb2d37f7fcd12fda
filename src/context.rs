//! Service context bundling all port trait objects.

use crate::adapters::live::{FileKeyValueStore, HttpAssemblyCatalog, HttpImageProbe};
use crate::adapters::memory::MemoryKeyValueStore;
use crate::config::Config;
use crate::model::{NaturalSize, SearchResponse};
use crate::ports::{
    AssemblyCatalog, CatalogFuture, ImageProbe, KeyValueStore, PortError, ProbeFuture,
};

const API_NOT_CONFIGURED: &str = "assemblies API is not configured";

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. The context is
/// built once and handed by reference to the cart store and the views.
pub struct ServiceContext {
    /// Durable storage for the cart.
    pub storage: Box<dyn KeyValueStore>,
    /// Assemblies search API.
    pub catalog: Box<dyn AssemblyCatalog>,
    /// Natural-size discovery for diagram images.
    pub images: Box<dyn ImageProbe>,
}

impl ServiceContext {
    /// Creates a live context from the resolved configuration.
    ///
    /// The cart is stored under `config.store_dir`. When the API base URL or
    /// token is missing, the catalog port fails every search with a message
    /// naming the missing setting instead of contacting the network.
    #[must_use]
    pub fn live(config: &Config) -> Self {
        let catalog: Box<dyn AssemblyCatalog> = match (config.base_url(), config.token()) {
            (Ok(base_url), Ok(token)) => Box::new(HttpAssemblyCatalog::new(base_url, token)),
            (Err(e), _) | (_, Err(e)) => Box::new(UnconfiguredCatalog(e.to_string())),
        };

        Self {
            storage: Box::new(FileKeyValueStore::new(&config.store_dir)),
            catalog,
            images: Box::new(HttpImageProbe::new()),
        }
    }

    /// Creates a context whose storage lives in memory and whose network
    /// ports are unconfigured.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            storage: Box::new(MemoryKeyValueStore::new()),
            catalog: Box::new(UnconfiguredCatalog(API_NOT_CONFIGURED.into())),
            images: Box::new(UnconfiguredProbe),
        }
    }
}

// --- Erroring adapters for unconfigured ports ---

struct UnconfiguredCatalog(String);

impl AssemblyCatalog for UnconfiguredCatalog {
    fn search(&self, _vehicle_id: &str) -> CatalogFuture<'_> {
        let message = self.0.clone();
        Box::pin(async move {
            Err::<SearchResponse, PortError>(message.into())
        })
    }
}

struct UnconfiguredProbe;

impl ImageProbe for UnconfiguredProbe {
    fn natural_size(&self, _url: &str) -> ProbeFuture<'_> {
        Box::pin(async {
            Err::<NaturalSize, PortError>("image probe is not configured".into())
        })
    }
}
