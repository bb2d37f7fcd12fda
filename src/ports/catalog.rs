//! Assemblies search port.

use std::future::Future;
use std::pin::Pin;

use super::PortError;
use crate::model::SearchResponse;

/// Boxed future type alias used by [`AssemblyCatalog`] to keep the trait dyn-compatible.
pub type CatalogFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SearchResponse, PortError>> + Send + 'a>>;

/// Looks up the diagrams and assemblies for a vehicle.
pub trait AssemblyCatalog: Send + Sync {
    /// Fetches every diagram and assembly for `vehicle_id`.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-2xx status or an
    /// unparseable body.
    fn search(&self, vehicle_id: &str) -> CatalogFuture<'_>;
}
