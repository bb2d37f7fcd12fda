//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (durable storage, the assemblies API, image loading).
//! Implementations live in `src/adapters/`.

pub mod catalog;
pub mod image;
pub mod storage;

pub use catalog::{AssemblyCatalog, CatalogFuture};
pub use image::{ImageProbe, ProbeFuture};
pub use storage::KeyValueStore;

/// Error type returned across port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
