//! Live adapters for real external interactions.

pub mod catalog;
pub mod image;
pub mod storage;

pub use catalog::{CatalogError, HttpAssemblyCatalog};
pub use image::{HttpImageProbe, ProbeError};
pub use storage::FileKeyValueStore;
