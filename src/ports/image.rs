//! Image probe port for discovering a diagram's natural size.

use std::future::Future;
use std::pin::Pin;

use super::PortError;
use crate::model::NaturalSize;

/// Boxed future type alias used by [`ImageProbe`].
pub type ProbeFuture<'a> =
    Pin<Box<dyn Future<Output = Result<NaturalSize, PortError>> + Send + 'a>>;

/// Loads a raster image far enough to learn its pixel dimensions.
///
/// This plays the role of an image element's load callback: until it
/// resolves, the natural size of a diagram is unknown.
pub trait ImageProbe: Send + Sync {
    /// Returns the natural size of the image at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be fetched or decoded.
    fn natural_size(&self, url: &str) -> ProbeFuture<'_>;
}
