//! Live adapter for the `ImageProbe` port: download and read the PNG header.

use std::io::Cursor;

use reqwest::Client;
use thiserror::Error;

use crate::model::NaturalSize;
use crate::ports::{ImageProbe, PortError, ProbeFuture};

/// Failure modes of an image probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The image could not be downloaded.
    #[error("image request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The image host answered with a non-2xx status.
    #[error("image request returned status {0}")]
    Status(u16),

    /// The bytes were not a decodable PNG.
    #[error("failed to decode image header: {0}")]
    Decode(#[from] png::DecodingError),
}

/// Probes diagram images over HTTP.
pub struct HttpImageProbe {
    client: Client,
}

impl HttpImageProbe {
    /// Creates a new probe with its own HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<NaturalSize, ProbeError> {
        tracing::debug!(url, "probing diagram image");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        png_size(&bytes)
    }
}

impl Default for HttpImageProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProbe for HttpImageProbe {
    fn natural_size(&self, url: &str) -> ProbeFuture<'_> {
        let url = url.to_string();
        Box::pin(async move {
            self.fetch(&url).await.map_err(PortError::from)
        })
    }
}

/// Reads the pixel dimensions from a PNG header.
///
/// # Errors
///
/// Returns [`ProbeError::Decode`] if `bytes` is not a PNG.
pub fn png_size(bytes: &[u8]) -> Result<NaturalSize, ProbeError> {
    let reader = png::Decoder::new(Cursor::new(bytes)).read_info()?;
    let info = reader.info();
    Ok(NaturalSize::new(info.width, info.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            let data = vec![0u8; (width * height) as usize];
            writer.write_image_data(&data).unwrap();
        }
        out
    }

    #[test]
    fn reads_png_dimensions() {
        let bytes = encode_png(12, 7);
        assert_eq!(png_size(&bytes).unwrap(), NaturalSize::new(12, 7));
    }

    #[test]
    fn rejects_non_png_bytes() {
        let err = png_size(b"GIF89a not a png").unwrap_err();
        assert!(matches!(err, ProbeError::Decode(_)));
    }
}
