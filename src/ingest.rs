//! Upload decoding. Every accepted upload becomes an 8-bit RGB raster.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::error::CampaignError;

/// Raw upload straight off the request.
#[derive(Clone, Debug, Default)]
pub struct UploadedImage {
    /// File contents
    pub bytes: Vec<u8>,
    /// Content type the client declared, if any
    pub content_type: Option<String>,
}

impl UploadedImage {
    /// Wraps bytes with an optional declared content type.
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }
}

/// Decoded three-channel pixel buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalImage {
    pixels: RgbImage,
}

impl CanonicalImage {
    /// Pixel width
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Pixel height
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the underlying buffer.
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Re-encodes the image as PNG for sending upstream.
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut output = Cursor::new(Vec::new());
        self.pixels.write_to(&mut output, ImageFormat::Png)?;
        Ok(output.into_inner())
    }
}

impl From<RgbImage> for CanonicalImage {
    fn from(pixels: RgbImage) -> Self {
        Self { pixels }
    }
}

/// Decodes an upload. Returns `Ok(None)` when there is nothing to decode so callers
/// can tell an absent file from a corrupt one.
pub fn decode(upload: Option<&UploadedImage>) -> Result<Option<CanonicalImage>, CampaignError> {
    let Some(upload) = upload else {
        return Ok(None);
    };
    if upload.bytes.is_empty() {
        return Ok(None);
    }

    let reader = image::ImageReader::new(Cursor::new(upload.bytes.as_slice()))
        .with_guessed_format()
        .map_err(|err| {
            debug!("Failed to guess image format: {}", err);
            CampaignError::InvalidImage(err.to_string())
        })?;
    let image = reader.decode().map_err(|err| {
        debug!(
            "Failed to decode image (declared {:?}): {}",
            upload.content_type, err
        );
        CampaignError::InvalidImage(err.to_string())
    })?;

    Ok(Some(CanonicalImage::from(image.to_rgb8())))
}

/// Decodes both uploads, returning `(logo, product)`.
pub fn validate_pair(
    logo: Option<&UploadedImage>,
    product: Option<&UploadedImage>,
) -> Result<(CanonicalImage, CanonicalImage), CampaignError> {
    let logo = decode(logo)?;
    let product = decode(product)?;
    match (logo, product) {
        (Some(logo), Some(product)) => Ok((logo, product)),
        _ => Err(CampaignError::MissingInput),
    }
}
