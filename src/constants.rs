//! Shared constants for the campaign pipeline
//!

/// Reusable poster looks, cycled by variant index.
pub const POSTER_STYLES: [&str; 3] = [
    "Soft pastel studio gradients with diffused light",
    "High-energy neon scene with motion trails",
    "Premium editorial dark backdrop with rim lighting",
];

/// Fewest posters a request can ask for.
pub const MIN_VARIATIONS: usize = 1;

/// Most posters a request can ask for.
pub const MAX_VARIATIONS: usize = 3;

/// Headline used when the model doesn't give us one.
pub const DEFAULT_TITLE: &str = "Untitled concept";

/// Caption used when the model doesn't give us one.
pub const DEFAULT_CAPTION: &str = "Gemini could not infer a caption.";

/// MIME type assumed for inline media that doesn't declare one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Name of the copy entry inside the campaign archive.
pub const COPY_ENTRY_NAME: &str = "copy.txt";

/// Multipart field carrying the brand logo.
pub const FIELD_BRAND_LOGO: &str = "brandLogo";

/// Multipart field carrying the product photo.
pub const FIELD_PRODUCT_IMAGE: &str = "productImage";

/// Multipart field carrying the requested number of posters.
pub const FIELD_VARIATION_COUNT: &str = "variationCount";

/// Default Gemini model for copy.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

/// Default Gemini model for posters.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Default Gemini REST base.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Bytes in a megabyte, for the upload limit.
pub const BYTES_PER_MB: usize = 1024 * 1024;
