//! The generative backend, seen as two capabilities: text from images, and an image
//! from images plus a prompt.

use async_trait::async_trait;

use crate::ingest::CanonicalImage;

pub mod gemini;
#[cfg(test)]
pub(crate) mod testing;
pub mod types;

pub use types::{GenerateContentResponse, InlineImage, ResponseShape};

/// Anything that can write copy and render posters from reference images.
///
/// Images are passed in the order the model should see them.
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Runs `instruction` against `images` and returns the model's text.
    async fn generate_text(
        &self,
        instruction: &str,
        images: &[&CanonicalImage],
    ) -> anyhow::Result<String>;

    /// Runs `instruction` against `images` and returns the raw response, which may
    /// or may not carry an inline image.
    async fn generate_image(
        &self,
        instruction: &str,
        images: &[&CanonicalImage],
    ) -> anyhow::Result<GenerateContentResponse>;
}
