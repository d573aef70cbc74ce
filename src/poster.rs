//! Poster rendering. Each variant stands alone: one failing never stops the rest.

use base64::Engine;
use base64::engine::general_purpose;
use serde::Serialize;
use tracing::{error, info};

use crate::constants::POSTER_STYLES;
use crate::genai::GenerativeService;
use crate::ingest::CanonicalImage;

/// Image bytes as returned by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Declared media type
    pub mime_type: String,
    /// Decoded image bytes
    pub data: Vec<u8>,
}

impl GeneratedImage {
    /// `data:<mime>;base64,<payload>`
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.data)
        )
    }
}

/// A successfully rendered poster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PosterResult {
    /// Style text the poster was rendered with
    pub style: String,
    /// The poster itself
    pub image: GeneratedImage,
}

/// What the browser gets for each poster.
#[derive(Clone, Debug, Serialize)]
pub struct PosterView {
    /// Style text
    pub style: String,
    /// Self-describing image payload
    pub image_data_url: String,
}

impl From<&PosterResult> for PosterView {
    fn from(poster: &PosterResult) -> Self {
        Self {
            style: poster.style.clone(),
            image_data_url: poster.image.data_url(),
        }
    }
}

/// How a single variant went.
#[derive(Debug)]
pub enum VariantOutcome {
    /// Rendered fine
    Rendered(PosterResult),
    /// Nothing usable came back
    Failed {
        /// Zero-based variant index
        index: usize,
        /// Why it failed
        reason: String,
    },
}

impl VariantOutcome {
    /// The poster, if there is one.
    pub fn into_poster(self) -> Option<PosterResult> {
        match self {
            Self::Rendered(poster) => Some(poster),
            Self::Failed { .. } => None,
        }
    }
}

/// Style for variant `index`, wrapping around the registry.
pub fn style_for(index: usize) -> &'static str {
    POSTER_STYLES[index % POSTER_STYLES.len()]
}

/// Art direction for one poster.
pub fn poster_instruction(style: &str) -> String {
    format!(
        r#"You are an art director composing a finished advertising poster.
- Use the provided PRODUCT IMAGE as the hero subject without heavy distortion.
- Place the provided LOGO IMAGE clearly in a top or bottom corner.
- Build supporting typography, lighting, and background inspired by: {style}.
- Keep everything photorealistic and ready for print.
Return only the rendered image."#
    )
}

/// Renders one variant. Errors and empty responses both come back as `Failed`.
pub async fn render_variant(
    service: &dyn GenerativeService,
    product: &CanonicalImage,
    logo: &CanonicalImage,
    index: usize,
) -> VariantOutcome {
    let style = style_for(index);
    let failed = |reason: String| VariantOutcome::Failed { index, reason };

    let response = match service
        .generate_image(&poster_instruction(style), &[product, logo])
        .await
    {
        Ok(response) => response,
        Err(err) => return failed(format!("{err:#}")),
    };
    let Some(inline) = response.inline_image() else {
        return failed("response carried no inline image".to_string());
    };
    let data = match general_purpose::STANDARD.decode(inline.data) {
        Ok(data) => data,
        Err(err) => return failed(format!("inline image was not valid base64: {err}")),
    };

    VariantOutcome::Rendered(PosterResult {
        style: style.to_string(),
        image: GeneratedImage {
            mime_type: inline.mime_type.to_string(),
            data,
        },
    })
}

/// Renders `count` variants in order and keeps the ones that worked. `count` is
/// expected to be clamped already.
pub async fn generate_posters(
    service: &dyn GenerativeService,
    product: &CanonicalImage,
    logo: &CanonicalImage,
    count: usize,
) -> Vec<PosterResult> {
    let mut outcomes = Vec::with_capacity(count);
    for index in 0..count {
        outcomes.push(render_variant(service, product, logo, index).await);
    }

    let posters: Vec<PosterResult> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            VariantOutcome::Failed { index, reason } => {
                error!("Error generating poster {}: {}", index + 1, reason);
                None
            }
            rendered => rendered.into_poster(),
        })
        .collect();
    info!("Rendered {} of {} posters", posters.len(), count);
    posters
}
