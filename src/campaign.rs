//! Runs a full campaign request: validate, write copy, render posters, pack.

use std::num::IntErrorKind;

use serde::Serialize;
use tracing::info;

use crate::archive;
use crate::constants::{MAX_VARIATIONS, MIN_VARIATIONS};
use crate::copy::{CopyBlock, generate_copy};
use crate::error::CampaignError;
use crate::genai::GenerativeService;
use crate::ingest::{UploadedImage, validate_pair};
use crate::poster::{PosterResult, PosterView, generate_posters};

/// Everything the caller sent.
#[derive(Clone, Debug, Default)]
pub struct CampaignRequest {
    /// Brand logo upload
    pub logo: Option<UploadedImage>,
    /// Product photo upload
    pub product: Option<UploadedImage>,
    /// Requested poster count, as sent
    pub variation_count: Option<String>,
}

/// Successful campaign payload.
#[derive(Clone, Debug, Serialize)]
pub struct CampaignResponse {
    /// Headline and caption
    pub copy: CopyBlock,
    /// Rendered posters, in variant order
    pub posters: Vec<PosterView>,
    /// ZIP of `copy.txt` and the posters, base64 encoded
    pub zip_base64: String,
}

/// Parses the requested count, falling back to 1, and clamps it to 1..=3.
pub fn variation_count(raw: Option<&str>) -> usize {
    let requested: i64 = match raw.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(value)) => value,
        Some(Err(err)) => match err.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => MIN_VARIATIONS as i64,
        },
        None => MIN_VARIATIONS as i64,
    };
    requested.clamp(MIN_VARIATIONS as i64, MAX_VARIATIONS as i64) as usize
}

/// The campaign pipeline.
pub async fn run(
    service: &dyn GenerativeService,
    request: &CampaignRequest,
) -> Result<CampaignResponse, CampaignError> {
    let count = variation_count(request.variation_count.as_deref());
    let (logo, product) = validate_pair(request.logo.as_ref(), request.product.as_ref())?;
    info!(
        "Generating campaign: product {}x{}, logo {}x{}, {} variation(s)",
        product.width(),
        product.height(),
        logo.width(),
        logo.height(),
        count
    );

    let copy = generate_copy(service, &product, &logo).await;
    let posters = generate_posters(service, &product, &logo, count).await;
    if posters.is_empty() {
        return Err(CampaignError::NoUsableOutput);
    }

    respond(copy, &posters)
}

fn respond(copy: CopyBlock, posters: &[PosterResult]) -> Result<CampaignResponse, CampaignError> {
    let zip_base64 = archive::pack(&copy, posters)?;
    Ok(CampaignResponse {
        copy,
        posters: posters.iter().map(PosterView::from).collect(),
        zip_base64,
    })
}
