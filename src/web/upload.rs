//! Reads the multipart upload form into a campaign request.

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use tracing::debug;

use crate::campaign::CampaignRequest;
use crate::constants::{FIELD_BRAND_LOGO, FIELD_PRODUCT_IMAGE, FIELD_VARIATION_COUNT};
use crate::error::CampaignError;
use crate::ingest::UploadedImage;

/// Pulls the logo, product and variation count out of a multipart form. Unknown
/// fields are ignored; a repeated field keeps the last value.
pub(crate) async fn read_campaign_form(
    mut multipart: Multipart,
) -> Result<CampaignRequest, CampaignError> {
    let mut request = CampaignRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            FIELD_BRAND_LOGO => {
                request.logo = Some(read_upload(field).await?);
            }
            FIELD_PRODUCT_IMAGE => {
                request.product = Some(read_upload(field).await?);
            }
            FIELD_VARIATION_COUNT => {
                request.variation_count = Some(field.text().await?);
            }
            other => {
                debug!("Ignoring unexpected form field {:?}", other);
            }
        }
    }

    Ok(request)
}

async fn read_upload(field: Field<'_>) -> Result<UploadedImage, CampaignError> {
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await?;
    Ok(UploadedImage::new(bytes.to_vec(), content_type))
}
