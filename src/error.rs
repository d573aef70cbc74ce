//! Error handling

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tracing::info;

/// Failures that end a campaign request.
#[derive(Debug)]
pub enum CampaignError {
    /// One or both uploads were absent or empty
    MissingInput,
    /// An upload was present but couldn't be decoded as a raster image
    InvalidImage(String),
    /// The request body itself was malformed
    BadRequest(String),
    /// Every poster variant failed
    NoUsableOutput,
    /// When an internal server error occurs
    InternalServerError(String),
}

impl CampaignError {
    /// Whether the caller sent something we can't work with.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingInput | Self::InvalidImage(_) | Self::BadRequest(_)
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::MissingInput | Self::InvalidImage(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NoUsableOutput => StatusCode::BAD_GATEWAY,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for CampaignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInput => write!(f, "Both brand logo and product image are required"),
            Self::InvalidImage(reason) => write!(f, "Uploaded file is not a valid image: {reason}"),
            Self::BadRequest(reason) => write!(f, "Bad request: {reason}"),
            Self::NoUsableOutput => write!(f, "Gemini could not render any posters. Try again."),
            Self::InternalServerError(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for CampaignError {}

impl From<std::io::Error> for CampaignError {
    fn from(err: std::io::Error) -> Self {
        CampaignError::InternalServerError(err.to_string())
    }
}

impl From<zip::result::ZipError> for CampaignError {
    fn from(err: zip::result::ZipError) -> Self {
        CampaignError::InternalServerError(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for CampaignError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        CampaignError::BadRequest(err.body_text())
    }
}

impl IntoResponse for CampaignError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        match &self {
            CampaignError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
            }
            CampaignError::NoUsableOutput => {
                tracing::error!("No posters rendered for request");
            }
            other => {
                info!("Rejected campaign request: {}", other);
            }
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
