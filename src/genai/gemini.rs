//! Gemini REST adapter for [`GenerativeService`].

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose;
use tracing::debug;

use super::GenerativeService;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::config::GenAiConfig;
use crate::ingest::CanonicalImage;

/// Poster calls may answer with text alongside the image.
const IMAGE_MODALITIES: &[&str] = &["TEXT", "IMAGE"];

/// Talks to `models/{model}:generateContent`.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GenAiConfig,
}

impl GeminiClient {
    /// Builds a client whose calls time out after `config.request_timeout`.
    pub fn new(config: GenAiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    fn endpoint_for_model(&self, model: &str) -> String {
        let trimmed = model.trim();
        let model_path = if trimmed.starts_with("models/") {
            trimmed.to_string()
        } else {
            format!("models/{trimmed}")
        };
        format!("{}/{}:generateContent", self.config.api_base, model_path)
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let endpoint = self.endpoint_for_model(model);
        debug!("POST {}", endpoint);

        let resp = self
            .http
            .post(&endpoint)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Request to {model}:generateContent failed"))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .with_context(|| format!("Failed reading {model}:generateContent body"))?;
        if !status.is_success() {
            return Err(anyhow!(
                "Gemini API error {status}: {}",
                String::from_utf8_lossy(&bytes)
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {model}:generateContent JSON"))?;
        if let Some(err) = parsed.error.as_ref() {
            return Err(anyhow!("Gemini API returned error: {}", err.message));
        }
        Ok(parsed)
    }
}

/// One user turn: the instruction, then each image as inline PNG.
pub(crate) fn build_request(
    instruction: &str,
    images: &[&CanonicalImage],
    response_modalities: Option<&[&str]>,
) -> Result<GenerateContentRequest> {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(Part::text(instruction));
    for (idx, image) in images.iter().enumerate() {
        let png = image
            .to_png()
            .with_context(|| format!("Failed to encode reference image {}", idx + 1))?;
        parts.push(Part::inline("image/png", general_purpose::STANDARD.encode(png)));
    }

    Ok(GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        generation_config: response_modalities.map(|modalities| GenerationConfig {
            response_modalities: modalities.iter().map(|m| m.to_string()).collect(),
        }),
    })
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn generate_text(
        &self,
        instruction: &str,
        images: &[&CanonicalImage],
    ) -> Result<String> {
        let request = build_request(instruction, images, None)?;
        let response = self
            .generate_content(&self.config.text_model, &request)
            .await?;
        Ok(response.text())
    }

    async fn generate_image(
        &self,
        instruction: &str,
        images: &[&CanonicalImage],
    ) -> Result<GenerateContentResponse> {
        let request = build_request(instruction, images, Some(IMAGE_MODALITIES))?;
        self.generate_content(&self.config.image_model, &request).await
    }
}
