//! Headline and caption generation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::constants::{DEFAULT_CAPTION, DEFAULT_TITLE};
use crate::genai::GenerativeService;
use crate::ingest::CanonicalImage;

/// Headline and caption for a campaign. Both are always non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyBlock {
    /// Six-word headline
    pub title: String,
    /// Short caption
    pub caption: String,
}

impl CopyBlock {
    /// Builds a block, swapping in defaults for blank fields.
    pub fn new(title: Option<&str>, caption: Option<&str>) -> Self {
        Self {
            title: non_empty(title).unwrap_or(DEFAULT_TITLE).to_string(),
            caption: non_empty(caption).unwrap_or(DEFAULT_CAPTION).to_string(),
        }
    }
}

impl Default for CopyBlock {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Instruction sent along with the product and logo.
pub fn copy_instruction() -> &'static str {
    r#"You are an auto-creative engine for advertising.
You receive two reference images: the hero product and the brand logo.
Infer the product category, mood, and value props strictly from the visuals.
Return JSON with:
{
    "title": "6 word headline",
    "caption": "Punchy caption under 40 words"
}
No markdown, no commentary."#
}

/// Asks the backend for copy. A failed call still yields the default block so the
/// posters can go ahead.
pub async fn generate_copy(
    service: &dyn GenerativeService,
    product: &CanonicalImage,
    logo: &CanonicalImage,
) -> CopyBlock {
    match service
        .generate_text(copy_instruction(), &[product, logo])
        .await
    {
        Ok(raw) => parse_copy(&raw),
        Err(err) => {
            error!("Error generating copy: {:#}", err);
            CopyBlock::default()
        }
    }
}

/// Reads the model's reply, as JSON when it is JSON and line by line when it isn't.
pub fn parse_copy(raw: &str) -> CopyBlock {
    match parse_json_copy(raw) {
        Some(copy) => copy,
        None => {
            debug!("Copy response was not JSON, using line parser");
            fallback_parse_copy(raw)
        }
    }
}

fn parse_json_copy(raw: &str) -> Option<CopyBlock> {
    let parsed: Value = serde_json::from_str(strip_code_fence(raw)).ok()?;
    let object = parsed.as_object()?;
    Some(CopyBlock::new(
        object.get("title").and_then(Value::as_str),
        object.get("caption").and_then(Value::as_str),
    ))
}

/// Drops a surrounding ``` fence, with or without a language tag.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = body.strip_suffix("```") else {
        return trimmed;
    };
    match body.split_once('\n') {
        Some((tag, rest)) if !tag.trim_start().starts_with('{') => rest.trim(),
        _ => body.trim(),
    }
}

/// Line scanner for replies that ignored the JSON request. Never fails.
pub fn fallback_parse_copy(raw: &str) -> CopyBlock {
    let body = strip_code_fence(raw);
    let mut title: Option<&str> = None;
    let mut caption: Option<&str> = None;

    for line in body.lines() {
        let line = line.trim();
        let lower = line.to_lowercase();
        if lower.starts_with("title") || lower.starts_with("headline") {
            title = non_empty(Some(after_colon(line))).or(title);
        }
        if lower.starts_with("caption") {
            caption = non_empty(Some(after_colon(line))).or(caption);
        }
    }

    CopyBlock::new(title, caption.or(Some(body)))
}

fn after_colon(line: &str) -> &str {
    line.split_once(':').map_or(line, |(_, rest)| rest)
}
