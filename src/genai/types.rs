//! Wire types for the `generateContent` call.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_IMAGE_MIME;

/// Request body for `POST models/{model}:generateContent`
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation turns; we only ever send one
    pub contents: Vec<Content>,
    /// Output controls
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Output controls for a request.
#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    /// Which kinds of output the model may produce
    #[serde(rename = "responseModalities")]
    pub response_modalities: Vec<String>,
}

/// One turn of content.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Content {
    /// `user` on the way out, `model` on the way back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Text and media pieces
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A piece of text or inline media.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Part {
    /// Text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Embedded binary payload
    #[serde(
        rename = "inlineData",
        alias = "inline_data",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline media part carrying base64 data.
    pub fn inline(mime_type: &str, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: Some(mime_type.to_string()),
                data,
            }),
        }
    }
}

/// Base64 media embedded in a part.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InlineData {
    /// Declared media type
    #[serde(
        rename = "mimeType",
        alias = "mime_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mime_type: Option<String>,
    /// Base64 payload
    #[serde(default)]
    pub data: String,
}

/// A candidate answer.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Candidate {
    /// The candidate's content, absent when it was blocked
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(rename = "finishReason", alias = "finish_reason", default)]
    pub finish_reason: Option<String>,
}

/// Error object some failures carry in the body.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiError {
    /// Human readable message
    #[serde(default)]
    pub message: String,
}

/// What came back from a `generateContent` call.
///
/// The API hands parts back nested under `candidates`, while some client libraries
/// flatten them to a top-level `parts`. Both are accepted.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// Flattened parts
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
    /// Candidate answers, first one wins
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    /// Set when the call failed
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Where a response keeps its parts.
#[derive(Debug)]
pub enum ResponseShape<'a> {
    /// Top-level `parts`
    Flat(&'a [Part]),
    /// `candidates[0].content.parts`
    Nested(&'a [Part]),
    /// Neither; treated as empty
    Unrecognized,
}

/// An inline image found in a response, still base64 encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InlineImage<'a> {
    /// Declared type, or `image/png`
    pub mime_type: &'a str,
    /// Base64 payload, never empty
    pub data: &'a str,
}

impl GenerateContentResponse {
    /// Works out which of the known layouts this response uses.
    pub fn shape(&self) -> ResponseShape<'_> {
        if let Some(parts) = self.parts.as_deref()
            && !parts.is_empty()
        {
            return ResponseShape::Flat(parts);
        }
        match self
            .candidates
            .as_deref()
            .and_then(<[Candidate]>::first)
            .and_then(|candidate| candidate.content.as_ref())
        {
            Some(content) => ResponseShape::Nested(&content.parts),
            None => ResponseShape::Unrecognized,
        }
    }

    /// The parts of whichever layout is present.
    pub fn content_parts(&self) -> &[Part] {
        match self.shape() {
            ResponseShape::Flat(parts) | ResponseShape::Nested(parts) => parts,
            ResponseShape::Unrecognized => &[],
        }
    }

    /// First part carrying non-empty inline data.
    pub fn inline_image(&self) -> Option<InlineImage<'_>> {
        self.content_parts().iter().find_map(|part| {
            let inline = part.inline_data.as_ref()?;
            if inline.data.is_empty() {
                return None;
            }
            Some(InlineImage {
                mime_type: inline
                    .mime_type
                    .as_deref()
                    .filter(|mime| !mime.trim().is_empty())
                    .unwrap_or(DEFAULT_IMAGE_MIME),
                data: &inline.data,
            })
        })
    }

    /// All text parts joined together.
    pub fn text(&self) -> String {
        self.content_parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}
