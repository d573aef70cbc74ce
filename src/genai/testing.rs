//! In-process backend for tests.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose;
use image::{ImageFormat, Rgb, RgbImage};

use super::GenerativeService;
use super::types::{Candidate, Content, GenerateContentResponse, Part};
use crate::ingest::CanonicalImage;

/// Replays canned answers in call order.
#[derive(Default)]
pub(crate) struct ScriptedService {
    text_reply: Option<String>,
    image_replies: Mutex<VecDeque<Result<GenerateContentResponse, String>>>,
    pub(crate) text_calls: AtomicUsize,
    pub(crate) image_calls: AtomicUsize,
    pub(crate) image_instructions: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub(crate) fn new(text_reply: &str) -> Self {
        Self {
            text_reply: Some(text_reply.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn then_image(self, mime_type: &str, bytes: &[u8]) -> Self {
        self.then_response(image_response(mime_type, bytes))
    }

    pub(crate) fn then_response(self, response: GenerateContentResponse) -> Self {
        self.push(Ok(response))
    }

    pub(crate) fn then_error(self, message: &str) -> Self {
        self.push(Err(message.to_string()))
    }

    fn push(self, reply: Result<GenerateContentResponse, String>) -> Self {
        if let Ok(mut replies) = self.image_replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    pub(crate) fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeService for ScriptedService {
    async fn generate_text(
        &self,
        _instruction: &str,
        _images: &[&CanonicalImage],
    ) -> anyhow::Result<String> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.text_reply
            .clone()
            .ok_or_else(|| anyhow!("no scripted text reply"))
    }

    async fn generate_image(
        &self,
        instruction: &str,
        images: &[&CanonicalImage],
    ) -> anyhow::Result<GenerateContentResponse> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(images.len(), 2, "product and logo are always sent");
        if let Ok(mut seen) = self.image_instructions.lock() {
            seen.push(instruction.to_string());
        }
        let next = self
            .image_replies
            .lock()
            .map_err(|_| anyhow!("scripted replies poisoned"))?
            .pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted image reply")),
        }
    }
}

/// A nested `candidates` response holding one inline image.
pub(crate) fn image_response(mime_type: &str, bytes: &[u8]) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part::inline(
                    mime_type,
                    general_purpose::STANDARD.encode(bytes),
                )],
            }),
            finish_reason: Some("STOP".to_string()),
        }]),
        ..Default::default()
    }
}

/// A small encoded PNG.
pub(crate) fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    RgbImage::from_pixel(width, height, Rgb(color))
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("encode png");
    buffer.into_inner()
}
