//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;

use crate::constants::{DEFAULT_API_BASE, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL};

#[derive(Parser, Debug, Clone)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "CAMPAIGNER_DEBUG")]
    /// Enable debug logging. Env: CAMPAIGNER_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "5000", env = "CAMPAIGNER_PORT")]
    /// http listener, defaults to `5000`.
    /// Env: CAMPAIGNER_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "CAMPAIGNER_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: CAMPAIGNER_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, env = "GENAI_API_KEY", hide_env_values = true)]
    /// Generative API key, takes priority over `--gemini-api-key`.
    /// Env: GENAI_API_KEY
    pub genai_api_key: Option<String>,
    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    /// Gemini API key. Env: GEMINI_API_KEY
    pub gemini_api_key: Option<String>,

    #[clap(long, default_value = DEFAULT_TEXT_MODEL, env = "GEMINI_TEXT_MODEL")]
    /// Model used to write the headline and caption. Env: GEMINI_TEXT_MODEL
    pub text_model: String,
    #[clap(long, default_value = DEFAULT_IMAGE_MODEL, env = "GEMINI_IMAGE_MODEL")]
    /// Model used to render posters. Env: GEMINI_IMAGE_MODEL
    pub image_model: String,
    #[clap(long, default_value = DEFAULT_API_BASE, env = "GEMINI_API_BASE")]
    /// REST base for the generative API. Env: GEMINI_API_BASE
    pub api_base: String,

    #[clap(long, default_value = "120", env = "CAMPAIGNER_REQUEST_TIMEOUT")]
    /// Seconds allowed for each generative call. Env: CAMPAIGNER_REQUEST_TIMEOUT
    pub request_timeout: u64,
    #[clap(long, default_value = "20", env = "CAMPAIGNER_MAX_UPLOAD_MB")]
    /// Largest accepted upload request, in megabytes. Env: CAMPAIGNER_MAX_UPLOAD_MB
    pub max_upload_mb: usize,
}
