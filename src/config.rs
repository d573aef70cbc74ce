//! Config handling

use std::time::Duration;

use tracing::log::LevelFilter;

use crate::cli::CliOptions;
use crate::constants::BYTES_PER_MB;

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Settings for talking to the generative backend.
#[derive(Clone, Debug)]
pub struct GenAiConfig {
    /// API key sent with every call
    pub api_key: String,
    /// REST base, without a trailing slash
    pub api_base: String,
    /// Model for copy
    pub text_model: String,
    /// Model for posters
    pub image_model: String,
    /// Per-call timeout
    pub request_timeout: Duration,
}

/// Errors returned when resolving runtime configuration.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither GENAI_API_KEY nor GEMINI_API_KEY was set.
    MissingApiKey,
    /// The per-call timeout was zero.
    ZeroTimeout,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => {
                write!(f, "Set GENAI_API_KEY or GEMINI_API_KEY before starting the server.")
            }
            Self::ZeroTimeout => write!(f, "Request timeout must be at least one second"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GenAiConfig {
    /// Picks the API key and model settings out of the CLI options.
    pub fn from_cli(cli: &CliOptions) -> Result<Self, ConfigError> {
        let api_key = [cli.genai_api_key.as_deref(), cli.gemini_api_key.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?
            .to_string();
        if cli.request_timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            api_key,
            api_base: cli.api_base.trim().trim_end_matches('/').to_string(),
            text_model: cli.text_model.trim().to_string(),
            image_model: cli.image_model.trim().to_string(),
            request_timeout: Duration::from_secs(cli.request_timeout),
        })
    }
}

/// Upload body limit in bytes.
pub fn upload_limit_bytes(cli: &CliOptions) -> usize {
    cli.max_upload_mb.max(1).saturating_mul(BYTES_PER_MB)
}
