use std::sync::Arc;

use campaigner::config::{GenAiConfig, setup_logging, upload_limit_bytes};
use campaigner::genai::gemini::GeminiClient;
use clap::Parser;
use tracing::{error, info};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = campaigner::cli::CliOptions::parse();

    if let Err(err) = setup_logging(cli.debug) {
        eprintln!("Logging disabled: {}", err);
    }

    let genai_config = match GenAiConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!("Configuration error: {}", err);
            return;
        }
    };
    info!(
        "Using text model {} and image model {}",
        genai_config.text_model, genai_config.image_model
    );

    let client = match GeminiClient::new(genai_config) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to set up Gemini client: {:#}", err);
            return;
        }
    };

    if let Err(err) = campaigner::web::setup_server(
        &cli.listen_address,
        cli.port,
        Arc::new(client),
        upload_limit_bytes(&cli),
    )
    .await
    {
        error!("Application error: {}", err);
    }
}
