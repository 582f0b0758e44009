use anyhow::Context;
use clap::Parser;

use vibecode_server::logging::init_logging;
use vibecode_server::{Cli, ServerConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.debug);

    if cli.debug {
        log::debug!("Debug mode enabled");
    }

    let config = ServerConfig::from(cli);

    log::info!("🚀 VibeCode AI Server running on port {}", config.port);
    log::info!("📊 Health check: http://localhost:{}/health", config.port);
    log::info!("🤖 AI Mode: {}", config.mode_label());

    vibecode_server::run(config)
        .await
        .context("VibeCode server terminated with an error")
}
