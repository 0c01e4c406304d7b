use anyhow::Result;
use clap::Parser;
use tracing::info;
use uprava_core::{config::Config, server, server::ServiceKind, telemetry};

#[derive(Parser, Debug)]
#[command(name = "uprava-core", version, about = "Traffic enforcement services")]
struct Cli {
    /// Service to serve from this process
    #[arg(value_enum)]
    service: ServiceKind,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let metrics = telemetry::init(&config.telemetry)?;

    info!("Starting {} service", cli.service.as_str());

    server::run(config, cli.service, metrics).await
}
