mod cli;
mod query;
mod serve;

use agri_orchestrator::OrchestratorConfig;
use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let telemetry = match &cli.otlp_endpoint {
        Some(endpoint) => agri_telemetry::init_with_otlp("agri-orchestrator", endpoint),
        None => agri_telemetry::init_telemetry_with_format("agri-orchestrator", cli.log_format),
    };
    if let Err(e) = telemetry {
        eprintln!("Failed to initialize telemetry: {e}");
    }

    let config = match &cli.config {
        Some(path) => OrchestratorConfig::load(path)?,
        None => OrchestratorConfig::default(),
    };

    let outcome = match cli.command {
        Commands::Serve { host, port } => serve::run_serve(&config, host, port).await,
        Commands::Agents => query::run_agents(&config).await,
        Commands::Ask { query: words } => query::run_ask(&config, &words.join(" ")).await,
        Commands::Tool { name, args } => query::run_tool(&config, &name, &args).await,
    };

    if cli.otlp_endpoint.is_some() {
        agri_telemetry::shutdown_telemetry();
    }
    outcome
}
