use agri_telemetry::LogFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "agri")]
#[command(about = "Agricultural intelligence orchestrator for Indian farmers", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "AGRI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format (pretty or json)
    #[arg(long, global = true, default_value = "pretty", env = "AGRI_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Export spans to this OTLP collector (e.g. http://localhost:4317)
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover the specialist agents and serve the orchestrator over A2A
    Serve {
        /// Host address to bind the server to
        #[arg(long)]
        host: Option<String>,

        /// Port number for the server to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Discover the specialist agents and list them
    Agents,

    /// Route one question and print the answer
    Ask {
        /// The question, e.g. "Onion price in Nashik?"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Run one orchestrator tool
    Tool {
        /// Tool name, e.g. get_market_weather_insights
        name: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}
