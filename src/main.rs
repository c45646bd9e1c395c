//! Paygent - payments chat service
//!
//! Serves the chat and OAuth routes over HTTP.

#![allow(missing_docs)]

use clap::Parser;
use paygent::config::{Config, DEFAULT_CONFIG_PATH};
use paygent::server;
use paygent::utils::logging::{LogFormat, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Command line options
#[derive(Debug, Parser)]
#[command(name = "paygent", version, about = "Payments chat service")]
struct Cli {
    /// Configuration file
    #[arg(short, long, env = "PAYGENT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Bind host, overriding the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding the configuration file
    #[arg(short, long)]
    port: Option<u16>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "PAYGENT_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format: pretty or json
    #[arg(long, env = "PAYGENT_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&cli.log_level, LogFormat::from_str_lossy(&cli.log_format));

    let mut config = match Config::load(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let build = paygent::build_info();
    info!(version = build.version, git_hash = build.git_hash, "Paygent starting");

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
