//! calculator-server binary
//!
//! Serves the four arithmetic endpoints over HTTP.

use anyhow::Result;
use calculator_server::{shutdown_signal, CalculatorServer, LoggingConfig, ServerConfig, DEFAULT_PORT};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Command line arguments for the calculator server.
#[derive(Parser, Debug)]
#[command(name = "calculator-server")]
#[command(about = "HTTP service for addition, subtraction, multiplication and division")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Directory for error.log and combined.log
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Only log to the console
    #[arg(long)]
    no_file_logs: bool,

    /// Disable CORS
    #[arg(long)]
    no_cors: bool,

    /// Disable per-request logging
    #[arg(long)]
    no_request_logging: bool,
}

impl Args {
    fn logging_config(&self) -> Result<LoggingConfig> {
        let config = LoggingConfig::new()
            .with_level_str(&self.log_level)?
            .with_log_dir(&self.log_dir);
        if self.no_file_logs {
            return Ok(config.without_files());
        }
        Ok(config)
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig::new()
            .with_bind_addr(SocketAddr::new(self.host, self.port))
            .with_cors(!self.no_cors)
            .with_logging(!self.no_request_logging)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let logging_config = args.logging_config()?;
    calculator_server::logging::init(&logging_config)?;

    let config = args.server_config();

    log::debug!("Configuration: {:?}", config);
    log::debug!("Logging: {:?}", logging_config);

    let server = CalculatorServer::new(config);
    if let Err(e) = server.serve_with_shutdown(shutdown_signal()).await {
        log::error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
