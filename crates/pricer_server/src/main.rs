//! Rates pricer server
//!
//! HTML blotter and JSON API for the rates portfolio pricer.

use anyhow::Context;
use clap::Parser;
use pricer_server::config::{build_config, CliArgs as ConfigCliArgs, LogFormat, LogLevel};
use pricer_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Rates pricer server - blotter and JSON API
#[derive(Parser, Debug)]
#[command(name = "pricer_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "PRICER_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PRICER_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PRICER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, env = "PRICER_LOG_FORMAT")]
    log_format: Option<String>,

    /// Fixed valuation date (YYYY-MM-DD); today when omitted
    #[arg(long, env = "PRICER_VALUATION_DATE")]
    valuation_date: Option<String>,

    /// Portfolio configuration file (TOML format)
    #[arg(long, value_name = "FILE", env = "PRICER_PORTFOLIO_CONFIG")]
    portfolio_config: Option<PathBuf>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            log_format: args.log_format,
            valuation_date: args.valuation_date,
            portfolio_config: args.portfolio_config,
        }
    }
}

fn init_tracing(level: LogLevel, format: LogFormat) {
    let json = format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str())),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli_args: ConfigCliArgs = Args::parse().into();
    let config = build_config(&cli_args).context("invalid server configuration")?;

    init_tracing(config.log_level, config.log_format);

    let portfolio = config
        .load_portfolio_config()
        .context("invalid portfolio configuration")?;

    tracing::info!("Rates pricer server v{}", pricer_server::VERSION);
    tracing::info!(
        address = %config.socket_addr(),
        log_level = %config.log_level,
        log_format = %config.log_format,
        valuation_date = ?config.valuation_date,
        max_quotes = portfolio.max_quotes,
        parallel = portfolio.parallel,
        lattice_steps = portfolio.lattice.steps,
        "Server configuration loaded"
    );

    let server = Server::new(config, portfolio)?;
    server.run().await.context("server terminated")?;

    Ok(())
}
