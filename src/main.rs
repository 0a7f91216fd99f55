use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campaign_strategist::api;
use campaign_strategist::config::{AppConfig, ConfigError, LoggingConfig, DEFAULT_CONFIG_PATH};
use campaign_strategist::manager::Manager;
use campaign_strategist::models::InputType;
use campaign_strategist::strategist::{tools, SourceInput, Strategist};

#[derive(Parser)]
#[command(name = "strategist")]
#[command(about = "Campaign intake server: extracts requirements from campaign briefs")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run the strategist on a local file or URL and print the action plan
    Extract {
        /// screenshot, text_file, pdf_file, docx_file, url or discord_link
        #[arg(short = 't', long)]
        input_type: InputType,

        /// File path or URL
        input: String,
    },
    /// Check that the external OCR and PDF tools are installed
    CheckTools,
}

/// Initialize tracing to stdout (or stderr when stdout carries output), plus
/// the configured log file.
fn init_tracing(config: &LoggingConfig, debug: bool, use_stderr: bool) -> anyhow::Result<()> {
    let http_level = if debug { "debug" } else { config.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(
        |_| format!("campaign_strategist={},tower_http={}", config.level, http_level),
    ));

    let file_layer = match &config.file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    if use_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
    Ok(())
}

async fn serve(config: AppConfig, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    config
        .ensure_data_dirs()
        .context("Failed to create data directories")?;
    tracing::info!(
        "Data directories ensured at: {}",
        config.paths.data_dir.display()
    );

    let manager = Manager::new(Strategist::from_config(&config)?);
    let app = api::create_router(manager, &config.server);

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!(
        "Campaign strategist listening on http://{}:{} (debug: {})",
        host,
        port,
        config.server.debug
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Extract { input_type, input }) => {
            // A local run works without a config file.
            let config = match AppConfig::load(&cli.config) {
                Err(ConfigError::NotFound(_)) => AppConfig::default(),
                other => other?,
            };
            init_tracing(&config.logging, false, true)?;

            let strategist = Strategist::from_config(&config)?;
            let plan = strategist
                .analyze("local", &SourceInput::from_local(input_type, input))
                .await?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Some(Commands::CheckTools) => {
            for (tool, available) in tools::check_tools() {
                println!("{}: {}", tool, if available { "found" } else { "missing" });
            }
        }
        Some(Commands::Serve { host, port }) => {
            let config = AppConfig::load(&cli.config)?;
            init_tracing(&config.logging, config.server.debug, false)?;
            tracing::info!("Configuration loaded from {}", cli.config.display());
            serve(config, host, port).await?;
        }
        None => {
            let config = AppConfig::load(&cli.config)?;
            init_tracing(&config.logging, config.server.debug, false)?;
            tracing::info!("Configuration loaded from {}", cli.config.display());
            serve(config, None, None).await?;
        }
    }

    Ok(())
}
