//! Subtitle conversion server
//!
//! Serves SRT and ASS/SSA to WebVTT conversion over HTTP for browser video
//! players, and exposes the same conversion on the command line.

mod config;
mod config_file;
mod error;
mod http;
mod metrics;
mod state;

use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use subvtt_lib::{SubtitleDocument, SubtitleFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "subvtt-server";

#[derive(Parser, Debug)]
#[command(name = "subvtt-server")]
#[command(version)]
#[command(about = "Convert SRT and ASS/SSA subtitles to WebVTT")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default command)
    Serve,

    /// Convert a subtitle file to WebVTT
    Convert {
        /// Input subtitle file, or - for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source format: srt, ass, ssa or auto
        #[arg(short, long, default_value = "auto")]
        format: SubtitleFormat,
    },

    /// Print what a conversion keeps and skips, as JSON
    Inspect {
        /// Input subtitle file, or - for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Source format: srt, ass, ssa or auto
        #[arg(short, long, default_value = "auto")]
        format: SubtitleFormat,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write the file
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config_file::load_or_default(&cli.config);

    init_logging(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, &cli.config).await,
        Commands::Convert {
            input,
            output,
            format,
        } => convert_file(&input, output.as_deref(), format),
        Commands::Inspect { input, format } => inspect_file(&input, format),
        Commands::InitConfig { path } => {
            config_file::generate_default_config(&path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}

async fn serve(config: ServerConfig, config_path: &Path) -> Result<()> {
    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    if config_path.exists() {
        tracing::info!("Configuration loaded from {}", config_path.display());
    }
    tracing::debug!("Configuration: {:?}", config);

    // Create application state
    let state = Arc::new(AppState::new(config.clone()));

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| ServerError::Config(format!("invalid listen address: {}", e)))?;
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    if input == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read(input)?)
    }
}

fn convert_file(input: &Path, output: Option<&Path>, format: SubtitleFormat) -> Result<()> {
    let raw = read_input(input)?;
    let (document, report) = SubtitleDocument::from_bytes(&raw)
        .with_format(format)
        .convert_with_report();

    tracing::info!(
        "Converted {} as {}: {} cues, {} skipped",
        input.display(),
        report.format,
        report.cue_count(),
        report.skipped_count()
    );

    match output {
        Some(path) => std::fs::write(path, document.as_str())?,
        None => std::io::stdout().write_all(document.as_str().as_bytes())?,
    }
    Ok(())
}

fn inspect_file(input: &Path, format: SubtitleFormat) -> Result<()> {
    let raw = read_input(input)?;
    let (_, report) = SubtitleDocument::from_bytes(&raw)
        .with_format(format)
        .convert_with_report();

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| ServerError::Internal(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Initialize logging with tracing
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so the
/// convert command can write the document to stdout.
fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "subvtt_server={level},subvtt_lib={level},tower_http={level}",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
