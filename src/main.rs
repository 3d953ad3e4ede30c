//! bagsdex - bags.fm token feed
//!
//! Serves the normalized bags.fm leaderboard over HTTP, or prints it once.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use bagsdex::adapters::cli::{render_table, CliApp, Command, ListCmd, OutputFormat, SearchCmd, ServeCmd};
use bagsdex::adapters::http::{create_router, start_server};
use bagsdex::application::TokenService;
use bagsdex::config::{resolve_config, Config};
use bagsdex::domain::{StatusFilter, Token};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (BAGSDEX_* overrides can live here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    let config_path = match &app.command {
        Command::Serve(cmd) => &cmd.config,
        Command::List(cmd) => &cmd.config,
        Command::Search(cmd) => &cmd.config,
    };
    let config = load(config_path.as_deref())?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match app.command {
        Command::Serve(cmd) => serve_command(cmd, config).await,
        Command::List(cmd) => list_command(cmd, config).await,
        Command::Search(cmd) => search_command(cmd, config).await,
    }
}

fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}

/// Load an explicit config (with `~` expanded) or the default path
fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
            resolve_config(Some(Path::new(&expanded)))
                .with_context(|| format!("Failed to load configuration from {}", expanded))
        }
        None => resolve_config(None).context("Failed to load default configuration"),
    }
}

async fn serve_command(cmd: ServeCmd, config: Config) -> Result<()> {
    let service = TokenService::from_config(&config)
        .context("Failed to create leaderboard client")?;

    let host = cmd.host.unwrap_or_else(|| config.server.host.clone());
    let port = cmd.port.unwrap_or(config.server.port);

    tracing::info!(
        "Serving bags.fm leaderboard from {} (page size {}, fallback {})",
        config.leaderboard.api_url,
        config.listing.page_size,
        if service.fallback_enabled() { "on" } else { "off" }
    );

    let app = create_router(service, config.server.cors_enabled);
    start_server(&host, port, app)
        .await
        .context("HTTP server failed")?;

    tracing::info!("bagsdex stopped");
    Ok(())
}

async fn list_command(cmd: ListCmd, config: Config) -> Result<()> {
    let filter: StatusFilter = cmd.status.parse()?;
    let service = TokenService::from_config(&config)
        .context("Failed to create leaderboard client")?;

    let tokens = service.list_tokens(filter).await;
    print_tokens(&tokens, cmd.format)
}

async fn search_command(cmd: SearchCmd, config: Config) -> Result<()> {
    let service = TokenService::from_config(&config)
        .context("Failed to create leaderboard client")?;

    let tokens = service.search_tokens(&cmd.query).await;
    print_tokens(&tokens, cmd.format)
}

fn print_tokens(tokens: &[Token], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(tokens)
                .context("Failed to serialize tokens")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", render_table(tokens)),
    }
    Ok(())
}
