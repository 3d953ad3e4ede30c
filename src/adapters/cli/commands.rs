//! CLI Command Definitions
//!
//! Argument structures for every bagsdex command, plus the text renderer
//! used by the one-shot commands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::{format_compact, Token};

/// bagsdex - bags.fm token feed
#[derive(Parser, Debug)]
#[command(
    name = "bagsdex",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "bags.fm leaderboard proxy and token feed",
    long_about = "bagsdex fetches the bags.fm token-launch leaderboard, normalizes every \
                  entry into a display-ready token and serves the result over HTTP."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the token API
    Serve(ServeCmd),

    /// Print the current token listing
    List(ListCmd),

    /// Search the leaderboard by name, symbol or address
    Search(SearchCmd),
}

/// Serve the HTTP API
#[derive(Parser, Debug)]
pub struct ServeCmd {
    /// Path to configuration file (defaults to config/bagsdex.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override bind host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Override bind port
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
}

/// One-shot listing
#[derive(Parser, Debug)]
pub struct ListCmd {
    /// Path to configuration file (defaults to config/bagsdex.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Status filter (all, new, bonded, mooning)
    #[arg(short, long, value_name = "STATUS", default_value = "all")]
    pub status: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// One-shot search
#[derive(Parser, Debug)]
pub struct SearchCmd {
    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Path to configuration file (defaults to config/bagsdex.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render tokens as an aligned text table
pub fn render_table(tokens: &[Token]) -> String {
    if tokens.is_empty() {
        return "No tokens found\n".to_string();
    }

    let mut out = format!(
        "{:<10} {:<24} {:>14} {:>10} {:>10} {:>9} {:<7} {}\n",
        "SYMBOL", "NAME", "PRICE", "MCAP", "VOL 24H", "24H", "STATUS", "CREATED"
    );

    for token in tokens {
        let sign = if token.change_24h > 0.0 { "+" } else { "" };
        out.push_str(&format!(
            "{:<10} {:<24} {:>14} {:>10} {:>10} {:>9} {:<7} {}\n",
            truncate(&token.symbol, 10),
            truncate(&token.name, 24),
            format!("${:.6}", token.price),
            format!("${}", format_compact(token.market_cap)),
            format!("${}", format_compact(token.volume_24h)),
            format!("{}{:.2}%", sign, token.change_24h),
            token.status,
            token.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }

    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
