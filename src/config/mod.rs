
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::i18n::DEFAULT_LOCALE;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Parser)]
#[command(name = "deal-warehouse", version, about = "Imports currency-exchange deals from CSV files")]
pub struct Cli {
    /// SQLite database file. Deals are kept in memory when omitted.
    #[arg(long, global = true, env = "DEAL_WAREHOUSE_DATABASE")]
    pub database: Option<PathBuf>,

    /// Locale used for user-facing messages.
    #[arg(long, global = true, env = "DEAL_WAREHOUSE_LOCALE", default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// One of error, warn, info, debug, trace.
    #[arg(long, global = true, env = "DEAL_WAREHOUSE_LOG", default_value = "info", value_parser = parse_log_level)]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP import endpoint.
    Serve(ServeArgs),
    /// Import a single CSV file and print the result as JSON.
    Import(ImportArgs)
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "DEAL_WAREHOUSE_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    #[arg(long, env = "DEAL_WAREHOUSE_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub file: PathBuf,

    #[arg(long, default_value = "text/csv")]
    pub content_type: String
}

pub fn parse_log_level(level: &str) -> Result<LevelFilter, Infallible> {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            //NOTE: Logging is not initialised yet, so the notice has to go straight to stderr
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    };

    Ok(filter)
}
