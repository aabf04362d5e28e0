use std::fs;
use std::io::{stderr, stdout, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::task::spawn_blocking;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use deal_warehouse::api;
use deal_warehouse::config::{Cli, Command, ImportArgs, ServeArgs};
use deal_warehouse::engine::{ImportEngine, Upload};
use deal_warehouse::i18n::LocaleResolver;
use deal_warehouse::models::ImportResult;
use deal_warehouse::storage::{MemoryStorage, SqliteStorage, Storage};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level);

    let storage = open_storage(cli.database.as_deref())?;
    let messages = Arc::new(LocaleResolver::new(&cli.locale));
    info!("Wording messages in locale [{}]", messages.locale());
    let engine = Arc::new(ImportEngine::new(storage, messages));

    match cli.command {
        Command::Serve(args) => serve(engine, args).await,
        Command::Import(args) => import_file(engine, args).await
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The import command prints its result on stdout, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn open_storage(path: Option<&Path>) -> Result<Arc<dyn Storage>> {
    match path {
        Some(path) => {
            let storage = SqliteStorage::open(path)
                .with_context(|| format!("Could not open database at {}", path.display()))?;
            Ok(Arc::new(storage))
        }
        None => {
            info!("No database configured, deals are kept in memory");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

async fn serve(engine: Arc<ImportEngine>, args: ServeArgs) -> Result<()> {
    let app = api::router(engine, args.max_upload_bytes);
    let listener = TcpListener::bind(args.bind).await
        .with_context(|| format!("Could not bind to {}", args.bind))?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("Could not listen for the shutdown signal: {error}");
    }
}

async fn import_file(engine: Arc<ImportEngine>, args: ImportArgs) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("Could not read {}", args.file.display()))?;
    let file_name = args.file.file_name().map(|name| name.to_string_lossy().into_owned());
    let upload = Upload::new(Some(args.content_type), file_name, bytes);

    let timer = Instant::now();
    let worker = engine.clone();
    let outcome = spawn_blocking(move || worker.import(&upload)).await?;

    let result = outcome.map_err(|error| {
        let message = engine.messages().get(error.message_key());
        anyhow::Error::new(error).context(message)
    })?;

    info!("Processed {} rows in: {:?}", result.total(), timer.elapsed());

    write_result_to_stdout(&result)
}

fn write_result_to_stdout(result: &ImportResult) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, result)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}
