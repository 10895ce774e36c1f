//! dockhand - Docker Compose dashboard for the terminal

use anyhow::Context;
use clap::Parser;
use dockhand_config::GlobalConfig;
use dockhand_engine::EngineError;
use dockhand_tui::AppError;
use std::fs::{File, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DOCKER_HINT: &str = "Make sure Docker is running and accessible.";

#[derive(Parser)]
#[command(name = "dockhand")]
#[command(author, version, about = "Docker Compose dashboard for the terminal", long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();
    init_logging();

    if let Err(e) = run().await {
        tracing::error!("Fatal: {:#}", e);
        println!("{}", fatal_report(&e));
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    tracing::info!("Starting dockhand {}", env!("CARGO_PKG_VERSION"));

    let config = GlobalConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        GlobalConfig::default()
    });

    let engine = dockhand_engine::connect(&config.engine)
        .await
        .context("Failed to initialize Docker service")?;

    dockhand_tui::run(engine, &config).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Log to a file under the data dir; the terminal belongs to the dashboard
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = open_log_file().map(|file| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn open_log_file() -> Option<File> {
    let path = GlobalConfig::log_path().ok()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Short name of the most specific known error in the chain
fn error_kind(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<EngineError>() {
            return e.kind();
        }
        if let Some(e) = cause.downcast_ref::<AppError>() {
            return match e {
                AppError::Io(_) => "TerminalError",
            };
        }
    }
    "Unknown"
}

/// Diagnostic printed before exiting with status 1
fn fatal_report(err: &anyhow::Error) -> String {
    let mut out = format!("Error: {}\nError kind: {}\n", err, error_kind(err));
    for cause in err.chain().skip(1) {
        out.push_str(&format!("Caused by: {}\n", cause));
    }
    out.push_str(&format!("Details:\n{:?}\n\n{}", err, DOCKER_HINT));
    out
}
