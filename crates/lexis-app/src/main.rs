use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lexis_config::Config;
use tokio::signal;
use tokio::task::JoinError;
use tracing_subscriber::EnvFilter;

mod controller;
mod state;
mod status;


use self::controller::AppController;
use self::state::AppState;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Option<Self> {
        let value = std::env::var("LOG_FORMAT").ok()?;
        LogFormat::from_str(&value, true).ok()
    }
}

/// Keeps remote extension dictionaries in sync with the local lexicon
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON config file; the environment is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run one cycle for every resource and exit
    #[arg(long)]
    once: bool,

    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.log_format.or_else(LogFormat::from_env).unwrap_or_default());

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::new(),
    };
    if config.dictionary.is_empty() {
        tracing::warn!("no remote dictionaries configured");
    }

    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state.clone());

    if args.once {
        controller.run_once().await?;
        log_summary(&state).await;
        return Ok(());
    }

    let mut tasks = controller.spawn_tasks();
    tracing::info!("{} monitors started", tasks.len());

    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(e) = result {
                    tracing::error!("failed to listen for ctrl+c: {}", e);
                }
                tracing::info!("Shutdown requested");
                break;
            }
            joined = tasks.join_next() => match joined {
                Some(result) => log_task_exit(result),
                None => {
                    tracing::warn!("all monitors stopped");
                    break;
                }
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        log_task_exit(result);
    }

    log_summary(&state).await;
    Ok(())
}

async fn log_summary(state: &AppState) {
    state.status.log_summary().await;
    tracing::info!(
        "lexicon holds {} words and {} stop words",
        state.lexicon.word_count(),
        state.lexicon.stop_word_count()
    );
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_current_span(true)
            .with_env_filter(filter)
            .init(),
    }
}

fn log_task_exit(result: Result<anyhow::Result<()>, JoinError>) {
    match result {
        Ok(Ok(())) => tracing::debug!("monitor task exited"),
        Ok(Err(e)) => tracing::error!("monitor task failed: {:#}", e),
        Err(e) => tracing::error!("monitor task panicked: {}", e),
    }
}
