use anyhow::{Context as _, Result};
use clap::Parser;
use std::sync::Arc;
use taskd::{
    config::TaskdConfig, rest, store::TaskStore, tasks::TaskManager, AppContext,
};

#[derive(Parser)]
#[command(
    name = "taskd",
    about = "taskd — minimal task-manager HTTP service",
    version
)]
struct Args {
    /// HTTP server port
    #[arg(long, env = "TASKD_PORT")]
    port: Option<u16>,

    /// Data directory for the task collection and config.toml
    #[arg(long, env = "TASKD_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKD_LOG")]
    log: Option<String>,

    /// Bind address for the HTTP server (default: 127.0.0.1; use 0.0.0.0 for LAN access)
    #[arg(long, env = "TASKD_BIND")]
    bind_address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Arc::new(TaskdConfig::new(
        args.port,
        args.data_dir,
        args.log,
        args.bind_address,
    ));

    init_tracing(&config);

    let db_path = config.db_path();
    let store = TaskStore::open(&db_path)
        .await
        .with_context(|| format!("failed to open task store at {}", db_path.display()))?;

    let ctx = Arc::new(AppContext {
        config,
        tasks: Arc::new(TaskManager::new(Arc::new(store))),
        started_at: std::time::Instant::now(),
    });

    rest::serve(ctx).await
}

fn init_tracing(config: &TaskdConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
