//! SalahSync CLI - inspect and drive the offline cache from a terminal.
//!
//! Runs the same cache, network monitor and refresh policy the app uses,
//! against the file-backed store in the data directory.

mod commands;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use salahsync_core::{CacheManager, Config, FileStore, HttpProbe, NetworkMonitor, RefreshPolicy};

use commands::Command;

/// Environment variable overriding the store directory
const STORE_DIR_ENV: &str = "SALAHSYNC_STORE_DIR";

/// Environment variable overriding the connectivity probe URL
const PROBE_URL_ENV: &str = "SALAHSYNC_PROBE_URL";

/// Initialize the tracing subscriber for logging.
/// Logs go to stderr (filtered by RUST_LOG, default "warn") and to a daily
/// rolling file in the store directory.
fn init_tracing(log_dir: &Path) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_appender = tracing_appender::rolling::daily(log_dir, "salahsync.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(filter)
        .init();

    guard
}

fn load_config() -> Config {
    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config, using defaults: {:#}", e);
            Config::default()
        }
    };
    if let Ok(dir) = std::env::var(STORE_DIR_ENV) {
        config.store_dir = Some(PathBuf::from(dir));
    }
    if let Ok(url) = std::env::var(PROBE_URL_ENV) {
        config.probe_url = url;
    }
    config
}

/// Everything a command needs, wired together once.
pub struct AppContext {
    pub config: Config,
    pub cache: CacheManager,
    pub policy: RefreshPolicy,
    pub monitor: NetworkMonitor,
}

impl AppContext {
    async fn new(config: Config) -> Result<Self> {
        let store_dir = config.store_dir()?;
        let store = FileStore::new(store_dir.clone())
            .with_context(|| format!("Failed to open store at {}", store_dir.display()))?;
        let cache = CacheManager::new(Arc::new(store));

        let probe = HttpProbe::new(config.probe_url.clone(), config.probe_timeout())
            .context("Failed to build connectivity probe")?;

        // Start from the last persisted flag so a cold start shows something
        let last_known_online = cache.get_network_status().await.unwrap_or(false);
        let monitor = NetworkMonitor::builder(cache.clone(), Arc::new(probe))
            .debounce(config.online_debounce())
            .initially_online(last_known_online)
            .build();

        Ok(Self {
            policy: RefreshPolicy::new(cache.clone()),
            config,
            cache,
            monitor,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n", e);
            eprintln!("{}", commands::USAGE);
            std::process::exit(2);
        }
    };
    if matches!(command, Command::Help) {
        println!("{}", commands::USAGE);
        return Ok(());
    }

    let config = load_config();
    let store_dir = config.store_dir()?;
    std::fs::create_dir_all(&store_dir)
        .with_context(|| format!("Failed to create {}", store_dir.display()))?;
    let _log_guard = init_tracing(&store_dir);
    info!(?command, store = %store_dir.display(), "SalahSync CLI starting");

    let ctx = AppContext::new(config).await?;
    if let Err(e) = commands::run(&ctx, command).await {
        warn!(error = %e, "Command failed");
        return Err(e);
    }
    Ok(())
}
