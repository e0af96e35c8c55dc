use std::path::PathBuf;
use std::process::ExitCode;

use campus_books::config::{self, Config};
use campus_books::storage::{FileStorage, StorageService};
use campus_books::{http, ListingRepository};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "campus-books-server", about = "Campus books storage health-check server")]
struct Cli {
    /// Directory holding the JSON store [env: CAMPUS_BOOKS_DATA_DIR, default: ./data]
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Port to listen on [env: CAMPUS_BOOKS_PORT, then PORT]
    #[arg(long)]
    port: Option<String>,

    /// Log filter directive [env: RUST_LOG, default: info]
    #[arg(long)]
    log: Option<String>,
}

impl Cli {
    /// Flags override the environment; defaults and validation live in `Config`.
    fn into_config(
        self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, config::ConfigError> {
        Config::from_lookup(|name| {
            let flag = match name {
                config::DATA_DIR_ENV => self.data_dir.as_ref().map(|d| d.display().to_string()),
                config::PORT_ENV => self.port.clone(),
                config::LOG_ENV => self.log.clone(),
                _ => None,
            };
            flag.or_else(|| env(name))
        })
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Cli::parse().into_config(|name| std::env::var(name).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("campus-books-server: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_filter);

    let storage = StorageService::new(FileStorage::new(&config.data_dir));
    let seeded = ListingRepository::new(storage.clone()).list().await.len();
    info!(data_dir = ?config.data_dir, listings = seeded, "storage ready");

    if let Err(e) = http::serve(http::router(storage), config.port).await {
        error!(error = %e, port = config.port, "server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
