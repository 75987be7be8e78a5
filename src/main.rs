use crate::config::{AppConfig, LogFormat, StorageBackend};
use crate::db::connection::Database;
use crate::db::seed::seed_sample_properties;
use crate::db::{MemoryStore, PropertyStore, SqliteStore};
use crate::router::handle;
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod responses;
mod router;


fn main() {
    // 1️⃣ Load configuration
    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    init_logging(&cfg);

    // 2️⃣ Build the store the handlers will share
    let store = match build_store(&cfg) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "store initialization failed");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    let addr = match cfg.server.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "cannot bind");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, backend = ?cfg.storage.backend, "starting property listings server");

    let server = Server::bind(&addr).max_workers(cfg.server.max_workers);

    // 4️⃣ Serve requests, passing the store into the closure
    let result = server.serve(move |req, _info| handle(req, store.as_ref()));

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down cleanly");
}

fn build_store(cfg: &AppConfig) -> Result<Arc<dyn PropertyStore>, errors::ServerError> {
    let store: Arc<dyn PropertyStore> = match cfg.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Sqlite => {
            Arc::new(SqliteStore::open(Database::new(cfg.storage.sqlite_path.clone()))?)
        }
    };

    if cfg.storage.seed_sample_data {
        seed_sample_properties(store.as_ref())?;
    }

    Ok(store)
}

fn init_logging(cfg: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));

    match cfg.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
