//! Library catalog HTTP server.
//!
//! Reads the configuration named by `LIBRARY_CONFIG` (default
//! `./config/library.yaml`), seeds a fresh in-memory catalog and serves the
//! API. State lives only as long as the process.

use std::path::PathBuf;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use library_catalog::api::{create_router, AppState};
use library_catalog::config::ConfigLoader;
use library_catalog::error::LibraryError;
use library_catalog::library::Library;

const DEFAULT_CONFIG_PATH: &str = "./config/library.yaml";

fn load_config() -> Result<ConfigLoader, LibraryError> {
    let path = std::env::var_os("LIBRARY_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    match ConfigLoader::load(&path) {
        Ok(loader) => {
            info!(path = %path.display(), "Loaded configuration");
            Ok(loader)
        }
        Err(LibraryError::ConfigNotFound { path }) => {
            warn!(%path, "Configuration file not found, using defaults");
            Ok(ConfigLoader::default())
        }
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;

    let mut library = Library::new(config.policy().clone());
    library.seed(config.seed())?;

    let app = create_router(AppState::new(library)).layer(CorsLayer::permissive());

    let addr = &config.server().bind_address;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Library catalog listening");

    axum::serve(listener, app).await?;
    Ok(())
}
