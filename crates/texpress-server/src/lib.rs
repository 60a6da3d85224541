//! HTTP server for the TExpress template browser.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - A root page listing the static sites
//! - Static sites: rendered templates, directory listings and template
//!   sources under `/{slug}/`
//! - Built-in assets under `/_assets/`
//!
//! Templates are read from disk on every request, so edits show up on the
//! next reload without restarting the server.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::collections::BTreeMap;
//! use std::path::PathBuf;
//! use texpress_server::{ServerConfig, StaticSite, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         bundles: BTreeMap::from([("AppBundle".to_owned(), PathBuf::from("src/AppBundle"))]),
//!         sites: BTreeMap::from([("app".to_owned(), StaticSite::new("AppBundle"))]),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (texpress-server)
//!                        │
//!                        ├─► /{slug}/{path} ──► Resolver (texpress-browse)
//!                        │                          │
//!                        │                          └─► Storage (texpress-storage)
//!                        │
//!                        ├─► template rendering (minijinja, fresh per request)
//!                        │
//!                        └─► /_assets/ (texpress-assets)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod templates;

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use texpress_browse::{BundleRegistry, STATIC_VIEWS_ROOT};
use texpress_storage::{FsStorage, Storage};

pub use error::ServerError;
use state::AppState;

/// A static site: a document root inside a bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticSite {
    /// Bundle name (e.g., `AppBundle`).
    pub bundle: String,
    /// Document root, relative to the bundle root.
    pub root: String,
}

impl StaticSite {
    /// Site rooted at the bundle's `Resources/views/static` folder.
    pub fn new(bundle: impl Into<String>) -> Self {
        Self {
            bundle: bundle.into(),
            root: STATIC_VIEWS_ROOT.to_owned(),
        }
    }
}

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Show template sources and detailed template errors.
    pub debug: bool,
    /// Installed bundles (name → root path).
    pub bundles: BTreeMap<String, PathBuf>,
    /// Static sites by slug.
    pub sites: BTreeMap<String, StaticSite>,
    /// Serve unconfigured slugs from matching `…Bundle` static folders.
    pub discovery: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7980,
            debug: true,
            bundles: BTreeMap::new(),
            sites: BTreeMap::new(),
            discovery: true,
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new());
    let state = Arc::new(AppState::new(&config, storage));

    let installed: Vec<&str> = state.bundles.names().collect();
    tracing::info!(bundles = ?installed, "Installed bundles");

    for (slug, site) in &config.sites {
        if state.bundles.locate(&site.bundle).is_err() {
            tracing::warn!(slug = %slug, bundle = %site.bundle, "Static site refers to an unknown bundle");
        } else {
            tracing::info!(slug = %slug, bundle = %site.bundle, root = %site.root, "Serving static site");
        }
    }

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, debug = config.debug, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from TExpress config.
#[must_use]
pub fn server_config_from_texpress_config(config: &texpress_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        debug: config.server.debug,
        bundles: config.bundles_resolved.clone(),
        sites: config
            .sites
            .iter()
            .map(|(slug, site)| {
                (
                    slug.clone(),
                    StaticSite {
                        bundle: site.bundle.clone(),
                        root: site.root.clone(),
                    },
                )
            })
            .collect(),
        discovery: config.discovery.enabled,
    }
}

impl ServerConfig {
    /// Installed bundles as a registry.
    pub(crate) fn registry(&self) -> BundleRegistry {
        BundleRegistry::new(self.bundles.clone())
    }
}
