//! `texpress serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use texpress_config::{CliSettings, Config};
use texpress_server::{run_server, server_config_from_texpress_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover texpress.toml).
    #[arg(short, long, env = "TEXPRESS_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug mode: template sources and error reports (default: enabled).
    #[arg(long)]
    debug: bool,

    /// Disable debug mode.
    #[arg(long, conflicts_with = "debug")]
    no_debug: bool,

    /// Enable verbose output (request and resolution logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.banner(version);
        match &config.config_path {
            Some(path) => output.field("Config", &path.display().to_string()),
            None => output.field("Config", "none found, using defaults"),
        }
        output.field(
            "Debug mode",
            if config.server.debug { "enabled" } else { "disabled" },
        );
        output.field(
            "Static folder discovery",
            if config.discovery.enabled { "enabled" } else { "disabled" },
        );

        if !config.sites.is_empty() {
            output.field("Static sites", "");
        }
        for (slug, site) in &config.sites {
            output.site(
                slug,
                &format!("{}/{}", site.bundle, site.root),
                config.bundles_resolved.contains_key(&site.bundle),
            );
        }

        output.field(
            "Listening on",
            &format!("http://{}:{}", config.server.host, config.server.port),
        );

        let server_config = server_config_from_texpress_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }

    /// CLI overrides for the loaded configuration.
    pub(crate) fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            debug: self.resolve_debug(),
        }
    }

    /// Resolve `debug` from --debug/--no-debug flags.
    fn resolve_debug(&self) -> Option<bool> {
        if self.no_debug {
            Some(false)
        } else {
            self.debug.then_some(true)
        }
    }
}
