// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the hookrun webhook server.
//!
//! Layers are merged with this precedence (highest first):
//! 1. Environment variables (`HOOKRUN_*`, secrets also via `*_FILE`)
//! 2. A TOML config file
//! 3. Built-in defaults
//!
//! ```ignore
//! use hookrun_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub logging: LoggingConfig,
	pub github_app: GitHubAppConfig,
	pub check_run: CheckRunConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from defaults, `/etc/hookrun/server.toml` and the
/// environment.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	];
	load_sources(sources)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	let sources: Vec<Box<dyn ConfigSource>> = vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	];
	load_sources(sources)
}

fn load_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Finalize a merged layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();
	let github_app = layer.github_app.unwrap_or_default().build()?;
	let check_run = layer.check_run.unwrap_or_default().finalize()?;

	info!(
		host = %http.host,
		port = http.port,
		webhook_path = %http.webhook_path,
		app_id = github_app.app_id(),
		installation_id = github_app.installation_id(),
		github_base_url = github_app.base_url(),
		check_run_name = %check_run.name,
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		logging,
		github_app,
		check_run,
	})
}
