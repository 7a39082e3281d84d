// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP listener configuration.

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4444;
const DEFAULT_WEBHOOK_PATH: &str = "/api/github/webhook";
const HEALTH_PATH: &str = "/health";

/// HTTP listener configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
	pub host: String,
	pub port: u16,
	/// Route GitHub delivers webhooks to.
	pub webhook_path: String,
}

impl Default for HttpConfig {
	fn default() -> Self {
		Self {
			host: DEFAULT_HOST.to_string(),
			port: DEFAULT_PORT,
			webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
		}
	}
}

/// HTTP configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfigLayer {
	#[serde(default)]
	pub host: Option<String>,
	#[serde(default)]
	pub port: Option<u16>,
	#[serde(default)]
	pub webhook_path: Option<String>,
}

impl HttpConfigLayer {
	pub fn merge(&mut self, other: HttpConfigLayer) {
		if other.host.is_some() {
			self.host = other.host;
		}
		if other.port.is_some() {
			self.port = other.port;
		}
		if other.webhook_path.is_some() {
			self.webhook_path = other.webhook_path;
		}
	}

	pub fn finalize(self) -> Result<HttpConfig, ConfigError> {
		let webhook_path = self
			.webhook_path
			.unwrap_or_else(|| DEFAULT_WEBHOOK_PATH.to_string());

		if !webhook_path.starts_with('/') {
			return Err(ConfigError::InvalidValue {
				key: "http.webhook_path".to_string(),
				message: format!("must start with '/', got '{webhook_path}'"),
			});
		}
		if webhook_path == HEALTH_PATH {
			return Err(ConfigError::InvalidValue {
				key: "http.webhook_path".to_string(),
				message: format!("'{HEALTH_PATH}' is reserved for the health check"),
			});
		}

		Ok(HttpConfig {
			host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
			port: self.port.unwrap_or(DEFAULT_PORT),
			webhook_path,
		})
	}
}
