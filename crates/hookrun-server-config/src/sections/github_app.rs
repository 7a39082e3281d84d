// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! GitHub App configuration section.

use std::path::PathBuf;
use std::time::Duration;

use hookrun_common_config::SecretString;
use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::error::ConfigError;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Configuration layer for the GitHub App (all fields optional for layering).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubAppConfigLayer {
	/// App identifier issued by GitHub. Kept as a string; it is only ever
	/// used as the assertion issuer.
	pub app_id: Option<String>,
	/// Installation used when a delivery does not carry one.
	pub installation_id: Option<u64>,
	/// Path to the PEM-encoded RSA private key.
	pub private_key_path: Option<String>,
	/// Secret for webhook signature verification.
	#[serde(skip_serializing)]
	pub webhook_secret: Option<SecretString>,
	/// Base URL for the GitHub API.
	pub base_url: Option<String>,
	pub request_timeout_secs: Option<u64>,
	pub connect_timeout_secs: Option<u64>,
}

impl GitHubAppConfigLayer {
	/// Merge with another layer, preferring values from `other`.
	pub fn merge(&mut self, other: GitHubAppConfigLayer) {
		if other.app_id.is_some() {
			self.app_id = other.app_id;
		}
		if other.installation_id.is_some() {
			self.installation_id = other.installation_id;
		}
		if other.private_key_path.is_some() {
			self.private_key_path = other.private_key_path;
		}
		if other.webhook_secret.is_some() {
			self.webhook_secret = other.webhook_secret;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.request_timeout_secs.is_some() {
			self.request_timeout_secs = other.request_timeout_secs;
		}
		if other.connect_timeout_secs.is_some() {
			self.connect_timeout_secs = other.connect_timeout_secs;
		}
	}

	/// Build the final config. Every credential is required: without them no
	/// delivery could be processed.
	pub fn build(self) -> Result<GitHubAppConfig, ConfigError> {
		let app_id = self
			.app_id
			.filter(|id| !id.trim().is_empty())
			.ok_or_else(|| ConfigError::Validation("GitHub App app_id is required".to_string()))?;

		let installation_id = self.installation_id.ok_or_else(|| {
			ConfigError::Validation("GitHub App installation_id is required".to_string())
		})?;

		let private_key_path = self
			.private_key_path
			.filter(|p| !p.is_empty())
			.map(PathBuf::from)
			.ok_or_else(|| {
				ConfigError::Validation("GitHub App private_key_path is required".to_string())
			})?;

		let webhook_secret = self.webhook_secret.ok_or_else(|| {
			ConfigError::Validation("GitHub App webhook_secret is required".to_string())
		})?;
		if webhook_secret.expose().is_empty() {
			return Err(ConfigError::Validation(
				"GitHub App webhook_secret cannot be empty".to_string(),
			));
		}

		let base_url = self
			.base_url
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
		Self::validate_base_url(&base_url)?;

		let request_timeout = positive_secs(
			"github_app.request_timeout_secs",
			self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
		)?;
		let connect_timeout = positive_secs(
			"github_app.connect_timeout_secs",
			self.connect_timeout_secs.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
		)?;

		Ok(GitHubAppConfig {
			app_id,
			installation_id,
			private_key_path,
			webhook_secret,
			base_url,
			request_timeout,
			connect_timeout,
		})
	}

	fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
		let url = Url::parse(raw).map_err(|e| {
			ConfigError::Validation(format!("GitHub App base_url is not a valid URL '{raw}': {e}"))
		})?;

		if url.scheme() != "https" {
			return Err(ConfigError::Validation(format!(
				"GitHub App base_url must use HTTPS, got: {raw}"
			)));
		}

		let loopback = match url.host() {
			Some(Host::Domain(domain)) => {
				let domain = domain.trim_end_matches('.').to_ascii_lowercase();
				domain == "localhost" || domain.ends_with(".localhost")
			}
			Some(Host::Ipv4(ip)) => ip.is_loopback() || ip.is_unspecified(),
			Some(Host::Ipv6(ip)) => ip.is_loopback() || ip.is_unspecified(),
			None => true,
		};
		if loopback {
			return Err(ConfigError::Validation(
				"GitHub App base_url must not be localhost".to_string(),
			));
		}

		Ok(())
	}
}

fn positive_secs(key: &str, secs: u64) -> Result<Duration, ConfigError> {
	if secs == 0 {
		return Err(ConfigError::InvalidValue {
			key: key.to_string(),
			message: "must be greater than zero".to_string(),
		});
	}
	Ok(Duration::from_secs(secs))
}

/// Validated GitHub App configuration.
#[derive(Debug, Clone)]
pub struct GitHubAppConfig {
	app_id: String,
	installation_id: u64,
	private_key_path: PathBuf,
	webhook_secret: SecretString,
	base_url: String,
	request_timeout: Duration,
	connect_timeout: Duration,
}

impl GitHubAppConfig {
	pub fn app_id(&self) -> &str {
		&self.app_id
	}

	pub fn installation_id(&self) -> u64 {
		self.installation_id
	}

	pub fn private_key_path(&self) -> &std::path::Path {
		&self.private_key_path
	}

	pub fn webhook_secret(&self) -> &str {
		self.webhook_secret.expose()
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn request_timeout(&self) -> Duration {
		self.request_timeout
	}

	pub fn connect_timeout(&self) -> Duration {
		self.connect_timeout
	}
}

#[cfg(test)]
pub(crate) fn complete_layer() -> GitHubAppConfigLayer {
	use hookrun_common_config::Secret;

	GitHubAppConfigLayer {
		app_id: Some("17332".to_string()),
		installation_id: Some(42),
		private_key_path: Some("/run/secrets/github-app.pem".to_string()),
		webhook_secret: Some(Secret::new("webhook-secret".to_string())),
		..Default::default()
	}
}


#[cfg(test)]
mod proptests {
	use super::*;
	use hookrun_common_config::Secret;
	use proptest::prelude::*;

	proptest! {
		#[test]
		fn webhook_secret_never_in_debug(
			secret in "[a-zA-Z0-9]{10,40}"
		) {
			prop_assume!(!secret.contains("REDACTED"));

			let layer = GitHubAppConfigLayer {
				webhook_secret: Some(Secret::new(secret.clone())),
				..Default::default()
			};

			let debug = format!("{layer:?}");
			prop_assert!(!debug.contains(&secret));
		}

		#[test]
		fn valid_config_builds_successfully(
			app_id in "[1-9][0-9]{0,9}",
			installation_id in 1u64..10_000_000,
		) {
			let layer = GitHubAppConfigLayer {
				app_id: Some(app_id.clone()),
				installation_id: Some(installation_id),
				..complete_layer()
			};

			let config = layer.build().unwrap();
			prop_assert_eq!(config.app_id(), app_id.as_str());
			prop_assert_eq!(config.installation_id(), installation_id);
		}

		#[test]
		fn base_url_validation_rejects_http(
			domain in "[a-z]{3,10}\\.[a-z]{2,5}"
		) {
			let layer = GitHubAppConfigLayer {
				base_url: Some(format!("http://{domain}")),
				..complete_layer()
			};
			prop_assert!(layer.build().is_err());
		}
	}
}
