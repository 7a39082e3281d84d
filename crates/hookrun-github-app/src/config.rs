// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Runtime configuration for the GitHub App client.

use std::time::Duration;

use hookrun_common_config::{Secret, SecretString};
use hookrun_common_http::Timeouts;
use reqwest::Url;

use crate::error::GithubAppError;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// Configuration for [`GithubAppClient`](crate::GithubAppClient).
///
/// Built once at startup and shared read-only between deliveries.
#[derive(Debug, Clone)]
pub struct GithubAppConfig {
	app_id: String,
	installation_id: u64,
	base_url: Url,
	timeouts: Timeouts,
	webhook_secret: Option<SecretString>,
}

impl GithubAppConfig {
	/// Create a configuration targeting api.github.com.
	pub fn new(app_id: impl Into<String>, installation_id: u64) -> Self {
		Self {
			app_id: app_id.into(),
			installation_id,
			base_url: Url::parse(DEFAULT_BASE_URL).expect("default URL is valid"),
			timeouts: Timeouts::default(),
			webhook_secret: None,
		}
	}

	/// Point the client at another API root (GitHub Enterprise, or a mock
	/// server in tests).
	///
	/// A trailing slash is added so relative endpoint paths join beneath the
	/// root instead of replacing its last segment.
	pub fn with_base_url(mut self, raw: &str) -> Result<Self, GithubAppError> {
		let mut url = Url::parse(raw)
			.map_err(|e| GithubAppError::Config(format!("Invalid GitHub base URL '{raw}': {e}")))?;
		if url.cannot_be_a_base() {
			return Err(GithubAppError::Config(format!(
				"GitHub base URL '{raw}' cannot be used as a base"
			)));
		}
		if !url.path().ends_with('/') {
			let path = format!("{}/", url.path());
			url.set_path(&path);
		}
		self.base_url = url;
		Ok(self)
	}

	pub fn with_timeouts(mut self, request: Duration, connect: Duration) -> Self {
		self.timeouts = Timeouts { request, connect };
		self
	}

	pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
		self.webhook_secret = Some(Secret::new(secret.into()));
		self
	}

	/// The opaque app identifier GitHub issued, used as the assertion issuer.
	pub fn app_id(&self) -> &str {
		&self.app_id
	}

	/// Installation used when a delivery does not name one.
	pub fn installation_id(&self) -> u64 {
		self.installation_id
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	pub fn timeouts(&self) -> Timeouts {
		self.timeouts
	}

	pub fn webhook_secret(&self) -> Option<&str> {
		self.webhook_secret.as_ref().map(|s| s.expose().as_str())
	}

	pub(crate) fn endpoint(&self, path: &str) -> Result<Url, GithubAppError> {
		self.base_url
			.join(path)
			.map_err(|e| GithubAppError::Config(format!("Invalid URL for {path}: {e}")))
	}
}
