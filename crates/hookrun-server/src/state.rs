// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared, read-only state handed to every request.

use std::sync::Arc;

use hookrun_github_app::{AppIdentity, GithubAppClient, GithubAppConfig, GithubAppError};
use hookrun_server_config::{CheckRunConfig, ServerConfig};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
	pub github: GithubAppClient,
	pub identity: Arc<AppIdentity>,
	pub check_run: Arc<CheckRunConfig>,
}

impl AppState {
	pub fn new(github: GithubAppClient, identity: AppIdentity, check_run: CheckRunConfig) -> Self {
		Self {
			github,
			identity: Arc::new(identity),
			check_run: Arc::new(check_run),
		}
	}

	/// Load the signing key and build the GitHub client.
	///
	/// Fails on an unreadable key so a misconfigured server never starts
	/// accepting deliveries it cannot answer.
	pub fn from_config(config: &ServerConfig) -> Result<Self, GithubAppError> {
		let app = &config.github_app;

		let identity = AppIdentity::from_pem_file(app.app_id(), app.private_key_path())?;
		info!(
			app_id = app.app_id(),
			path = %app.private_key_path().display(),
			"Loaded GitHub App private key"
		);

		let client_config = GithubAppConfig::new(app.app_id(), app.installation_id())
			.with_base_url(app.base_url())?
			.with_timeouts(app.request_timeout(), app.connect_timeout())
			.with_webhook_secret(app.webhook_secret());
		let github = GithubAppClient::new(client_config)?;

		Ok(Self::new(github, identity, config.check_run.clone()))
	}
}
