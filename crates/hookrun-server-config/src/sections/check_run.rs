// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content of the check run reported for each pull request commit.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_NAME: &str = "hookrun";
const DEFAULT_TITLE: &str = "hookrun";
const DEFAULT_SUMMARY: &str = "Checks are running for this commit.";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckRunConfigLayer {
	pub name: Option<String>,
	pub external_id: Option<String>,
	pub details_url: Option<String>,
	pub title: Option<String>,
	pub summary: Option<String>,
	pub text: Option<String>,
}

impl CheckRunConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.name.is_some() {
			self.name = other.name;
		}
		if other.external_id.is_some() {
			self.external_id = other.external_id;
		}
		if other.details_url.is_some() {
			self.details_url = other.details_url;
		}
		if other.title.is_some() {
			self.title = other.title;
		}
		if other.summary.is_some() {
			self.summary = other.summary;
		}
		if other.text.is_some() {
			self.text = other.text;
		}
	}

	pub fn finalize(self) -> Result<CheckRunConfig, ConfigError> {
		let config = CheckRunConfig {
			name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
			external_id: self.external_id,
			details_url: self.details_url,
			title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
			summary: self.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
			text: self.text,
		};

		for (key, value) in [
			("check_run.name", &config.name),
			("check_run.title", &config.title),
			("check_run.summary", &config.summary),
		] {
			if value.trim().is_empty() {
				return Err(ConfigError::InvalidValue {
					key: key.to_string(),
					message: "must not be empty".to_string(),
				});
			}
		}

		if let Some(url) = &config.details_url {
			if !url.starts_with("https://") && !url.starts_with("http://") {
				return Err(ConfigError::InvalidValue {
					key: "check_run.details_url".to_string(),
					message: format!("must be an http(s) URL, got '{url}'"),
				});
			}
		}

		Ok(config)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckRunConfig {
	/// Check name shown in the pull request's checks list.
	pub name: String,
	pub external_id: Option<String>,
	pub details_url: Option<String>,
	pub title: String,
	pub summary: String,
	pub text: Option<String>,
}

impl Default for CheckRunConfig {
	fn default() -> Self {
		Self {
			name: DEFAULT_NAME.to_string(),
			external_id: None,
			details_url: None,
			title: DEFAULT_TITLE.to_string(),
			summary: DEFAULT_SUMMARY.to_string(),
			text: None,
		}
	}
}
