// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Credential types exchanged with the GitHub API.

use chrono::{DateTime, Utc};
use hookrun_common_config::{Secret, SecretString};
use serde::Deserialize;

use crate::error::GithubAppError;

/// Body of `POST /app/installations/{id}/access_tokens`.
///
/// Only the fields hookrun uses are kept.
#[derive(Debug, Deserialize)]
pub(crate) struct AccessTokenResponse {
	pub token: String,
	pub expires_at: String,
}

/// A short-lived bearer credential scoped to one installation.
///
/// The token value is redacted from `Debug` output and zeroized on drop.
#[derive(Debug, Clone)]
pub struct InstallationToken {
	token: SecretString,
	expires_at: DateTime<Utc>,
}

impl InstallationToken {
	pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
		Self {
			token: Secret::new(token.into()),
			expires_at,
		}
	}

	/// Raw token value for the `Authorization` header.
	pub fn expose(&self) -> &str {
		self.token.expose()
	}

	pub fn expires_at(&self) -> DateTime<Utc> {
		self.expires_at
	}

	pub fn is_expired(&self) -> bool {
		self.is_expired_at(Utc::now())
	}

	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		now >= self.expires_at
	}
}

impl TryFrom<AccessTokenResponse> for InstallationToken {
	type Error = GithubAppError;

	fn try_from(response: AccessTokenResponse) -> Result<Self, Self::Error> {
		if response.token.is_empty() {
			return Err(GithubAppError::Decode(
				"access token response has an empty token".to_string(),
			));
		}
		let expires_at = parse_expires_at(&response.expires_at)?;
		Ok(Self::new(response.token, expires_at))
	}
}

/// Parse GitHub's RFC 3339 `expires_at` timestamp.
pub(crate) fn parse_expires_at(expires_at: &str) -> Result<DateTime<Utc>, GithubAppError> {
	expires_at
		.parse::<DateTime<Utc>>()
		.map_err(|e| GithubAppError::Decode(format!("Invalid expires_at: {expires_at} - {e}")))
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{Duration, TimeZone};

	#[test]
	fn parses_github_timestamp() {
		let parsed = parse_expires_at("2016-07-11T22:14:10Z").unwrap();
		assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 7, 11, 22, 14, 10).unwrap());
	}

	#[test]
	fn rejects_garbage_timestamp() {
		let err = parse_expires_at("tomorrow").unwrap_err();
		assert!(matches!(err, GithubAppError::Decode(_)));
	}

	#[test]
	fn empty_token_is_decode_error() {
		let err = InstallationToken::try_from(AccessTokenResponse {
			token: String::new(),
			expires_at: "2030-01-01T00:00:00Z".to_string(),
		})
		.unwrap_err();
		assert!(matches!(err, GithubAppError::Decode(_)));
	}

	#[test]
	fn expiry_is_inclusive() {
		let expires_at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
		let token = InstallationToken::new("ghs_abc", expires_at);

		assert!(!token.is_expired_at(expires_at - Duration::seconds(1)));
		assert!(token.is_expired_at(expires_at));
		assert!(token.is_expired_at(expires_at + Duration::seconds(1)));
	}

	#[test]
	fn debug_redacts_token() {
		let token = InstallationToken::new("ghs_supersecret", Utc::now());
		let debug = format!("{token:?}");
		assert!(!debug.contains("ghs_supersecret"));
		assert!(debug.contains("[REDACTED]"));
	}
}
