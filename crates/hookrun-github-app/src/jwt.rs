// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! App assertion minting.
//!
//! An app assertion is an RS256 JWT that proves the caller holds the app's
//! private key. It is only good for exchanging against an installation
//! access token, and lives for sixty seconds.

use std::fmt;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::GithubAppError;

pub const ASSERTION_LIFETIME: Duration = Duration::from_secs(60);

/// Registered claims carried by an app assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
	/// Issued at, seconds since the Unix epoch.
	pub iat: u64,
	/// `iat` plus [`ASSERTION_LIFETIME`].
	pub exp: u64,
	/// The app identifier.
	pub iss: String,
}

/// An app identifier paired with its parsed signing key.
///
/// Loading the key once and minting many assertions from it avoids reparsing
/// the PEM on every delivery.
#[derive(Clone)]
pub struct AppIdentity {
	app_id: String,
	key: EncodingKey,
}

impl fmt::Debug for AppIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AppIdentity")
			.field("app_id", &self.app_id)
			.field("key", &"[REDACTED]")
			.finish()
	}
}

impl AppIdentity {
	/// Parse a PEM-encoded RSA private key (PKCS#1 or PKCS#8).
	pub fn from_pem(app_id: impl Into<String>, pem: &[u8]) -> Result<Self, GithubAppError> {
		let app_id = app_id.into();
		if app_id.trim().is_empty() {
			return Err(GithubAppError::Config("app id must not be empty".to_string()));
		}

		let key = EncodingKey::from_rsa_pem(pem)
			.map_err(|e| GithubAppError::KeyLoad(format!("Invalid RSA private key: {e}")))?;

		Ok(Self { app_id, key })
	}

	/// Read and parse the key at `path`.
	pub fn from_pem_file(app_id: impl Into<String>, path: &Path) -> Result<Self, GithubAppError> {
		let pem = std::fs::read(path)
			.map_err(|e| GithubAppError::KeyLoad(format!("{}: {e}", path.display())))?;
		Self::from_pem(app_id, &pem)
			.map_err(|e| match e {
				GithubAppError::KeyLoad(message) => {
					GithubAppError::KeyLoad(format!("{}: {message}", path.display()))
				}
				other => other,
			})
	}

	pub fn app_id(&self) -> &str {
		&self.app_id
	}

	/// Mint a fresh assertion issued now.
	#[instrument(skip(self), fields(app_id = %self.app_id))]
	pub fn mint_assertion(&self) -> Result<String, GithubAppError> {
		let now = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_err(|e| GithubAppError::Signing(format!("System time error: {e}")))?;
		self.mint_assertion_at(now.as_secs())
	}

	/// Mint an assertion with an explicit issue time.
	pub(crate) fn mint_assertion_at(&self, iat: u64) -> Result<String, GithubAppError> {
		let claims = AssertionClaims {
			iat,
			exp: iat + ASSERTION_LIFETIME.as_secs(),
			iss: self.app_id.clone(),
		};

		let token = encode(&Header::new(Algorithm::RS256), &claims, &self.key)
			.map_err(|e| GithubAppError::Signing(format!("Failed to encode JWT: {e}")))?;

		debug!(exp = claims.exp, "Minted app assertion");

		Ok(token)
	}
}

/// Load the key at `key_path` and mint a single assertion for `app_id`.
pub fn mint_assertion(app_id: &str, key_path: &Path) -> Result<String, GithubAppError> {
	AppIdentity::from_pem_file(app_id, key_path)?.mint_assertion()
}
