// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the GitHub App client.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while minting credentials, reporting check runs, or
/// reading webhook deliveries.
///
/// None of these are retried. Each one ends the delivery that raised it.
#[derive(Debug, Error)]
pub enum GithubAppError {
	/// The private key was missing, unreadable, or not an RSA PEM key.
	#[error("Failed to load private key: {0}")]
	KeyLoad(String),

	/// The key loaded but could not produce a signature.
	#[error("Failed to sign app assertion: {0}")]
	Signing(String),

	/// Transport-level failure, including timeouts.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// The token endpoint rejected the app assertion.
	#[error("GitHub rejected the app assertion: {status} - {body}")]
	Auth { status: u16, body: String },

	/// The check run endpoint rejected the request.
	#[error("GitHub API error: {status} - {body}")]
	Remote { status: u16, body: String },

	/// The response body was not what the endpoint documents.
	#[error("Invalid response from GitHub: {0}")]
	Decode(String),

	/// A check run payload failed validation before being sent.
	#[error("Invalid check run payload: {0}")]
	InvalidPayload(String),

	/// The installation token passed to a request had already expired.
	#[error("Installation token expired at {0}")]
	TokenExpired(DateTime<Utc>),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Invalid webhook signature")]
	InvalidWebhookSignature,

	/// A webhook delivery body could not be parsed for its event type.
	#[error("Invalid webhook payload for {event}: {message}")]
	InvalidEvent { event: String, message: String },
}

impl GithubAppError {
	/// HTTP status returned by GitHub, for errors that carry one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Auth { status, .. } | Self::Remote { status, .. } => Some(*status),
			Self::Network(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	/// Short machine-readable name used in logs.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::KeyLoad(_) => "key_load",
			Self::Signing(_) => "signing",
			Self::Network(_) => "network",
			Self::Auth { .. } => "auth",
			Self::Remote { .. } => "remote",
			Self::Decode(_) => "decode",
			Self::InvalidPayload(_) => "invalid_payload",
			Self::TokenExpired(_) => "token_expired",
			Self::Config(_) => "config",
			Self::InvalidWebhookSignature => "invalid_webhook_signature",
			Self::InvalidEvent { .. } => "invalid_event",
		}
	}
}
