// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Webhook delivery classification.
//!
//! Only the fields hookrun acts on are deserialized. GitHub sends far more.

use serde::Deserialize;

use crate::error::GithubAppError;

/// A delivery classified by its `X-GitHub-Event` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
	PullRequest(PullRequestEvent),
	Push(PushEvent),
	/// Any event type hookrun does not act on. The body is not parsed.
	Unknown { kind: String },
}

impl WebhookEvent {
	/// Classify a delivery from its event header and raw body.
	pub fn parse(kind: &str, body: &[u8]) -> Result<Self, GithubAppError> {
		match kind {
			"pull_request" => parse_body(kind, body).map(Self::PullRequest),
			"push" => parse_body(kind, body).map(Self::Push),
			other => Ok(Self::Unknown {
				kind: other.to_string(),
			}),
		}
	}

	pub fn kind(&self) -> &str {
		match self {
			Self::PullRequest(_) => "pull_request",
			Self::Push(_) => "push",
			Self::Unknown { kind } => kind,
		}
	}
}

fn parse_body<T: serde::de::DeserializeOwned>(kind: &str, body: &[u8]) -> Result<T, GithubAppError> {
	serde_json::from_slice(body).map_err(|e| GithubAppError::InvalidEvent {
		event: kind.to_string(),
		message: e.to_string(),
	})
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestAction {
	Opened,
	Synchronize,
	Reopened,
	Closed,
	Edited,
	#[serde(other)]
	Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestEvent {
	pub action: PullRequestAction,
	pub number: u64,
	pub pull_request: PullRequest,
	pub repository: Repository,
	#[serde(default)]
	pub installation: Option<Installation>,
}

impl PullRequestEvent {
	/// Whether the pull request's head moved to a commit that needs a check.
	pub fn wants_check_run(&self) -> bool {
		matches!(
			self.action,
			PullRequestAction::Opened | PullRequestAction::Synchronize | PullRequestAction::Reopened
		)
	}

	pub fn head_sha(&self) -> &str {
		&self.pull_request.head.sha
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
	pub head: GitRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitRef {
	pub sha: String,
	#[serde(rename = "ref")]
	pub ref_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushEvent {
	#[serde(rename = "ref")]
	pub ref_name: String,
	#[serde(default)]
	pub after: String,
	pub repository: Repository,
	#[serde(default)]
	pub installation: Option<Installation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
	pub name: String,
	pub full_name: String,
	pub owner: Account,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
	pub login: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Installation {
	pub id: u64,
}
