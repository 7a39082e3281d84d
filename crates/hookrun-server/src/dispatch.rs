// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Turns a verified webhook delivery into GitHub API calls.
//!
//! A pull request whose head moved gets a fresh check run: mint an
//! assertion, exchange it for an installation token, build the payload,
//! submit it. Each step runs once. The first failure ends the delivery.

use chrono::{DateTime, Utc};
use hookrun_github_app::{
	CheckRunOutput, CheckRunPayload, CheckRunStatus, GithubAppError, PullRequestEvent,
	WebhookEvent,
};
use hookrun_server_config::CheckRunConfig;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::state::AppState;

/// What happened to a delivery. Returned to GitHub in the acknowledgment
/// body so it shows up in the app's delivery log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryOutcome {
	Reported { head_sha: String },
	Ignored { reason: String },
	Failed { error: String },
}

pub async fn dispatch(state: &AppState, event: WebhookEvent) -> DeliveryOutcome {
	match event {
		WebhookEvent::PullRequest(pr) if pr.wants_check_run() => {
			match report_pull_request(state, &pr).await {
				Ok(response) => {
					info!(
						pr = pr.number,
						head_sha = pr.head_sha(),
						repo = %pr.repository.full_name,
						"Reported check run"
					);
					debug!(response = %response, "Check run response");
					DeliveryOutcome::Reported {
						head_sha: pr.head_sha().to_string(),
					}
				}
				Err(e) => {
					error!(
						pr = pr.number,
						head_sha = pr.head_sha(),
						repo = %pr.repository.full_name,
						kind = e.kind(),
						status = ?e.status(),
						error = %e,
						"Check run reporting failed"
					);
					DeliveryOutcome::Failed {
						error: e.kind().to_string(),
					}
				}
			}
		}
		WebhookEvent::PullRequest(pr) => {
			debug!(pr = pr.number, action = ?pr.action, "Ignoring pull request action");
			DeliveryOutcome::Ignored {
				reason: "pull request head did not change".to_string(),
			}
		}
		WebhookEvent::Push(push) => {
			info!(
				git_ref = %push.ref_name,
				after = %push.after,
				repo = %push.repository.full_name,
				"Push received"
			);
			DeliveryOutcome::Ignored {
				reason: "push events are logged only".to_string(),
			}
		}
		WebhookEvent::Unknown { kind } => {
			debug!(event_type = %kind, "Ignoring event");
			DeliveryOutcome::Ignored {
				reason: format!("event type {kind} is not handled"),
			}
		}
	}
}

async fn report_pull_request(
	state: &AppState,
	pr: &PullRequestEvent,
) -> Result<String, GithubAppError> {
	let installation_id = pr
		.installation
		.map(|installation| installation.id)
		.unwrap_or_else(|| state.github.config().installation_id());

	let token = state
		.github
		.installation_token(&state.identity, installation_id)
		.await?;

	let payload = check_run_payload(&state.check_run, pr.head_sha(), Utc::now())?;

	state
		.github
		.submit_check_run(
			&pr.repository.owner.login,
			&pr.repository.name,
			&payload,
			&token,
		)
		.await
}

/// The in-progress check run reported when a pull request's head moves.
pub fn check_run_payload(
	config: &CheckRunConfig,
	head_sha: &str,
	started_at: DateTime<Utc>,
) -> Result<CheckRunPayload, GithubAppError> {
	let mut output = CheckRunOutput::new(&config.title, &config.summary);
	if let Some(text) = &config.text {
		output = output.with_text(text);
	}

	let mut builder = CheckRunPayload::builder(&config.name, head_sha)
		.status(CheckRunStatus::InProgress)
		.started_at(started_at)
		.output(output);
	if let Some(external_id) = &config.external_id {
		builder = builder.external_id(external_id);
	}
	if let Some(details_url) = &config.details_url {
		builder = builder.details_url(details_url);
	}

	builder.build()
}
