// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! GitHub webhook receiver.

use axum::{
	body::Bytes,
	extract::State,
	http::HeaderMap,
	response::IntoResponse,
	Json,
};
use hookrun_github_app::{verify_webhook_signature, WebhookEvent};
use serde::Serialize;
use tracing::Instrument;

use crate::{
	dispatch::{dispatch, DeliveryOutcome},
	error::ServerError,
	state::AppState,
};

/// Acknowledgment body returned for every accepted delivery.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
	pub event: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub delivery: Option<String>,
	#[serde(flatten)]
	pub outcome: DeliveryOutcome,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers.get(name).and_then(|v| v.to_str().ok())
}

/// POST <webhook_path> - Receive a GitHub App webhook delivery.
///
/// The signature is checked before the body is parsed. Once verified, the
/// delivery is acknowledged with 200 whatever happens downstream.
#[axum::debug_handler]
pub async fn github_webhook(
	State(state): State<AppState>,
	headers: HeaderMap,
	body: Bytes,
) -> Result<impl IntoResponse, ServerError> {
	let secret = state.github.config().webhook_secret().ok_or_else(|| {
		tracing::error!("github_webhook: webhook secret not configured");
		ServerError::Internal("GitHub webhook secret is not configured on the server".into())
	})?;

	let sig_header = header(&headers, "X-Hub-Signature-256").ok_or_else(|| {
		tracing::warn!("github_webhook: missing X-Hub-Signature-256 header");
		ServerError::BadRequest("Missing X-Hub-Signature-256 header".into())
	})?;

	if let Err(e) = verify_webhook_signature(secret, sig_header, &body) {
		tracing::warn!(error = %e, "github_webhook: signature verification failed");
		return Err(ServerError::Unauthorized("Invalid webhook signature".into()));
	}

	let event_type = header(&headers, "X-GitHub-Event").ok_or_else(|| {
		tracing::warn!("github_webhook: missing X-GitHub-Event header");
		ServerError::BadRequest("Missing X-GitHub-Event header".into())
	})?;
	let delivery = header(&headers, "X-GitHub-Delivery").map(str::to_string);

	let span = tracing::info_span!(
		"github_delivery",
		event_type = %event_type,
		delivery = delivery.as_deref().unwrap_or("-"),
	);

	let event = WebhookEvent::parse(event_type, &body).map_err(|e| {
		tracing::warn!(parent: &span, error = %e, "github_webhook: malformed payload");
		ServerError::BadRequest(format!("Invalid webhook payload: {e}"))
	})?;

	let outcome = dispatch(&state, event).instrument(span).await;

	Ok(Json(WebhookAck {
		event: event_type.to_string(),
		delivery,
		outcome,
	}))
}
