// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

pub mod health;
pub mod webhook;

use axum::{
	routing::{get, post},
	Router,
};

use crate::state::AppState;

/// Build the router. `webhook_path` is where GitHub delivers events.
pub fn create_router(state: AppState, webhook_path: &str) -> Router {
	Router::new()
		.route("/health", get(health::health_check))
		.route(webhook_path, post(webhook::github_webhook))
		.with_state(state)
}
