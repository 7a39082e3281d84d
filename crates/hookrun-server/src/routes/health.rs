// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::{state::AppState, version};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
	pub status: String,
	pub version: String,
	pub app_id: String,
}

/// GET /health - Liveness plus the identity this server reports as.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	Json(HealthResponse {
		status: "ok".to_string(),
		version: version::VERSION.to_string(),
		app_id: state.identity.app_id().to_string(),
	})
}
