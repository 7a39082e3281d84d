// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.
//!
//! Only failures of the inbound request itself surface here. Failures
//! talking to GitHub are logged by the dispatcher and the delivery is still
//! acknowledged.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Missing headers or a body that does not match its event type.
	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// The delivery signature did not verify.
	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	#[error("Internal error: {0}")]
	Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error_response) = match &self {
			ServerError::BadRequest(msg) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse {
					error: "bad_request".to_string(),
					message: msg.clone(),
				},
			),
			ServerError::Unauthorized(msg) => (
				StatusCode::UNAUTHORIZED,
				ErrorResponse {
					error: "unauthorized".to_string(),
					message: msg.clone(),
				},
			),
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse {
						error: "internal_error".to_string(),
						message: "An internal error occurred".to_string(),
					},
				)
			}
		};

		(status, Json(error_response)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_codes() {
		assert_eq!(
			ServerError::BadRequest("x".into()).into_response().status(),
			StatusCode::BAD_REQUEST
		);
		assert_eq!(
			ServerError::Unauthorized("x".into()).into_response().status(),
			StatusCode::UNAUTHORIZED
		);
		assert_eq!(
			ServerError::Internal("x".into()).into_response().status(),
			StatusCode::INTERNAL_SERVER_ERROR
		);
	}
}
