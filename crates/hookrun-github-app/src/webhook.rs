// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! `X-Hub-Signature-256` verification.

use tracing::{debug, warn};

use crate::error::GithubAppError;

const SIGNATURE_PREFIX: &str = "sha256=";

/// Check `signature_header` (`sha256=<hex>`) against an HMAC-SHA256 of the
/// raw `body` keyed by the webhook secret.
///
/// A header without the `sha256=` prefix, with malformed hex, or with the
/// wrong digest all yield [`GithubAppError::InvalidWebhookSignature`].
pub fn verify_webhook_signature(
	secret: &str,
	signature_header: &str,
	body: &[u8],
) -> Result<(), GithubAppError> {
	let Some(expected_hex) = signature_header.strip_prefix(SIGNATURE_PREFIX) else {
		warn!("Webhook signature header is missing the sha256= prefix");
		return Err(GithubAppError::InvalidWebhookSignature);
	};

	if hookrun_common_webhook::verify_hmac_sha256(secret.as_bytes(), body, expected_hex) {
		debug!("Webhook signature verified");
		Ok(())
	} else {
		warn!("Webhook signature mismatch");
		Err(GithubAppError::InvalidWebhookSignature)
	}
}

/// Signature header value GitHub would send for `body`. Used when replaying
/// deliveries and in tests.
pub fn compute_webhook_signature(secret: &str, body: &[u8]) -> String {
	let digest = hookrun_common_webhook::compute_hmac_sha256(secret.as_bytes(), body);
	format!("{SIGNATURE_PREFIX}{digest}")
}
