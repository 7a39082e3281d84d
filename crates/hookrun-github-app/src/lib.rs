// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! GitHub App client for hookrun.
//!
//! Mints short-lived app assertions, exchanges them for installation access
//! tokens, and reports check runs against commits. Also classifies inbound
//! webhook deliveries and verifies their signatures.

pub mod checks;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod jwt;
pub mod types;
pub mod webhook;

#[cfg(test)]
pub(crate) mod test_support;

pub use checks::{
	build_payload, AnnotationLevel, CheckRunAction, CheckRunAnnotation, CheckRunBuilder,
	CheckRunConclusion, CheckRunImage, CheckRunOutput, CheckRunPayload, CheckRunStatus,
};
pub use client::GithubAppClient;
pub use config::GithubAppConfig;
pub use error::GithubAppError;
pub use events::{PullRequestAction, PullRequestEvent, PushEvent, WebhookEvent};
pub use jwt::{mint_assertion, AppIdentity, AssertionClaims, ASSERTION_LIFETIME};
pub use types::InstallationToken;
pub use webhook::{compute_webhook_signature, verify_webhook_signature};
