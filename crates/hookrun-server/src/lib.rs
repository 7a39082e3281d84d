// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! hookrun webhook server.
//!
//! Receives GitHub App deliveries and reports an in-progress check run for
//! every pull request commit.

pub mod dispatch;
pub mod error;
pub mod routes;
pub mod state;
pub mod version;

pub use dispatch::{check_run_payload, dispatch, DeliveryOutcome};
pub use error::{ErrorResponse, ServerError};
pub use routes::create_router;
pub use state::AppState;
