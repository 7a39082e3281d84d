// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared outbound HTTP client for hookrun.
//!
//! Every client built here carries the `hookrun/{version}` User-Agent that
//! GitHub requires, and bounded request and connect timeouts.

mod client;

pub use client::{builder, new_client, user_agent, Timeouts};
