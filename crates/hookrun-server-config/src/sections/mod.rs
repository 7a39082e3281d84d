// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for hookrun-server.

pub mod check_run;
pub mod github_app;
pub mod http;
pub mod logging;

pub use check_run::{CheckRunConfig, CheckRunConfigLayer};
pub use github_app::{GitHubAppConfig, GitHubAppConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
