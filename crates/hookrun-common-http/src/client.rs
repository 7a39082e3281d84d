// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header and timeouts.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Upper bounds applied to every outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
	/// Total time allowed for a request, including reading the body.
	pub request: Duration,
	/// Time allowed to establish the TCP/TLS connection.
	pub connect: Duration,
}

impl Default for Timeouts {
	fn default() -> Self {
		Self {
			request: Duration::from_secs(10),
			connect: Duration::from_secs(5),
		}
	}
}

/// Creates a client builder with the standard User-Agent and the given
/// timeouts applied.
///
/// # Example
/// ```ignore
/// let client = hookrun_common_http::builder(Timeouts::default())
///     .https_only(true)
///     .build()?;
/// ```
pub fn builder(timeouts: Timeouts) -> ClientBuilder {
	Client::builder()
		.user_agent(user_agent())
		.timeout(timeouts.request)
		.connect_timeout(timeouts.connect)
}

/// Builds a client with the standard User-Agent and the given timeouts.
pub fn new_client(timeouts: Timeouts) -> Result<Client, reqwest::Error> {
	builder(timeouts).build()
}

/// Returns the standard User-Agent string, `hookrun/{version}`.
pub fn user_agent() -> String {
	format!("hookrun/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 2);
		assert_eq!(parts[0], "hookrun");
		assert_eq!(parts[1], env!("CARGO_PKG_VERSION"));
	}

	#[test]
	fn default_timeouts_are_bounded() {
		let timeouts = Timeouts::default();
		assert_eq!(timeouts.request, Duration::from_secs(10));
		assert!(timeouts.connect <= timeouts.request);
	}

	#[test]
	fn builds_client_with_custom_timeouts() {
		let client = new_client(Timeouts {
			request: Duration::from_millis(500),
			connect: Duration::from_millis(250),
		});
		assert!(client.is_ok());
	}
}
