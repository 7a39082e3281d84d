// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Check run payloads.
//!
//! [`CheckRunPayload`] is the body of `POST /repos/{owner}/{repo}/check-runs`.
//! It is only obtainable through [`CheckRunBuilder::build`], which enforces
//! the rules GitHub would otherwise reject with a 422.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GithubAppError;

const MAX_SHA_LEN: usize = 64;
const MAX_ACTIONS: usize = 3;
const MAX_ACTION_LABEL: usize = 20;
const MAX_ACTION_DESCRIPTION: usize = 40;
const MAX_ACTION_IDENTIFIER: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
	Queued,
	InProgress,
	Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunConclusion {
	ActionRequired,
	Cancelled,
	Failure,
	Neutral,
	Success,
	Skipped,
	TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationLevel {
	Notice,
	Warning,
	Failure,
}

/// A comment pinned to a line range of a file in the commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunAnnotation {
	pub path: String,
	pub start_line: u32,
	pub end_line: u32,
	/// Only allowed when `start_line == end_line`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub start_column: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub end_column: Option<u32>,
	pub annotation_level: AnnotationLevel,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub raw_details: Option<String>,
}

impl CheckRunAnnotation {
	pub fn new(
		path: impl Into<String>,
		start_line: u32,
		end_line: u32,
		annotation_level: AnnotationLevel,
		message: impl Into<String>,
	) -> Self {
		Self {
			path: path.into(),
			start_line,
			end_line,
			start_column: None,
			end_column: None,
			annotation_level,
			message: message.into(),
			title: None,
			raw_details: None,
		}
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_columns(mut self, start: u32, end: u32) -> Self {
		self.start_column = Some(start);
		self.end_column = Some(end);
		self
	}

	pub fn with_raw_details(mut self, raw_details: impl Into<String>) -> Self {
		self.raw_details = Some(raw_details.into());
		self
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunImage {
	pub alt: String,
	pub image_url: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub caption: Option<String>,
}

impl CheckRunImage {
	pub fn new(alt: impl Into<String>, image_url: impl Into<String>) -> Self {
		Self {
			alt: alt.into(),
			image_url: image_url.into(),
			caption: None,
		}
	}

	pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
		self.caption = Some(caption.into());
		self
	}
}

/// A button GitHub renders on the check run. Clicking it sends a
/// `check_run.requested_action` delivery carrying `identifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunAction {
	pub label: String,
	pub description: String,
	pub identifier: String,
}

impl CheckRunAction {
	pub fn new(
		label: impl Into<String>,
		description: impl Into<String>,
		identifier: impl Into<String>,
	) -> Self {
		Self {
			label: label.into(),
			description: description.into(),
			identifier: identifier.into(),
		}
	}
}

/// The report shown on the check run's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRunOutput {
	pub title: String,
	pub summary: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub annotations: Vec<CheckRunAnnotation>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub images: Vec<CheckRunImage>,
}

impl CheckRunOutput {
	pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			summary: summary.into(),
			text: None,
			annotations: Vec::new(),
			images: Vec::new(),
		}
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}

	pub fn with_annotation(mut self, annotation: CheckRunAnnotation) -> Self {
		self.annotations.push(annotation);
		self
	}

	pub fn with_image(mut self, image: CheckRunImage) -> Self {
		self.images.push(image);
		self
	}
}

/// A validated check run request body.
///
/// Deserializing runs the same checks as [`CheckRunBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPayload")]
pub struct CheckRunPayload {
	name: String,
	head_sha: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	details_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	external_id: Option<String>,
	status: CheckRunStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	started_at: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	conclusion: Option<CheckRunConclusion>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	completed_at: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	output: Option<CheckRunOutput>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	actions: Vec<CheckRunAction>,
}

impl CheckRunPayload {
	pub fn builder(name: impl Into<String>, head_sha: impl Into<String>) -> CheckRunBuilder {
		CheckRunBuilder::new(name, head_sha)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn head_sha(&self) -> &str {
		&self.head_sha
	}

	pub fn status(&self) -> CheckRunStatus {
		self.status
	}

	pub fn conclusion(&self) -> Option<CheckRunConclusion> {
		self.conclusion
	}

	pub fn output(&self) -> Option<&CheckRunOutput> {
		self.output.as_ref()
	}

	pub fn actions(&self) -> &[CheckRunAction] {
		&self.actions
	}
}

#[derive(Deserialize)]
struct UncheckedPayload {
	name: String,
	head_sha: String,
	#[serde(default)]
	details_url: Option<String>,
	#[serde(default)]
	external_id: Option<String>,
	status: CheckRunStatus,
	#[serde(default)]
	started_at: Option<DateTime<Utc>>,
	#[serde(default)]
	conclusion: Option<CheckRunConclusion>,
	#[serde(default)]
	completed_at: Option<DateTime<Utc>>,
	#[serde(default)]
	output: Option<CheckRunOutput>,
	#[serde(default)]
	actions: Vec<CheckRunAction>,
}

impl TryFrom<UncheckedPayload> for CheckRunPayload {
	type Error = GithubAppError;

	fn try_from(raw: UncheckedPayload) -> Result<Self, Self::Error> {
		CheckRunBuilder {
			payload: CheckRunPayload {
				name: raw.name,
				head_sha: raw.head_sha,
				details_url: raw.details_url,
				external_id: raw.external_id,
				status: raw.status,
				started_at: raw.started_at,
				conclusion: raw.conclusion,
				completed_at: raw.completed_at,
				output: raw.output,
				actions: raw.actions,
			},
		}
		.build()
	}
}

/// Builder for [`CheckRunPayload`]. Status defaults to `queued`.
#[derive(Debug, Clone)]
pub struct CheckRunBuilder {
	payload: CheckRunPayload,
}

impl CheckRunBuilder {
	pub fn new(name: impl Into<String>, head_sha: impl Into<String>) -> Self {
		Self {
			payload: CheckRunPayload {
				name: name.into(),
				head_sha: head_sha.into(),
				details_url: None,
				external_id: None,
				status: CheckRunStatus::Queued,
				started_at: None,
				conclusion: None,
				completed_at: None,
				output: None,
				actions: Vec::new(),
			},
		}
	}

	pub fn status(mut self, status: CheckRunStatus) -> Self {
		self.payload.status = status;
		self
	}

	pub fn details_url(mut self, url: impl Into<String>) -> Self {
		self.payload.details_url = Some(url.into());
		self
	}

	pub fn external_id(mut self, id: impl Into<String>) -> Self {
		self.payload.external_id = Some(id.into());
		self
	}

	pub fn started_at(mut self, at: DateTime<Utc>) -> Self {
		self.payload.started_at = Some(at);
		self
	}

	pub fn conclusion(mut self, conclusion: CheckRunConclusion) -> Self {
		self.payload.conclusion = Some(conclusion);
		self
	}

	pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
		self.payload.completed_at = Some(at);
		self
	}

	pub fn output(mut self, output: CheckRunOutput) -> Self {
		self.payload.output = Some(output);
		self
	}

	pub fn action(mut self, action: CheckRunAction) -> Self {
		self.payload.actions.push(action);
		self
	}

	pub fn actions(mut self, actions: impl IntoIterator<Item = CheckRunAction>) -> Self {
		self.payload.actions.extend(actions);
		self
	}

	pub fn build(self) -> Result<CheckRunPayload, GithubAppError> {
		let payload = self.payload;

		if payload.name.trim().is_empty() {
			return Err(invalid("name must not be empty"));
		}
		validate_sha(&payload.head_sha)?;

		let completed = payload.status == CheckRunStatus::Completed;
		match (completed, payload.conclusion) {
			(true, None) => return Err(invalid("status completed requires a conclusion")),
			(false, Some(_)) => {
				return Err(invalid("conclusion is only allowed with status completed"))
			}
			_ => {}
		}
		if payload.completed_at.is_some() && !completed {
			return Err(invalid("completed_at is only allowed with status completed"));
		}

		if let Some(output) = &payload.output {
			validate_output(output)?;
		}
		validate_actions(&payload.actions)?;

		Ok(payload)
	}
}

/// Build a check run payload for `commit_sha` in one call.
///
/// Pure: the same arguments always give the same payload. Timestamps are
/// left for the caller to stamp through [`CheckRunBuilder`]. `conclusion`
/// must be given exactly when `status` is completed.
pub fn build_payload(
	name: &str,
	commit_sha: &str,
	status: CheckRunStatus,
	conclusion: Option<CheckRunConclusion>,
	output: CheckRunOutput,
	actions: Vec<CheckRunAction>,
) -> Result<CheckRunPayload, GithubAppError> {
	let mut builder = CheckRunPayload::builder(name, commit_sha)
		.status(status)
		.output(output)
		.actions(actions);
	if let Some(conclusion) = conclusion {
		builder = builder.conclusion(conclusion);
	}
	builder.build()
}

fn invalid(message: impl Into<String>) -> GithubAppError {
	GithubAppError::InvalidPayload(message.into())
}

fn validate_sha(sha: &str) -> Result<(), GithubAppError> {
	if sha.is_empty() {
		return Err(invalid("head_sha must not be empty"));
	}
	if sha.len() > MAX_SHA_LEN {
		return Err(invalid(format!(
			"head_sha is {} characters, at most {MAX_SHA_LEN} allowed",
			sha.len()
		)));
	}
	if !sha.bytes().all(|b| b.is_ascii_hexdigit()) {
		return Err(invalid(format!("head_sha '{sha}' is not hexadecimal")));
	}
	Ok(())
}

fn validate_output(output: &CheckRunOutput) -> Result<(), GithubAppError> {
	if output.title.trim().is_empty() {
		return Err(invalid("output title must not be empty"));
	}
	if output.summary.trim().is_empty() {
		return Err(invalid("output summary must not be empty"));
	}
	for annotation in &output.annotations {
		if annotation.start_line == 0 || annotation.end_line < annotation.start_line {
			return Err(invalid(format!(
				"annotation on {} has invalid line range {}..{}",
				annotation.path, annotation.start_line, annotation.end_line
			)));
		}
		let has_columns = annotation.start_column.is_some() || annotation.end_column.is_some();
		if has_columns && annotation.start_line != annotation.end_line {
			return Err(invalid(format!(
				"annotation on {} sets columns across multiple lines",
				annotation.path
			)));
		}
	}
	Ok(())
}

fn validate_actions(actions: &[CheckRunAction]) -> Result<(), GithubAppError> {
	if actions.len() > MAX_ACTIONS {
		return Err(invalid(format!(
			"{} actions given, at most {MAX_ACTIONS} allowed",
			actions.len()
		)));
	}
	for action in actions {
		let too_long = action.label.chars().count() > MAX_ACTION_LABEL
			|| action.description.chars().count() > MAX_ACTION_DESCRIPTION
			|| action.identifier.chars().count() > MAX_ACTION_IDENTIFIER;
		if too_long {
			return Err(invalid(format!(
				"action '{}' exceeds label/description/identifier limits",
				action.label
			)));
		}
	}
	Ok(())
}
