// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! hookrun webhook server binary.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hookrun_server::{create_router, version, AppState};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// hookrun server - reports check runs for GitHub pull requests.
#[derive(Parser, Debug)]
#[command(name = "hookrun-server", about = "GitHub App check run reporter", version)]
struct Args {
	/// Config file path. Defaults to /etc/hookrun/server.toml.
	#[arg(long, env = "HOOKRUN_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => hookrun_server_config::load_config_with_file(path),
		None => hookrun_server_config::load_config(),
	}
	.context("failed to load configuration")?;

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		webhook_path = %config.http.webhook_path,
		version = version::VERSION,
		"starting hookrun-server"
	);

	let state = AppState::from_config(&config).context("failed to initialise GitHub App")?;
	let app = create_router(state, &config.http.webhook_path).layer(TraceLayer::new_for_http());

	let addr = config.socket_addr();
	let listener = tokio::net::TcpListener::bind(&addr)
		.await
		.with_context(|| format!("failed to bind {addr}"))?;
	tracing::info!(addr = %addr, "listening");

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.context("server error")?;

	tracing::info!("hookrun-server stopped");
	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = wait_for_signal().await {
		tracing::error!(error = %e, "failed to listen for shutdown signal");
	}
	tracing::info!("shutdown signal received");
}

async fn wait_for_signal() -> std::io::Result<()> {
	#[cfg(unix)]
	{
		let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
		tokio::select! {
			result = signal::ctrl_c() => result,
			_ = sigterm.recv() => Ok(()),
		}
	}
	#[cfg(not(unix))]
	{
		signal::ctrl_c().await
	}
}
