// ABOUTME: RepUp HTTP server binary
// ABOUTME: Loads configuration, opens the database, wires the LLM provider and serves the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! # `RepUp` Server Binary
//!
//! Environment variables configure everything; the flags below override the
//! listen address and database for local runs.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use repup_server::config::environment::{ConfigOverrides, ServerConfig};
use repup_server::database::Database;
use repup_server::llm::{GroqProvider, LlmProvider};
use repup_server::logging;
use repup_server::resources::ServerResources;
use repup_server::server;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "repup-server")]
#[command(about = "RepUp - fitness tracking API with AI-generated workout plans")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override listen host
    #[arg(long)]
    host: Option<String>,

    /// Override database URL (sqlite:path or sqlite::memory:)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::load_from_env()?;
    config.apply_overrides(ConfigOverrides {
        http_port: args.http_port,
        host: args.host,
        database_url: args.database_url,
    })?;
    config.validate()?;

    info!("Starting RepUp server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized");

    let llm_provider: Option<Arc<dyn LlmProvider>> = match GroqProvider::from_config(&config.llm)? {
        Some(provider) => {
            info!(
                provider = provider.display_name(),
                model = provider.default_model(),
                "LLM provider configured"
            );
            Some(Arc::new(provider))
        }
        None => None,
    };

    let (host, port) = (config.host.clone(), config.http_port);
    display_available_endpoints(&host, port);

    let resources = Arc::new(ServerResources::new(database, llm_provider, config));
    if let Err(e) = server::run(resources, &host, port).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}

/// Log the API surface at startup
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(host: &str, port: u16) {
    info!("=== Available API Endpoints ===");
    info!("Health:");
    info!("   Liveness:          GET  http://{host}:{port}/health");
    info!("   Readiness:         GET  http://{host}:{port}/ready");
    info!("Authentication:");
    info!("   Sign In:           POST http://{host}:{port}/api/auth/login");
    info!("   Sign Out:          POST http://{host}:{port}/api/auth/logout");
    info!("   Current User:      GET  http://{host}:{port}/api/auth/me");
    info!("Profile:");
    info!("   Get Profile:       GET  http://{host}:{port}/api/profile");
    info!("   Save Profile:      PUT  http://{host}:{port}/api/profile");
    info!("Workouts:");
    info!("   Log Workout:       POST http://{host}:{port}/api/logWorkout");
    info!("   List Workouts:     GET  http://{host}:{port}/api/getWorkouts");
    info!("Workout Plans:");
    info!("   Generate Plan:     POST http://{host}:{port}/api/generateWorkoutPlan");
    info!("   Latest Plan:       GET  http://{host}:{port}/api/workoutPlan");
    info!("   Plan History:      GET  http://{host}:{port}/api/workoutPlans");
    info!("   Download Plan:     GET  http://{host}:{port}/api/workoutPlan/download");
    info!("Dashboard:");
    info!("   Summary:           GET  http://{host}:{port}/api/dashboard");
    info!("   Progress:          GET  http://{host}:{port}/api/progress");
    info!("=== End of Endpoint List ===");
}
