//! Waypoint CLI Application
//!
//! Command-line interface and MCP server for the waypoint plan tracker.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, WaypointMcpServer};
use renderer::TerminalRenderer;
use waypoint_core::{ModelConfig, PlannerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        data_dir,
        no_color,
        model,
        command,
    } = Args::parse();

    let mut builder = PlannerBuilder::new().with_model_config(ModelConfig::from(model));
    if let Some(data_dir) = data_dir {
        builder = builder.with_data_dir(data_dir);
    }
    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Waypoint started");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(planner, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Comment { command }) => {
            Cli::new(planner, renderer)
                .handle_comment_command(command)
                .await
        }
        Some(Next(args)) => Cli::new(planner, renderer).next_tasks(&args.into()).await,
        Some(Serve) => {
            info!("Starting Waypoint MCP server");
            run_stdio_server(WaypointMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(planner, renderer).overview().await,
    }
}
