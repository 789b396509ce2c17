//! Planwright CLI Application
//!
//! Command-line interface for the planwright gated planning workflow.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use planwright_core::{params::ListSessions, WorkflowBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        project_root,
        no_color,
        command,
    } = Args::parse();

    // Hooks run before any database is opened so they cannot fail on it
    if let Some(Hook { command }) = command {
        cli::run_hook(command);
        return Ok(());
    }

    let mut builder = WorkflowBuilder::new();
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    if let Some(root) = project_root {
        builder = builder.with_project_root(root);
    }
    let workflow = builder
        .build()
        .await
        .context("Failed to initialize workflow")?;

    let cli = Cli::new(workflow, TerminalRenderer::new(!no_color));

    info!("Planwright started");

    match command {
        Some(Session { command }) => cli.handle_session_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(Clarify { command }) => cli.handle_clarify_command(command).await,
        Some(Solution { command }) => cli.handle_solution_command(command).await,
        Some(Outline(args)) => cli.handle_outline(args).await,
        Some(Section { command }) => cli.handle_section_command(command).await,
        Some(Hook { .. }) => Ok(()),
        None => {
            cli.list_sessions(&ListSessions {
                include_closed: false,
            })
            .await
        }
    }
}
