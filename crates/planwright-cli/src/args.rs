use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ClarifyCommands, HookCommands, OutlineArgs, SectionCommands, SessionCommands,
    SolutionCommands, StepCommands,
};

/// Gated planning workflow for design tasks
///
/// Planwright walks a design task through four steps (clarification,
/// solution proposal, plan drafting and document generation) and refuses to
/// leave a step until its acceptance criterion holds. The finished design
/// document is written to docs/plans/ under the project root.
#[derive(Parser)]
#[command(version, about, name = "pw")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/planwright/planwright.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Project directory holding docs/tasks/ and receiving docs/plans/.
    /// Defaults to the current directory
    #[arg(long, global = true)]
    pub project_root: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Planwright CLI
///
/// - `session`: start, list, show and abort planning sessions
/// - `step`: inspect the step table, evaluate gates and advance
/// - `clarify`, `solution`, `outline`, `section`: the actions of steps 1 to 4
/// - `hook`: host integration entry points
#[derive(Subcommand)]
pub enum Commands {
    /// Manage planning sessions
    #[command(alias = "s")]
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Inspect steps, evaluate gates and advance
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Step 1: record and confirm clarifications
    #[command(alias = "c")]
    Clarify {
        #[command(subcommand)]
        command: ClarifyCommands,
    },
    /// Step 2: propose alternatives and confirm one
    #[command(alias = "solutions")]
    Solution {
        #[command(subcommand)]
        command: SolutionCommands,
    },
    /// Step 3: draft the document outline
    Outline(OutlineArgs),
    /// Step 4: propose, generate, confirm and reject document sections
    Section {
        #[command(subcommand)]
        command: SectionCommands,
    },
    /// Host integration hooks
    Hook {
        #[command(subcommand)]
        command: HookCommands,
    },
}
