//! Command definitions and handlers for the `pw` binary.
//!
//! Every command has a clap argument struct that converts into a core
//! parameter struct, so core types stay free of CLI attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Workflow → Controller
//! ```
//!
//! [`Cli`] owns the workflow and the renderer and turns each command into one
//! workflow call whose result is rendered as markdown.

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use log::warn;
use planwright_core::{
    display::{AbortResult, CreateResult, Sessions, StepDefinitions},
    hook,
    models::{Alternative, DesignModule},
    params::*,
    registry, CommandCollaborator, Workflow,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// Session commands
// ============================================================================

/// Start a planning session
#[derive(Args)]
pub struct StartSessionArgs {
    /// Theme of the design task; also names the design document
    pub topic: String,
    /// Task name whose docs/tasks/<task>-task.md is merged as background
    #[arg(short, long)]
    pub task: Option<String>,
}

impl From<StartSessionArgs> for StartSession {
    fn from(val: StartSessionArgs) -> Self {
        StartSession {
            topic: val.topic,
            task: val.task,
        }
    }
}

/// List planning sessions
#[derive(Args)]
pub struct ListSessionsArgs {
    /// Include completed and aborted sessions
    #[arg(short, long)]
    pub all: bool,
}

impl From<ListSessionsArgs> for ListSessions {
    fn from(val: ListSessionsArgs) -> Self {
        ListSessions {
            include_closed: val.all,
        }
    }
}

/// Arguments naming a single session
#[derive(Args)]
pub struct SessionIdArgs {
    /// ID of the session
    pub id: u64,
}

impl From<SessionIdArgs> for Id {
    fn from(val: SessionIdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Start a new planning session at step 1
    #[command(alias = "new")]
    Start(StartSessionArgs),
    /// List planning sessions
    #[command(aliases = ["l", "ls"])]
    List(ListSessionsArgs),
    /// Show everything recorded for a session
    Show(SessionIdArgs),
    /// Terminate a session
    Abort(SessionIdArgs),
}

// ============================================================================
// Step commands
// ============================================================================

/// Advance a session past its open step
#[derive(Args)]
pub struct AdvanceArgs {
    /// ID of the session
    pub id: u64,
    /// Fail with a gate violation instead of reporting what is missing
    #[arg(long)]
    pub require: bool,
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// List the four workflow steps and their acceptance criteria
    #[command(aliases = ["l", "ls"])]
    List,
    /// Evaluate the open step's gate without changing anything
    #[command(alias = "evaluate")]
    Status(SessionIdArgs),
    /// Leave the open step if its gate is satisfied
    Advance(AdvanceArgs),
}

// ============================================================================
// Step 1: clarification
// ============================================================================

/// Record clarification answers; omitted answers keep their current value
#[derive(Args)]
pub struct RecordClarificationArgs {
    /// ID of the session
    pub id: u64,
    /// What the design is for
    #[arg(short, long)]
    pub purpose: Option<String>,
    /// Constraints the design must respect
    #[arg(short, long)]
    pub constraints: Option<String>,
    /// How success will be judged
    #[arg(short, long)]
    pub success_criteria: Option<String>,
}

impl From<RecordClarificationArgs> for RecordClarification {
    fn from(val: RecordClarificationArgs) -> Self {
        RecordClarification {
            id: val.id,
            purpose: val.purpose,
            constraints: val.constraints,
            success_criteria: val.success_criteria,
        }
    }
}

#[derive(Subcommand)]
pub enum ClarifyCommands {
    /// Record purpose, constraints and success criteria
    Record(RecordClarificationArgs),
    /// Confirm that no ambiguity remains
    Confirm(SessionIdArgs),
}

// ============================================================================
// Step 2: solution proposal
// ============================================================================

/// Present alternatives, replacing any earlier set
#[derive(Args)]
pub struct ProposeSolutionsArgs {
    /// ID of the session
    pub id: u64,
    /// JSON file holding an array of alternatives; `-` reads stdin
    #[arg(short, long)]
    pub file: PathBuf,
}

/// Confirm one of the proposed alternatives
#[derive(Args)]
pub struct ConfirmSolutionArgs {
    /// ID of the session
    pub id: u64,
    /// 1-based number of the chosen alternative
    pub choice: usize,
    /// Adjustments on top of the chosen alternative
    #[arg(short, long)]
    pub revision: Option<String>,
}

impl From<ConfirmSolutionArgs> for ConfirmSolution {
    fn from(val: ConfirmSolutionArgs) -> Self {
        ConfirmSolution {
            id: val.id,
            choice: val.choice,
            revision: val.revision,
        }
    }
}

#[derive(Subcommand)]
pub enum SolutionCommands {
    /// Present two or three alternatives
    Propose(ProposeSolutionsArgs),
    /// Confirm the chosen alternative
    Confirm(ConfirmSolutionArgs),
}

// ============================================================================
// Step 3: plan drafting
// ============================================================================

/// Record the document outline
#[derive(Args)]
pub struct OutlineArgs {
    /// ID of the session
    pub id: u64,
    /// Modules covered by the outline, comma-separated
    #[arg(
        short,
        long,
        value_delimiter = ',',
        required_unless_present = "all",
        help = "Modules as comma-separated list, e.g. architecture,data-flow"
    )]
    pub modules: Vec<DesignModule>,
    /// Cover all five mandatory modules
    #[arg(long, conflicts_with = "modules")]
    pub all: bool,
    /// Free-form notes on the structure
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<OutlineArgs> for DraftOutline {
    fn from(val: OutlineArgs) -> Self {
        DraftOutline {
            id: val.id,
            modules: if val.all {
                DesignModule::ALL.to_vec()
            } else {
                val.modules
            },
            notes: val.notes,
        }
    }
}

// ============================================================================
// Step 4: document generation
// ============================================================================

/// Stage caller-written text for the next module
#[derive(Args)]
pub struct ProposeSectionArgs {
    /// ID of the session
    pub id: u64,
    /// Module the text belongs to
    pub module: DesignModule,
    /// Section text
    #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
    pub text: Option<String>,
    /// File holding the section text; `-` reads stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Ask an external program to draft the next module
#[derive(Args)]
pub struct GenerateSectionArgs {
    /// ID of the session
    pub id: u64,
    /// Module to draft
    pub module: DesignModule,
    /// Program that reads the prompt on stdin and prints the draft
    #[arg(long, env = "PLANWRIGHT_COLLABORATOR")]
    pub command: String,
    /// Argument passed to the program; repeat for several
    #[arg(long = "arg", allow_hyphen_values = true)]
    pub args: Vec<String>,
    /// Reviewer feedback on a previously rejected draft
    #[arg(long)]
    pub feedback: Option<String>,
}

impl From<&GenerateSectionArgs> for GenerateSection {
    fn from(val: &GenerateSectionArgs) -> Self {
        GenerateSection {
            id: val.id,
            module: val.module,
            feedback: val.feedback.clone(),
        }
    }
}

/// Arguments naming the pending section of a session
#[derive(Args)]
pub struct SectionArgs {
    /// ID of the session
    pub id: u64,
    /// Module of the pending section
    pub module: DesignModule,
}

impl From<SectionArgs> for ConfirmSection {
    fn from(val: SectionArgs) -> Self {
        ConfirmSection {
            id: val.id,
            module: val.module,
        }
    }
}

/// Reject the pending section
#[derive(Args)]
pub struct RejectSectionArgs {
    /// ID of the session
    pub id: u64,
    /// Module of the pending section
    pub module: DesignModule,
    /// What the revision should change
    #[arg(short, long, default_value = "")]
    pub feedback: String,
}

impl From<RejectSectionArgs> for RejectSection {
    fn from(val: RejectSectionArgs) -> Self {
        RejectSection {
            id: val.id,
            module: val.module,
            feedback: val.feedback,
        }
    }
}

#[derive(Subcommand)]
pub enum SectionCommands {
    /// Stage caller-written text for the next module
    Propose(ProposeSectionArgs),
    /// Draft the next module with an external program
    Generate(GenerateSectionArgs),
    /// Confirm the pending section
    Confirm(SectionArgs),
    /// Reject the pending section
    Reject(RejectSectionArgs),
}

// ============================================================================
// Hooks
// ============================================================================

/// Print the session-start payload
#[derive(Args)]
pub struct SessionStartArgs {
    /// Plugin root holding skills/using-planwright/SKILL.md. Defaults to the
    /// current directory
    #[arg(long, env = "PLANWRIGHT_PLUGIN_ROOT")]
    pub plugin_root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum HookCommands {
    /// Emit the session-start context as JSON
    SessionStart(SessionStartArgs),
}

/// Run a hook. Hooks always succeed so the host session can start.
pub fn run_hook(command: HookCommands) {
    match command {
        HookCommands::SessionStart(args) => {
            let root = args.plugin_root.unwrap_or_else(|| PathBuf::from("."));
            let path = hook::context_document_path(&root);
            match hook::session_start_json(&path) {
                Ok(json) => println!("{json}"),
                Err(e) => warn!("Failed to build session-start payload: {e}"),
            }
        }
    }
}

/// Read text from a file, or from stdin when the path is `-`.
fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs commands against a workflow and renders the results.
pub struct Cli {
    workflow: Workflow,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(workflow: Workflow, renderer: TerminalRenderer) -> Self {
        Self { workflow, renderer }
    }

    fn render(&self, output: impl std::fmt::Display) -> Result<()> {
        self.renderer.render(&output.to_string())
    }

    pub async fn list_sessions(&self, params: &ListSessions) -> Result<()> {
        let sessions = self
            .workflow
            .list_sessions(params)
            .await
            .context("Failed to list sessions")?;
        self.render(Sessions(sessions))
    }

    pub async fn handle_session_command(&self, command: SessionCommands) -> Result<()> {
        match command {
            SessionCommands::Start(args) => {
                let session = self
                    .workflow
                    .start_session(&args.into())
                    .await
                    .context("Failed to start session")?;
                self.render(CreateResult::new(session))
            }
            SessionCommands::List(args) => self.list_sessions(&args.into()).await,
            SessionCommands::Show(args) => {
                let id = args.id;
                match self
                    .workflow
                    .get_session(&args.into())
                    .await
                    .context("Failed to get session")?
                {
                    Some(session) => self.render(session),
                    None => bail!("Session with ID {id} not found"),
                }
            }
            SessionCommands::Abort(args) => {
                let id = args.id;
                let session = self
                    .workflow
                    .abort(&args.into())
                    .await
                    .with_context(|| format!("Failed to abort session {id}"))?;
                self.render(AbortResult { session })
            }
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::List => self.render(StepDefinitions(registry::all_steps())),
            StepCommands::Status(args) => {
                let outcome = self
                    .workflow
                    .evaluate(&args.into())
                    .await
                    .context("Failed to evaluate gate")?;
                self.render(outcome)
            }
            StepCommands::Advance(args) => {
                let params = Id { id: args.id };
                let outcome = if args.require {
                    self.workflow.require_advance(&params).await
                } else {
                    self.workflow.advance(&params).await
                }
                .context("Failed to advance")?;
                self.render(outcome)
            }
        }
    }

    pub async fn handle_clarify_command(&self, command: ClarifyCommands) -> Result<()> {
        let outcome = match command {
            ClarifyCommands::Record(args) => self
                .workflow
                .record_clarification(&args.into())
                .await
                .context("Failed to record clarification")?,
            ClarifyCommands::Confirm(args) => self
                .workflow
                .confirm_clarification(&args.into())
                .await
                .context("Failed to confirm clarification")?,
        };
        self.render(outcome)
    }

    pub async fn handle_solution_command(&self, command: SolutionCommands) -> Result<()> {
        let outcome = match command {
            SolutionCommands::Propose(args) => {
                let json = read_input(&args.file)?;
                let alternatives: Vec<Alternative> =
                    serde_json::from_str(&json).context("Failed to parse alternatives")?;
                self.workflow
                    .propose_solutions(&ProposeSolutions {
                        id: args.id,
                        alternatives,
                    })
                    .await
                    .context("Failed to propose solutions")?
            }
            SolutionCommands::Confirm(args) => self
                .workflow
                .confirm_solution(&args.into())
                .await
                .context("Failed to confirm solution")?,
        };
        self.render(outcome)
    }

    pub async fn handle_outline(&self, args: OutlineArgs) -> Result<()> {
        let outcome = self
            .workflow
            .draft_outline(&args.into())
            .await
            .context("Failed to draft outline")?;
        self.render(outcome)
    }

    pub async fn handle_section_command(&self, command: SectionCommands) -> Result<()> {
        match command {
            SectionCommands::Propose(args) => {
                let text = match (args.text, args.file) {
                    (Some(text), _) => text,
                    (None, Some(path)) => read_input(&path)?,
                    (None, None) => bail!("Either --text or --file is required"),
                };
                let pending = self
                    .workflow
                    .propose_section(&ProposeSection {
                        id: args.id,
                        module: args.module,
                        text,
                    })
                    .await
                    .context("Failed to propose section")?;
                self.render(pending)
            }
            SectionCommands::Generate(args) => {
                let collaborator = Arc::new(CommandCollaborator::new(
                    args.command.clone(),
                    args.args.clone(),
                ));
                let pending = self
                    .workflow
                    .generate_section(&(&args).into(), collaborator)
                    .await
                    .context("Failed to generate section")?;
                self.render(pending)
            }
            SectionCommands::Confirm(args) => {
                let confirmation = self
                    .workflow
                    .confirm_section(&args.into())
                    .await
                    .context("Failed to confirm section")?;
                self.render(confirmation)
            }
            SectionCommands::Reject(args) => {
                let revision = self
                    .workflow
                    .reject_section(&args.into())
                    .await
                    .context("Failed to reject section")?;
                self.render(revision)
            }
        }
    }
}
