//! Core library for the Planwright gated planning workflow.
//!
//! A planning session moves a design task through four steps (clarification,
//! solution proposal, plan drafting and document generation) and may only
//! leave a step once that step's acceptance requirements hold. The finished
//! session is written to `docs/plans/<task-id>-design.md` under the project
//! root.
//!
//! # Layers
//!
//! - **Models** ([`models`]): the session record and its parts
//! - **Gate** ([`gate`]) and **registry** ([`registry`]): pure acceptance
//!   checks over the static step table
//! - **Controller** ([`controller`]): the only mutator of a session, built on
//!   the [`assembler`] for step 4 and the [`artifact`] store for output
//! - **Workflow** ([`workflow`]): async facade that loads, mutates and saves
//!   sessions in the SQLite [`db`]
//! - **Display** ([`display`]): markdown formatting for every result
//! - **Hook** ([`hook`]): the session-start context payload for host agents
//!
//! # Quick Start
//!
//! ```rust
//! use planwright_core::{params::StartSession, WorkflowBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workflow = WorkflowBuilder::new()
//!     .with_database_path("planwright.db")
//!     .with_project_root("/home/user/project")
//!     .build()
//!     .await?;
//!
//! let session = workflow
//!     .start_session(&StartSession {
//!         topic: "Billing Export".to_string(),
//!         task: Some("billing".to_string()),
//!     })
//!     .await?;
//! println!("{session}");
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod assembler;
pub mod collaborator;
pub mod controller;
pub mod db;
pub mod display;
pub mod error;
pub mod gate;
pub mod hook;
pub mod models;
pub mod params;
pub mod paths;
pub mod registry;
pub mod workflow;

// Re-export commonly used types
pub use artifact::ArtifactStore;
pub use collaborator::{Collaborator, CommandCollaborator, GenerationRequest};
pub use controller::{AdvanceOutcome, ClarificationInput, WorkflowController};
pub use db::Database;
pub use display::{AbortResult, CreateResult, LocalDateTime, Sessions, StepDefinitions};
pub use error::{Result, WorkflowError};
pub use gate::GateOutcome;
pub use models::{
    Alternative, DesignModule, DocumentSection, PendingSection, Requirement, RevisionRequest,
    SectionConfirmation, SessionStatus, StepId, WorkflowSession, WorkflowState,
};
pub use workflow::{Workflow, WorkflowBuilder};
