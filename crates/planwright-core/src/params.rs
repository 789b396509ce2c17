//! Parameter structures for workflow operations
//!
//! These structures carry request data from an interface layer (currently the
//! CLI) into the [`Workflow`](crate::Workflow) facade without any
//! interface-framework derives. The CLI defines its own clap argument structs
//! and converts them with `From` implementations:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Workflow → Controller
//! ```
//!
//! Session-scoped parameters always carry the session `id`; the facade loads
//! that session, applies one controller operation and saves it again.

use serde::{Deserialize, Serialize};

use crate::models::{Alternative, DesignModule};

/// Generic parameters for operations requiring just a session ID.
///
/// Used for show, evaluate, confirm-clarification, advance and abort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the session to operate on
    pub id: u64,
}

/// Parameters for starting a planning session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartSession {
    /// Theme of the planning task; also names the design document
    pub topic: String,
    /// Optional task name whose `docs/tasks/<task>-task.md` is merged as
    /// background
    pub task: Option<String>,
}

/// Parameters for listing sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSessions {
    /// Include completed and aborted sessions
    pub include_closed: bool,
}

/// Parameters for recording clarification answers (step 1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordClarification {
    pub id: u64,
    pub purpose: Option<String>,
    pub constraints: Option<String>,
    pub success_criteria: Option<String>,
}

/// Parameters for presenting alternatives (step 2).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposeSolutions {
    pub id: u64,
    pub alternatives: Vec<Alternative>,
}

/// Parameters for confirming the chosen alternative (step 2).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmSolution {
    pub id: u64,
    /// 1-based position of the chosen alternative
    pub choice: usize,
    /// Optional adjustments on top of the chosen alternative
    pub revision: Option<String>,
}

/// Parameters for drafting the document outline (step 3).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftOutline {
    pub id: u64,
    pub modules: Vec<DesignModule>,
    pub notes: Option<String>,
}

/// Parameters for proposing caller-written section text (step 4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposeSection {
    pub id: u64,
    pub module: DesignModule,
    pub text: String,
}

/// Parameters for asking the collaborator to draft a section (step 4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSection {
    pub id: u64,
    pub module: DesignModule,
    /// Reviewer feedback on a previously rejected draft
    pub feedback: Option<String>,
}

/// Parameters identifying the pending section to confirm (step 4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmSection {
    pub id: u64,
    pub module: DesignModule,
}

/// Parameters for rejecting the pending section (step 4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectSection {
    pub id: u64,
    pub module: DesignModule,
    pub feedback: String,
}
