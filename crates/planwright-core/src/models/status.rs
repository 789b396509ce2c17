//! Status enumerations for planning sessions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StepId;

/// Coarse lifecycle status of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Work on the open step is under way
    #[default]
    InProgress,

    /// A document section waits for explicit user confirmation
    AwaitingConfirmation,

    /// The design document was persisted
    Completed,

    /// The user terminated the session
    Aborted,
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_progress" | "inprogress" => Ok(SessionStatus::InProgress),
            "awaiting_confirmation" => Ok(SessionStatus::AwaitingConfirmation),
            "completed" => Ok(SessionStatus::Completed),
            "aborted" => Ok(SessionStatus::Aborted),
            _ => Err(format!("Invalid session status: {s}")),
        }
    }
}

impl SessionStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::AwaitingConfirmation => "awaiting_confirmation",
            SessionStatus::Completed => "completed",
            SessionStatus::Aborted => "aborted",
        }
    }

    /// Completed and aborted sessions accept no further actions.
    pub fn is_closed(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Aborted)
    }
}

/// Position of a session in the workflow state machine.
///
/// ```text
/// ClarificationPending → SolutionPending → PlanPending → DraftingPending → Completed
///          └───────────────────┴──────────────┴───────────────┴──────────▶ Aborted
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    ClarificationPending,
    SolutionPending,
    PlanPending,
    DraftingPending,
    Completed,
    Aborted,
}

impl WorkflowState {
    /// Derive the state from the open step and the session status.
    pub fn of(step: StepId, status: SessionStatus) -> Self {
        match status {
            SessionStatus::Completed => WorkflowState::Completed,
            SessionStatus::Aborted => WorkflowState::Aborted,
            SessionStatus::InProgress | SessionStatus::AwaitingConfirmation => match step {
                StepId::Clarification => WorkflowState::ClarificationPending,
                StepId::SolutionProposal => WorkflowState::SolutionPending,
                StepId::PlanDrafting => WorkflowState::PlanPending,
                StepId::DocumentGeneration => WorkflowState::DraftingPending,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::ClarificationPending => "ClarificationPending",
            WorkflowState::SolutionPending => "SolutionPending",
            WorkflowState::PlanPending => "PlanPending",
            WorkflowState::DraftingPending => "DraftingPending",
            WorkflowState::Completed => "Completed",
            WorkflowState::Aborted => "Aborted",
        }
    }
}
