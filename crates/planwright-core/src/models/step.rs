//! Workflow step identifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Type-safe enumeration of the four planning steps, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Step 1: purpose, constraints and success criteria are clarified
    Clarification = 1,

    /// Step 2: alternatives are proposed and one is confirmed
    SolutionProposal = 2,

    /// Step 3: the design document outline is drafted
    PlanDrafting = 3,

    /// Step 4: the design document is written section by section
    DocumentGeneration = 4,
}

impl StepId {
    /// Every step in execution order.
    pub const ALL: [StepId; 4] = [
        StepId::Clarification,
        StepId::SolutionProposal,
        StepId::PlanDrafting,
        StepId::DocumentGeneration,
    ];

    /// 1-based position of the step in the workflow.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Stable machine-readable name, also used for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Clarification => "clarification",
            StepId::SolutionProposal => "solution_proposal",
            StepId::PlanDrafting => "plan_drafting",
            StepId::DocumentGeneration => "document_generation",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            StepId::Clarification => "Clarification",
            StepId::SolutionProposal => "Solution Proposal",
            StepId::PlanDrafting => "Plan Drafting",
            StepId::DocumentGeneration => "Document Generation",
        }
    }
}

impl TryFrom<u8> for StepId {
    type Error = WorkflowError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(StepId::Clarification),
            2 => Ok(StepId::SolutionProposal),
            3 => Ok(StepId::PlanDrafting),
            4 => Ok(StepId::DocumentGeneration),
            _ => Err(WorkflowError::InvalidStep { id }),
        }
    }
}

impl FromStr for StepId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(number) = s.parse::<u8>() {
            return StepId::try_from(number).map_err(|e| e.to_string());
        }
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "clarification" => Ok(StepId::Clarification),
            "solution_proposal" => Ok(StepId::SolutionProposal),
            "plan_drafting" => Ok(StepId::PlanDrafting),
            "document_generation" => Ok(StepId::DocumentGeneration),
            _ => Err(format!("Invalid step: {s}")),
        }
    }
}
