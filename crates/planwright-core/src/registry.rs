//! Static table of workflow step definitions.
//!
//! The table is built at compile time and never mutated, so it can be read
//! from any number of sessions concurrently without synchronization.

use crate::{
    error::{Result, WorkflowError},
    models::StepId,
};

/// Immutable description of one workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: StepId,
    /// Inputs that must be recorded while the step is open
    pub required_inputs: &'static [&'static str],
    /// Actions the step accepts
    pub actions: &'static [&'static str],
    /// Acceptance criterion checked before the step may be left
    pub required_acceptance: &'static str,
    /// Whether leaving this step writes the design document
    pub produces_artifact: bool,
}

static STEPS: [StepDefinition; 4] = [
    StepDefinition {
        id: StepId::Clarification,
        required_inputs: &["purpose", "constraints", "success-criteria"],
        actions: &["clarify", "confirm-clarification"],
        required_acceptance: "Purpose, constraints and success criteria are all recorded and \
                              the user confirmed that no ambiguity remains",
        produces_artifact: false,
    },
    StepDefinition {
        id: StepId::SolutionProposal,
        required_inputs: &["alternatives", "chosen-solution"],
        actions: &["propose-solutions", "confirm-solution"],
        required_acceptance: "Two or three alternatives with advantages, disadvantages and \
                              applicable scenarios were presented, exactly one recommended, \
                              and the user confirmed the chosen solution",
        produces_artifact: false,
    },
    StepDefinition {
        id: StepId::PlanDrafting,
        required_inputs: &["outline"],
        actions: &["outline"],
        required_acceptance: "The outline covers Architecture, Components, Data Flow, \
                              Error Handling and Testing",
        produces_artifact: false,
    },
    StepDefinition {
        id: StepId::DocumentGeneration,
        required_inputs: &["sections"],
        actions: &["propose-section", "generate-section", "confirm-section", "reject-section"],
        required_acceptance: "Every mandatory module has a confirmed section and the design \
                              document is written to its canonical path",
        produces_artifact: true,
    },
];

/// Definition of a step.
pub fn get_step(id: StepId) -> &'static StepDefinition {
    &STEPS[usize::from(id.number()) - 1]
}

/// Definition of a step by its 1-based number.
pub fn get_step_by_number(number: u8) -> Result<&'static StepDefinition> {
    StepId::try_from(number)
        .map(get_step)
        .map_err(|_| WorkflowError::InvalidStep { id: number })
}

/// The step following `id`, or `None` at the last step.
pub fn next_step(id: StepId) -> Option<&'static StepDefinition> {
    STEPS.get(usize::from(id.number()))
}

/// All definitions in execution order.
pub fn all_steps() -> &'static [StepDefinition] {
    &STEPS
}
