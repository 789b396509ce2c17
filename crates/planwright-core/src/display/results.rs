//! Result wrapper types and Display implementations for operation outcomes.

use std::fmt;

use crate::{
    controller::AdvanceOutcome,
    gate::GateOutcome,
    models::{RevisionRequest, SectionConfirmation, WorkflowSession},
    registry,
};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use planwright_core::{display::CreateResult, models::WorkflowSession};
/// use jiff::civil::date;
///
/// let session = WorkflowSession::new("Search Index", date(2026, 1, 2), None);
/// let output = format!("{}", CreateResult::new(session));
/// assert!(output.contains("Started session with ID: 0"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<WorkflowSession> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Started session with ID: {}", self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying an aborted session.
pub struct AbortResult {
    pub session: WorkflowSession,
}

impl fmt::Display for AbortResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = self.session.current_step();
        writeln!(
            f,
            "Aborted session {} ({}) at step {} ({}).",
            self.session.id(),
            self.session.task_id(),
            step.number(),
            step.title()
        )
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let definition = registry::get_step(self.step);
        if self.satisfied {
            writeln!(
                f,
                "Step {} ({}) is ready to advance.",
                self.step.number(),
                self.step.title()
            )
        } else {
            writeln!(
                f,
                "Step {} ({}) is not complete.",
                self.step.number(),
                self.step.title()
            )?;
            writeln!(f)?;
            writeln!(f, "Acceptance: {}", definition.required_acceptance)?;
            writeln!(f)?;
            writeln!(f, "Missing:")?;
            for requirement in &self.missing {
                writeln!(f, "- {requirement}")?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for AdvanceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvanceOutcome::Advanced { from, to } => writeln!(
                f,
                "Advanced from step {} ({}) to step {} ({}).",
                from.number(),
                from.title(),
                to.number(),
                to.title()
            ),
            AdvanceOutcome::Completed { artifact } => {
                writeln!(f, "Planning complete.")?;
                writeln!(f)?;
                writeln!(f, "Design document: {}", artifact.display())
            }
            AdvanceOutcome::Blocked { step, missing } => {
                writeln!(
                    f,
                    "Still at step {} ({}); missing:",
                    step.number(),
                    step.title()
                )?;
                for requirement in missing {
                    writeln!(f, "- {requirement}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SectionConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionConfirmation::Appended { module } => {
                writeln!(f, "Confirmed section: {module}")
            }
            SectionConfirmation::Continued { next } => {
                writeln!(f, "Confirmed part of section: {}", next.module)?;
                writeln!(f)?;
                writeln!(f, "Next part awaiting confirmation:")?;
                writeln!(f)?;
                write!(f, "{next}")
            }
        }
    }
}

impl fmt::Display for RevisionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rejected section: {}", self.module)?;
        if !self.feedback.is_empty() {
            writeln!(f, "Feedback: {}", self.feedback)?;
        }
        writeln!(f, "Propose a revised '{}' section to continue.", self.module)
    }
}
