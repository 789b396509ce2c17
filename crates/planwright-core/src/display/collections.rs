//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::{models::WorkflowSession, registry::StepDefinition};

/// Newtype wrapper for displaying a list of sessions compactly.
///
/// # Examples
///
/// ```rust
/// use planwright_core::{display::Sessions, models::WorkflowSession};
/// use jiff::civil::date;
///
/// let sessions = Sessions(vec![WorkflowSession::new("Cache", date(2026, 1, 2), None)]);
/// assert!(format!("{sessions}").contains("2026-01-02-cache"));
/// assert_eq!(format!("{}", Sessions(vec![])), "No sessions found.\n");
/// ```
pub struct Sessions(pub Vec<WorkflowSession>);

impl fmt::Display for Sessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No sessions found.");
        }
        for session in &self.0 {
            let step = session.current_step();
            writeln!(
                f,
                "- {}. {} [{}] step {}/4 {} ({})",
                session.id(),
                session.topic(),
                session.task_id(),
                step.number(),
                step.title(),
                session.state()
            )?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the step table.
pub struct StepDefinitions<'a>(pub &'a [StepDefinition]);

impl<'a> fmt::Display for StepDefinitions<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for definition in self.0 {
            write!(f, "{definition}")?;
        }
        Ok(())
    }
}
