//! Display implementations for domain models.
//!
//! All implementations produce markdown for the terminal renderer.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    assembler::word_count,
    models::{
        Alternative, DesignModule, DocumentSection, PendingSection, SessionStatus, StepId,
        WorkflowSession, WorkflowState,
    },
    registry::StepDefinition,
};

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for DesignModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}. {}", self.id.number(), self.id.title())?;
        writeln!(f, "   - Inputs: {}", self.required_inputs.join(", "))?;
        writeln!(f, "   - Actions: {}", self.actions.join(", "))?;
        writeln!(f, "   - Acceptance: {}", self.required_acceptance)
    }
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join("; ")
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if self.recommended {
            write!(f, " (recommended)")?;
        }
        writeln!(f)?;
        if let Some(summary) = &self.summary {
            writeln!(f)?;
            writeln!(f, "{summary}")?;
        }
        writeln!(f)?;
        writeln!(f, "- Advantages: {}", list(&self.advantages))?;
        writeln!(f, "- Disadvantages: {}", list(&self.disadvantages))?;
        writeln!(f, "- Applicable scenarios: {}", list(&self.applicable_scenarios))
    }
}

impl fmt::Display for PendingSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "## {} ({} words", self.module.title(), self.word_count)?;
        if self.continuation {
            write!(f, ", continued")?;
        }
        writeln!(f, ")")?;
        writeln!(f)?;
        writeln!(f, "{}", self.text)?;
        if let Some(overflow) = &self.overflow {
            writeln!(f)?;
            writeln!(
                f,
                "Warning: the draft had {} words, above the {} word limit. \
                 The rest follows as a continuation after confirmation; \
                 reject to shorten or split it instead.",
                overflow.word_count, overflow.limit
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for DocumentSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = if self.complete { "✓" } else { "…" };
        writeln!(
            f,
            "- {icon} {} ({} words)",
            self.module.title(),
            word_count(&self.body)
        )
    }
}

impl fmt::Display for WorkflowSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id(), self.topic())?;
        writeln!(f)?;

        let step = self.current_step();
        writeln!(f, "- Task: {}", self.task_id())?;
        writeln!(f, "- State: {}", self.state())?;
        writeln!(f, "- Step: {}/4 {}", step.number(), step.title())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at()))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at()))?;
        if let Some(path) = self.artifact_path() {
            writeln!(f, "- Design document: {}", path.display())?;
        }

        if let Some(background) = self.background() {
            writeln!(f, "\n## Background")?;
            writeln!(f)?;
            writeln!(f, "{}", background.trim_end())?;
        }

        let clarification = self.clarification();
        let answer = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        writeln!(f, "\n## Clarification")?;
        writeln!(f)?;
        writeln!(f, "- Purpose: {}", answer(&clarification.purpose))?;
        writeln!(f, "- Constraints: {}", answer(&clarification.constraints))?;
        writeln!(f, "- Success criteria: {}", answer(&clarification.success_criteria))?;
        writeln!(
            f,
            "- No ambiguity confirmed: {}",
            if clarification.no_ambiguity_confirmed { "yes" } else { "no" }
        )?;

        if !self.alternatives().is_empty() {
            writeln!(f, "\n## Alternatives")?;
            let chosen = self.chosen_solution().map(|(_, chosen)| chosen);
            for (index, alternative) in self.alternatives().iter().enumerate() {
                writeln!(f)?;
                write!(f, "### {}. {}", index + 1, alternative)?;
                if let Some(chosen) = chosen.filter(|c| c.index == index) {
                    writeln!(f, "- Chosen by the user")?;
                    if let Some(revision) = &chosen.revision {
                        writeln!(f, "- Revision: {revision}")?;
                    }
                }
            }
        }

        if let Some(outline) = self.outline() {
            writeln!(f, "\n## Outline")?;
            writeln!(f)?;
            for module in &outline.modules {
                writeln!(f, "- {module}")?;
            }
            if let Some(notes) = &outline.notes {
                writeln!(f)?;
                writeln!(f, "{notes}")?;
            }
        }

        if step == StepId::DocumentGeneration || !self.sections().is_empty() {
            writeln!(f, "\n## Document")?;
            writeln!(f)?;
            for module in DesignModule::ALL {
                match self.draft().section(module) {
                    Some(section) => write!(f, "{section}")?,
                    None => writeln!(f, "- ○ {}", module.title())?,
                }
            }
            if let Some(pending) = self.pending_section() {
                writeln!(
                    f,
                    "\nAwaiting confirmation: {} ({} words)",
                    pending.module, pending.word_count
                )?;
            }
        }

        Ok(())
    }
}
