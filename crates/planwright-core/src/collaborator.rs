//! Seam to the external text-generation collaborator.
//!
//! The controller treats generation as an opaque blocking call. It applies no
//! timeout of its own; cancellation belongs to whoever drives the controller.

use std::{
    io::Write,
    process::{Command, Stdio},
};

use log::debug;

use crate::{
    error::{Result, WorkflowError},
    models::{DesignModule, WorkflowSession},
};

/// Everything a collaborator needs to draft one design section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub module: DesignModule,
    pub prompt: String,
}

impl GenerationRequest {
    /// Build a section request from what the session has recorded so far.
    pub fn for_section(
        session: &WorkflowSession,
        module: DesignModule,
        feedback: Option<&str>,
    ) -> Self {
        let mut prompt = format!(
            "Write the '{}' section of the design document for \"{}\".\n\
             Keep it between 200 and 300 words of markdown, without a heading.\n",
            module.title(),
            session.topic()
        );
        let clarification = session.clarification();
        let facts = [
            ("Purpose", &clarification.purpose),
            ("Constraints", &clarification.constraints),
            ("Success criteria", &clarification.success_criteria),
        ];
        for (label, value) in facts {
            if let Some(value) = value {
                prompt.push_str(&format!("\n{label}: {value}"));
            }
        }
        if let Some((alternative, chosen)) = session.chosen_solution() {
            prompt.push_str(&format!("\nChosen solution: {}", alternative.title));
            if let Some(revision) = &chosen.revision {
                prompt.push_str(&format!("\nRevision: {revision}"));
            }
        }
        if let Some(section) = session.draft().section(module) {
            prompt.push_str(&format!(
                "\n\nContinue this already confirmed text:\n{}",
                section.body
            ));
        }
        if let Some(feedback) = feedback.filter(|f| !f.trim().is_empty()) {
            prompt.push_str(&format!("\n\nReviewer feedback on the previous draft: {feedback}"));
        }
        prompt.push('\n');

        Self {
            topic: session.topic().to_string(),
            module,
            prompt,
        }
    }
}

/// Produces draft text on request.
pub trait Collaborator: Send + Sync {
    /// Generate draft text for the request. Blank output is treated as a
    /// failure by the caller.
    fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

impl<F> Collaborator for F
where
    F: Fn(&GenerationRequest) -> Result<String> + Send + Sync,
{
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self(request)
    }
}

/// Runs an external program: the prompt is written to its stdin and the
/// draft is read from its stdout.
#[derive(Debug, Clone)]
pub struct CommandCollaborator {
    program: String,
    args: Vec<String>,
}

impl CommandCollaborator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Collaborator for CommandCollaborator {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        debug!(
            "Running collaborator '{}' for section '{}'",
            self.program,
            request.module.title()
        );
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("PLANWRIGHT_MODULE", request.module.as_str())
            .env("PLANWRIGHT_TOPIC", &request.topic)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                WorkflowError::collaborator(format!("cannot start '{}': {e}", self.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(request.prompt.as_bytes())
                .map_err(|e| WorkflowError::collaborator(format!("cannot write prompt: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| WorkflowError::collaborator(format!("'{}' failed: {e}", self.program)))?;
        if !output.status.success() {
            return Err(WorkflowError::collaborator(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| WorkflowError::collaborator(format!("output is not UTF-8: {e}")))
    }
}
