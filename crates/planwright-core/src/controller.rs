//! Finite-state driver of the planning workflow.
//!
//! [`WorkflowController`] is the only mutator of a [`WorkflowSession`]. Every
//! step action first checks that its step is the open one, independent of the
//! gate, so no two steps' work can interleave in committed state. Leaving a
//! step always goes through [`evaluate`](crate::gate::evaluate).
//!
//! ```text
//! ClarificationPending ──advance──▶ SolutionPending ──advance──▶ PlanPending
//!                                                                    │
//!            Completed ◀──advance (persist artifact)── DraftingPending ◀┘
//! ```
//!
//! An unsatisfied [`advance`](WorkflowController::advance) is the normal "not
//! yet ready" state and returns [`AdvanceOutcome::Blocked`] without touching
//! the session; [`require_advance`](WorkflowController::require_advance) turns
//! the same condition into a `GateViolation` error.

use std::{collections::BTreeSet, path::PathBuf};

use jiff::{civil::Date, Timestamp};
use log::{debug, info};

use crate::{
    artifact::ArtifactStore,
    assembler::SectionAssembler,
    collaborator::{Collaborator, GenerationRequest},
    error::{Result, WorkflowError},
    gate::{self, GateOutcome},
    models::{
        Alternative, ChosenSolution, DesignModule, Outline, PendingSection, Requirement,
        RevisionRequest, SectionConfirmation, SessionStatus, StepId, WorkflowSession,
    },
    paths, registry,
};

/// Result of an advance attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The gate passed and the next step is now open
    Advanced { from: StepId, to: StepId },

    /// The last gate passed; the design document was written
    Completed { artifact: PathBuf },

    /// The gate is unsatisfied; nothing changed
    Blocked {
        step: StepId,
        missing: BTreeSet<Requirement>,
    },
}

/// Answers recorded during clarification. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ClarificationInput {
    pub purpose: Option<String>,
    pub constraints: Option<String>,
    pub success_criteria: Option<String>,
}

/// Drives sessions through the four gated steps.
#[derive(Debug, Clone)]
pub struct WorkflowController {
    artifacts: ArtifactStore,
}

impl WorkflowController {
    pub fn new(artifacts: ArtifactStore) -> Self {
        Self { artifacts }
    }

    /// Open a new session at step 1, merging `docs/tasks/<task>-task.md` as
    /// background when a task name is given and the file exists.
    pub fn start(&self, topic: &str, task: Option<&str>, today: Date) -> Result<WorkflowSession> {
        if paths::slugify(topic).is_empty() {
            return Err(WorkflowError::invalid_input("topic")
                .with_reason("must contain at least one letter or digit"));
        }
        let background = match task {
            Some(task) => self.artifacts.load_task_context(task)?,
            None => None,
        };
        let session = WorkflowSession::new(topic, today, background);
        info!("Started planning session '{}'", session.task_id());
        Ok(session)
    }

    /// Evaluate the open step's gate.
    pub fn evaluate(&self, session: &WorkflowSession) -> GateOutcome {
        gate::evaluate(session.current_step, session)
    }

    /// Record step 1 answers. Changing any answer withdraws an earlier
    /// "no ambiguity" confirmation.
    pub fn record_clarification(
        &self,
        session: &mut WorkflowSession,
        input: ClarificationInput,
    ) -> Result<GateOutcome> {
        ensure_open(session, "clarify", StepId::Clarification)?;
        let clarification = &mut session.clarification;
        let mut changed = false;
        for (slot, value) in [
            (&mut clarification.purpose, input.purpose),
            (&mut clarification.constraints, input.constraints),
            (&mut clarification.success_criteria, input.success_criteria),
        ] {
            if let Some(value) = value.map(|v| v.trim().to_string()) {
                if slot.as_deref() != Some(value.as_str()) {
                    *slot = Some(value);
                    changed = true;
                }
            }
        }
        if changed && clarification.no_ambiguity_confirmed {
            debug!("Clarification changed; confirmation withdrawn");
            clarification.no_ambiguity_confirmed = false;
        }
        session.touch();
        Ok(self.evaluate(session))
    }

    /// Record the user's explicit statement that no ambiguity remains.
    pub fn confirm_clarification(&self, session: &mut WorkflowSession) -> Result<GateOutcome> {
        ensure_open(session, "confirm-clarification", StepId::Clarification)?;
        session.clarification.no_ambiguity_confirmed = true;
        session.touch();
        Ok(self.evaluate(session))
    }

    /// Present a new set of alternatives, replacing any earlier set and its
    /// confirmation.
    pub fn propose_solutions(
        &self,
        session: &mut WorkflowSession,
        alternatives: Vec<Alternative>,
    ) -> Result<GateOutcome> {
        ensure_open(session, "propose-solutions", StepId::SolutionProposal)?;
        session.alternatives = alternatives;
        session.chosen = None;
        session.touch();
        Ok(self.evaluate(session))
    }

    /// Record the user's confirmation of one alternative (0-based index),
    /// optionally revised.
    pub fn confirm_solution(
        &self,
        session: &mut WorkflowSession,
        choice: usize,
        revision: Option<String>,
    ) -> Result<GateOutcome> {
        ensure_open(session, "confirm-solution", StepId::SolutionProposal)?;
        if choice >= session.alternatives.len() {
            return Err(WorkflowError::invalid_input("choice").with_reason(format!(
                "{} alternatives were proposed, got choice {}",
                session.alternatives.len(),
                choice + 1
            )));
        }
        session.chosen = Some(ChosenSolution {
            index: choice,
            revision: revision.filter(|r| !r.trim().is_empty()),
            confirmed_at: Timestamp::now(),
        });
        session.touch();
        Ok(self.evaluate(session))
    }

    /// Record the document outline. Modules are kept once each, in canonical
    /// order.
    pub fn draft_outline(
        &self,
        session: &mut WorkflowSession,
        modules: Vec<DesignModule>,
        notes: Option<String>,
    ) -> Result<GateOutcome> {
        ensure_open(session, "outline", StepId::PlanDrafting)?;
        let modules: BTreeSet<DesignModule> = modules.into_iter().collect();
        session.outline = Some(Outline {
            modules: modules.into_iter().collect(),
            notes: notes.filter(|n| !n.trim().is_empty()),
        });
        session.touch();
        Ok(self.evaluate(session))
    }

    /// Stage a caller-supplied draft for the next module.
    pub fn propose_section(
        &self,
        session: &mut WorkflowSession,
        module: DesignModule,
        draft_text: &str,
    ) -> Result<PendingSection> {
        ensure_open(session, "propose-section", StepId::DocumentGeneration)?;
        let pending =
            SectionAssembler::new(&mut session.draft).propose_section(module, draft_text)?;
        session.status = SessionStatus::AwaitingConfirmation;
        session.touch();
        Ok(pending)
    }

    /// Ask the collaborator for a draft of the next module and stage it.
    ///
    /// The slot is checked before the collaborator is called, and a failed
    /// or blank generation leaves the session unchanged.
    pub fn generate_section(
        &self,
        session: &mut WorkflowSession,
        module: DesignModule,
        collaborator: &dyn Collaborator,
        feedback: Option<&str>,
    ) -> Result<PendingSection> {
        ensure_open(session, "generate-section", StepId::DocumentGeneration)?;
        SectionAssembler::new(&mut session.draft).check_slot(module)?;

        let request = GenerationRequest::for_section(session, module, feedback);
        let text = collaborator.generate(&request).map_err(|e| match e {
            WorkflowError::CollaboratorFailure { .. } => e,
            other => WorkflowError::collaborator(other),
        })?;
        if text.trim().is_empty() {
            return Err(WorkflowError::collaborator(format!(
                "no text returned for '{}'",
                module.title()
            )));
        }
        self.propose_section(session, module, &text)
    }

    /// Confirm the pending chunk for `module`.
    pub fn confirm_section(
        &self,
        session: &mut WorkflowSession,
        module: DesignModule,
    ) -> Result<SectionConfirmation> {
        ensure_open(session, "confirm-section", StepId::DocumentGeneration)?;
        let confirmation = SectionAssembler::new(&mut session.draft).confirm_section(module)?;
        session.status = match confirmation {
            SectionConfirmation::Continued { .. } => SessionStatus::AwaitingConfirmation,
            SectionConfirmation::Appended { .. } => SessionStatus::InProgress,
        };
        session.touch();
        Ok(confirmation)
    }

    /// Reject the pending chunk for `module` with feedback for the revision.
    pub fn reject_section(
        &self,
        session: &mut WorkflowSession,
        module: DesignModule,
        feedback: &str,
    ) -> Result<RevisionRequest> {
        ensure_open(session, "reject-section", StepId::DocumentGeneration)?;
        let revision = SectionAssembler::new(&mut session.draft).reject_section(module, feedback)?;
        session.status = SessionStatus::InProgress;
        session.touch();
        Ok(revision)
    }

    /// Leave the open step if its gate is satisfied.
    ///
    /// At the last step the design document is persisted first; if that
    /// fails the session stays at document generation with every confirmed
    /// section intact.
    pub fn advance(&self, session: &mut WorkflowSession) -> Result<AdvanceOutcome> {
        ensure_not_closed(session)?;
        let step = session.current_step;
        let mut outcome = self.evaluate(session);

        let only_artifact_missing = outcome.missing.len() == 1
            && outcome.missing.contains(&Requirement::Artifact);
        if step == StepId::DocumentGeneration && only_artifact_missing {
            let path = self.artifacts.persist(session)?;
            session.artifact_path = Some(path);
            outcome = self.evaluate(session);
        }

        if !outcome.satisfied {
            debug!(
                "Gate for '{}' unsatisfied: {}",
                step,
                outcome.missing_names().join(", ")
            );
            return Ok(AdvanceOutcome::Blocked {
                step,
                missing: outcome.missing,
            });
        }

        let result = match registry::next_step(step) {
            Some(next) => {
                session.current_step = next.id;
                session.status = SessionStatus::InProgress;
                info!("Session '{}' advanced from '{}' to '{}'", session.task_id, step, next.id);
                AdvanceOutcome::Advanced {
                    from: step,
                    to: next.id,
                }
            }
            None => {
                session.status = SessionStatus::Completed;
                let artifact = self.artifacts.path_for(session);
                info!("Session '{}' completed", session.task_id);
                AdvanceOutcome::Completed { artifact }
            }
        };
        session.touch();
        Ok(result)
    }

    /// Like [`advance`](Self::advance), but an unsatisfied gate is an error.
    pub fn require_advance(&self, session: &mut WorkflowSession) -> Result<AdvanceOutcome> {
        match self.advance(session)? {
            AdvanceOutcome::Blocked { step, missing } => {
                Err(WorkflowError::GateViolation { step, missing })
            }
            outcome => Ok(outcome),
        }
    }

    /// Terminate the session at the user's request. No cleanup is needed:
    /// nothing is written outside the session before completion.
    pub fn abort(&self, session: &mut WorkflowSession) -> Result<()> {
        ensure_not_closed(session)?;
        session.status = SessionStatus::Aborted;
        session.draft.pending = None;
        session.touch();
        info!("Session '{}' aborted", session.task_id);
        Ok(())
    }
}

fn ensure_not_closed(session: &WorkflowSession) -> Result<()> {
    if session.is_closed() {
        return Err(WorkflowError::SessionClosed {
            id: session.id,
            status: session.status.as_str(),
        });
    }
    Ok(())
}

fn ensure_open(session: &WorkflowSession, action: &'static str, step: StepId) -> Result<()> {
    ensure_not_closed(session)?;
    if session.current_step != step {
        return Err(WorkflowError::StepOrderViolation {
            action,
            attempted: step,
            current: session.current_step,
        });
    }
    Ok(())
}
