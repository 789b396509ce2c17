//! Step actions and transitions for the Workflow.
//!
//! Each method loads the session, delegates to the matching
//! [`WorkflowController`](crate::controller::WorkflowController) operation and
//! saves the result.

use std::sync::Arc;

use super::Workflow;
use crate::{
    collaborator::Collaborator,
    controller::{AdvanceOutcome, ClarificationInput},
    error::{Result, WorkflowError},
    gate::GateOutcome,
    models::{PendingSection, RevisionRequest, SectionConfirmation},
    params::{
        ConfirmSection, ConfirmSolution, DraftOutline, GenerateSection, Id, ProposeSection,
        ProposeSolutions, RecordClarification, RejectSection,
    },
};

impl Workflow {
    /// Records clarification answers; omitted answers are left as they are.
    pub async fn record_clarification(&self, params: &RecordClarification) -> Result<GateOutcome> {
        let input = ClarificationInput {
            purpose: params.purpose.clone(),
            constraints: params.constraints.clone(),
            success_criteria: params.success_criteria.clone(),
        };
        self.with_session(params.id, move |controller, session| {
            controller.record_clarification(session, input)
        })
        .await
    }

    /// Records that the user sees no remaining ambiguity.
    pub async fn confirm_clarification(&self, params: &Id) -> Result<GateOutcome> {
        self.with_session(params.id, |controller, session| {
            controller.confirm_clarification(session)
        })
        .await
    }

    /// Presents alternatives, replacing any earlier set.
    pub async fn propose_solutions(&self, params: &ProposeSolutions) -> Result<GateOutcome> {
        let alternatives = params.alternatives.clone();
        self.with_session(params.id, move |controller, session| {
            controller.propose_solutions(session, alternatives)
        })
        .await
    }

    /// Confirms the alternative at the 1-based position `choice`.
    pub async fn confirm_solution(&self, params: &ConfirmSolution) -> Result<GateOutcome> {
        let choice = params.choice.checked_sub(1).ok_or_else(|| {
            WorkflowError::invalid_input("choice").with_reason("alternatives are numbered from 1")
        })?;
        let revision = params.revision.clone();
        self.with_session(params.id, move |controller, session| {
            controller.confirm_solution(session, choice, revision)
        })
        .await
    }

    /// Records the document outline.
    pub async fn draft_outline(&self, params: &DraftOutline) -> Result<GateOutcome> {
        let modules = params.modules.clone();
        let notes = params.notes.clone();
        self.with_session(params.id, move |controller, session| {
            controller.draft_outline(session, modules, notes)
        })
        .await
    }

    /// Stages caller-written text for the next module.
    pub async fn propose_section(&self, params: &ProposeSection) -> Result<PendingSection> {
        let module = params.module;
        let text = params.text.clone();
        self.with_session(params.id, move |controller, session| {
            controller.propose_section(session, module, &text)
        })
        .await
    }

    /// Asks the collaborator for a draft of the next module and stages it.
    /// The collaborator runs on the blocking pool with no timeout.
    pub async fn generate_section(
        &self,
        params: &GenerateSection,
        collaborator: Arc<dyn Collaborator>,
    ) -> Result<PendingSection> {
        let module = params.module;
        let feedback = params.feedback.clone();
        self.with_session(params.id, move |controller, session| {
            controller.generate_section(session, module, collaborator.as_ref(), feedback.as_deref())
        })
        .await
    }

    /// Confirms the pending section.
    pub async fn confirm_section(&self, params: &ConfirmSection) -> Result<SectionConfirmation> {
        let module = params.module;
        self.with_session(params.id, move |controller, session| {
            controller.confirm_section(session, module)
        })
        .await
    }

    /// Rejects the pending section with feedback.
    pub async fn reject_section(&self, params: &RejectSection) -> Result<RevisionRequest> {
        let module = params.module;
        let feedback = params.feedback.clone();
        self.with_session(params.id, move |controller, session| {
            controller.reject_section(session, module, &feedback)
        })
        .await
    }

    /// Leaves the open step if its gate is satisfied; otherwise reports what
    /// is missing.
    pub async fn advance(&self, params: &Id) -> Result<AdvanceOutcome> {
        self.with_session(params.id, |controller, session| controller.advance(session))
            .await
    }

    /// Like [`advance`](Self::advance), but an unsatisfied gate is a
    /// `GateViolation` error.
    pub async fn require_advance(&self, params: &Id) -> Result<AdvanceOutcome> {
        self.with_session(params.id, |controller, session| {
            controller.require_advance(session)
        })
        .await
    }
}
