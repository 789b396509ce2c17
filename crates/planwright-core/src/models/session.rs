//! Planning session model.

use std::path::{Path, PathBuf};

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{
    Alternative, DesignModule, DocumentSection, PendingSection, SessionStatus, StepId,
    WorkflowState,
};
use crate::paths;

/// Answers gathered during step 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Clarification {
    pub purpose: Option<String>,
    pub constraints: Option<String>,
    pub success_criteria: Option<String>,

    /// The user stated that no ambiguity remains
    #[serde(default)]
    pub no_ambiguity_confirmed: bool,
}

/// The alternative the user confirmed during step 2.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChosenSolution {
    /// 0-based index into the session's alternatives
    pub index: usize,

    /// Adjustments the user asked for on top of the chosen alternative
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,

    pub confirmed_at: Timestamp,
}

/// Structural outline drafted during step 3.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Outline {
    pub modules: Vec<DesignModule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Document under assembly during step 4.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DocumentDraft {
    /// Confirmed sections in canonical module order
    pub sections: Vec<DocumentSection>,

    /// The single chunk awaiting confirmation, if any
    pub pending: Option<PendingSection>,
}

impl DocumentDraft {
    /// Section recorded for a module, if any.
    pub fn section(&self, module: DesignModule) -> Option<&DocumentSection> {
        self.sections.iter().find(|s| s.module == module)
    }

    /// Modules whose section is confirmed and complete.
    pub fn completed_modules(&self) -> impl Iterator<Item = DesignModule> + '_ {
        self.sections.iter().filter(|s| s.complete).map(|s| s.module)
    }
}

/// One end-to-end run of the planning workflow for a single task.
///
/// Fields are crate-private: the workflow controller is the only mutator, so
/// the open step can never be set from outside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowSession {
    /// Store identifier; 0 until the session is first saved
    #[serde(skip)]
    pub(crate) id: u64,
    pub(crate) task_id: String,
    pub(crate) topic: String,
    pub(crate) created_on: Date,
    pub(crate) current_step: StepId,
    pub(crate) status: SessionStatus,
    #[serde(default)]
    pub(crate) background: Option<String>,
    #[serde(default)]
    pub(crate) clarification: Clarification,
    #[serde(default)]
    pub(crate) alternatives: Vec<Alternative>,
    #[serde(default)]
    pub(crate) chosen: Option<ChosenSolution>,
    #[serde(default)]
    pub(crate) outline: Option<Outline>,
    #[serde(default)]
    pub(crate) draft: DocumentDraft,
    #[serde(default)]
    pub(crate) artifact_path: Option<PathBuf>,
    pub(crate) created_at: Timestamp,
    pub(crate) updated_at: Timestamp,
}

impl WorkflowSession {
    /// Starts a session at step 1. The task id is derived from the creation
    /// date and the topic.
    pub fn new(topic: &str, created_on: Date, background: Option<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: 0,
            task_id: paths::task_id(created_on, topic),
            topic: topic.trim().to_string(),
            created_on,
            current_step: StepId::Clarification,
            status: SessionStatus::InProgress,
            background,
            clarification: Clarification::default(),
            alternatives: Vec::new(),
            chosen: None,
            outline: None,
            draft: DocumentDraft::default(),
            artifact_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn created_on(&self) -> Date {
        self.created_on
    }

    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Position in the workflow state machine.
    pub fn state(&self) -> WorkflowState {
        WorkflowState::of(self.current_step, self.status)
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    /// Task context merged before clarification began.
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn clarification(&self) -> &Clarification {
        &self.clarification
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// The confirmed alternative together with the confirmation record.
    pub fn chosen_solution(&self) -> Option<(&Alternative, &ChosenSolution)> {
        self.chosen
            .as_ref()
            .and_then(|chosen| self.alternatives.get(chosen.index).map(|alt| (alt, chosen)))
    }

    pub fn outline(&self) -> Option<&Outline> {
        self.outline.as_ref()
    }

    pub fn draft(&self) -> &DocumentDraft {
        &self.draft
    }

    /// Confirmed document sections in canonical order.
    pub fn sections(&self) -> &[DocumentSection] {
        &self.draft.sections
    }

    pub fn pending_section(&self) -> Option<&PendingSection> {
        self.draft.pending.as_ref()
    }

    /// Where the design document was written, once persisted.
    pub fn artifact_path(&self) -> Option<&Path> {
        self.artifact_path.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
