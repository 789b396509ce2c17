//! Data models for planning sessions.
//!
//! This module contains the domain models of the gated planning workflow.
//! Display implementations for these models live in [`crate::display::models`]
//! so that data structures and presentation stay separate.
//!
//! # Model Overview
//!
//! - [`StepId`]: the four workflow steps as a tagged enum
//! - [`SessionStatus`] and [`WorkflowState`]: coarse session status and the
//!   derived state-machine position
//! - [`WorkflowSession`]: one planning run, owning everything recorded so far
//! - [`Alternative`]: a candidate solution presented during step 2
//! - [`DesignModule`]: the five mandatory design document modules
//! - [`DocumentSection`] and [`PendingSection`]: confirmed and unconfirmed
//!   document text
//! - [`Requirement`]: a single unmet acceptance requirement
//!
//! # Examples
//!
//! ```rust
//! use planwright_core::models::{StepId, WorkflowSession, WorkflowState};
//! use jiff::civil::date;
//!
//! let session = WorkflowSession::new("Billing Export", date(2026, 3, 14), None);
//! assert_eq!(session.task_id(), "2026-03-14-billing-export");
//! assert_eq!(session.current_step(), StepId::Clarification);
//! assert_eq!(session.state(), WorkflowState::ClarificationPending);
//! ```

pub mod alternative;
pub mod module;
pub mod requirement;
pub mod section;
pub mod session;
pub mod status;
pub mod step;


pub use alternative::Alternative;
pub use module::DesignModule;
pub use requirement::Requirement;
pub use section::{
    DocumentSection, PendingSection, RevisionRequest, SectionConfirmation, SectionOverflow,
};
pub use session::{ChosenSolution, Clarification, DocumentDraft, Outline, WorkflowSession};
pub use status::{SessionStatus, WorkflowState};
pub use step::StepId;
