//! High-level async API for running planning sessions.
//!
//! [`Workflow`] is the entry point for interface layers. It maps each request
//! onto one [`WorkflowController`] operation against a stored session:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Workflow     │    │   Controller    │    │    Database     │
//! │ (session_ops,   │───▶│ (gate, section  │    │   (via db/)     │
//! │  step_ops)      │    │  assembler)     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!    load → apply one operation → save, all inside one blocking task
//! ```
//!
//! Loading, mutating and saving happen inside a single blocking task with its
//! own connection, so each request owns the session exclusively for its
//! duration. A failed operation is never saved.
//!
//! # Usage
//!
//! ```rust,no_run
//! use planwright_core::{params::{Id, RecordClarification, StartSession}, WorkflowBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workflow = WorkflowBuilder::new()
//!     .with_database_path("planwright.db")
//!     .with_project_root("/home/user/project")
//!     .build()
//!     .await?;
//!
//! let session = workflow
//!     .start_session(&StartSession { topic: "Billing Export".to_string(), task: None })
//!     .await?;
//!
//! workflow
//!     .record_clarification(&RecordClarification {
//!         id: session.id(),
//!         purpose: Some("Export invoices as CSV".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let outcome = workflow.advance(&Id { id: session.id() }).await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    controller::WorkflowController,
    db::Database,
    error::{Result, ResultExt, WorkflowError},
    models::WorkflowSession,
};

pub mod builder;
pub mod session_ops;
pub mod step_ops;


pub use builder::WorkflowBuilder;

/// Main interface for running planning sessions.
#[derive(Clone)]
pub struct Workflow {
    pub(crate) db_path: PathBuf,
    pub(crate) controller: WorkflowController,
}

impl Workflow {
    pub(crate) fn new(db_path: PathBuf, controller: WorkflowController) -> Self {
        Self {
            db_path,
            controller,
        }
    }

    /// Load session `id`, apply `op`, and save the session if `op` succeeded
    /// and changed it.
    pub(crate) async fn with_session<T, F>(&self, id: u64, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&WorkflowController, &mut WorkflowSession) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let controller = self.controller.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let mut session = db
                .get_session(id)?
                .ok_or(WorkflowError::SessionNotFound { id })?;
            let before = session.clone();

            let result = op(&controller, &mut session)?;
            if session != before {
                db.update_session(&session)?;
            }
            Ok::<T, WorkflowError>(result)
        })
        .await
        .with_context("Task join error")?
    }
}
