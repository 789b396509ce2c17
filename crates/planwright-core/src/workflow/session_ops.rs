//! Session lifecycle operations for the Workflow.

use jiff::Zoned;
use tokio::task;

use super::Workflow;
use crate::{
    db::Database,
    error::{Result, ResultExt, WorkflowError},
    gate::GateOutcome,
    models::WorkflowSession,
    params::{Id, ListSessions, StartSession},
};

impl Workflow {
    /// Starts a new session at step 1 and stores it. The task id uses
    /// today's date in the system time zone.
    pub async fn start_session(&self, params: &StartSession) -> Result<WorkflowSession> {
        let db_path = self.db_path.clone();
        let controller = self.controller.clone();
        let topic = params.topic.clone();
        let task_name = params.task.clone();

        task::spawn_blocking(move || {
            let today = Zoned::now().date();
            let mut session = controller.start(&topic, task_name.as_deref(), today)?;
            let mut db = Database::new(&db_path)?;
            db.insert_session(&mut session)?;
            Ok::<_, WorkflowError>(session)
        })
        .await
        .with_context("Task join error")?
    }

    /// Retrieves a session by its ID.
    pub async fn get_session(&self, params: &Id) -> Result<Option<WorkflowSession>> {
        let db_path = self.db_path.clone();
        let id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_session(id)
        })
        .await
        .with_context("Task join error")?
    }

    /// Lists sessions, open ones only unless `include_closed` is set.
    pub async fn list_sessions(&self, params: &ListSessions) -> Result<Vec<WorkflowSession>> {
        let db_path = self.db_path.clone();
        let include_closed = params.include_closed;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_sessions(include_closed)
        })
        .await
        .with_context("Task join error")?
    }

    /// Evaluates the open step's gate without changing anything.
    pub async fn evaluate(&self, params: &Id) -> Result<GateOutcome> {
        self.with_session(params.id, |controller, session| {
            Ok(controller.evaluate(session))
        })
        .await
    }

    /// Terminates a session at the user's request and returns it.
    pub async fn abort(&self, params: &Id) -> Result<WorkflowSession> {
        self.with_session(params.id, |controller, session| {
            controller.abort(session)?;
            Ok(session.clone())
        })
        .await
    }
}
