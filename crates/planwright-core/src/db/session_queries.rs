//! Session CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Row};

use crate::{
    error::{DatabaseResultExt, Result, WorkflowError},
    models::WorkflowSession,
};

const INSERT_SESSION_SQL: &str = "INSERT INTO sessions (task_id, topic, current_step, status, body, artifact_path, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_SESSION_SQL: &str = "SELECT id, body FROM sessions WHERE id = ?1";
const UPDATE_SESSION_SQL: &str = "UPDATE sessions SET current_step = ?1, status = ?2, body = ?3, artifact_path = ?4, updated_at = ?5 WHERE id = ?6";
const LIST_OPEN_SESSIONS_SQL: &str =
    "SELECT id, body FROM sessions WHERE status NOT IN ('completed', 'aborted') ORDER BY id";
const LIST_ALL_SESSIONS_SQL: &str = "SELECT id, body FROM sessions ORDER BY id";

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<WorkflowSession> {
    let id = row.get::<_, i64>(0)? as u64;
    let body: String = row.get(1)?;
    let mut session: WorkflowSession = serde_json::from_str(&body)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    session.id = id;
    Ok(session)
}

fn artifact_column(session: &WorkflowSession) -> Option<String> {
    session
        .artifact_path()
        .map(|path| path.to_string_lossy().into_owned())
}

impl super::Database {
    /// Stores a new session and assigns its ID.
    pub fn insert_session(&mut self, session: &mut WorkflowSession) -> Result<u64> {
        let body = serde_json::to_string(&*session)?;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_SESSION_SQL,
            params![
                session.task_id(),
                session.topic(),
                session.current_step().number(),
                session.status().as_str(),
                body,
                artifact_column(session),
                session.created_at().to_string(),
                session.updated_at().to_string(),
            ],
        )
        .db_context("Failed to insert session")?;

        let id = tx.last_insert_rowid() as u64;
        tx.commit().db_context("Failed to commit transaction")?;

        session.id = id;
        Ok(id)
    }

    /// Retrieves a session by its ID.
    pub fn get_session(&self, id: u64) -> Result<Option<WorkflowSession>> {
        self.connection
            .query_row(SELECT_SESSION_SQL, params![id as i64], session_from_row)
            .optional()
            .db_context("Failed to query session")
    }

    /// Overwrites the stored state of an existing session.
    pub fn update_session(&mut self, session: &WorkflowSession) -> Result<()> {
        let body = serde_json::to_string(session)?;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let updated = tx
            .execute(
                UPDATE_SESSION_SQL,
                params![
                    session.current_step().number(),
                    session.status().as_str(),
                    body,
                    artifact_column(session),
                    Timestamp::now().to_string(),
                    session.id() as i64,
                ],
            )
            .db_context("Failed to update session")?;

        if updated == 0 {
            return Err(WorkflowError::SessionNotFound { id: session.id() });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Lists sessions in creation order. Completed and aborted sessions are
    /// included only on request.
    pub fn list_sessions(&self, include_closed: bool) -> Result<Vec<WorkflowSession>> {
        let sql = if include_closed {
            LIST_ALL_SESSIONS_SQL
        } else {
            LIST_OPEN_SESSIONS_SQL
        };
        let mut stmt = self
            .connection
            .prepare(sql)
            .db_context("Failed to prepare query")?;

        let sessions = stmt
            .query_map([], session_from_row)
            .db_context("Failed to query sessions")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read session row")?;
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use tempfile::TempDir;

    use super::super::Database;
    use super::*;
    use crate::models::{SessionStatus, StepId};

    fn open() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("sessions.db")).unwrap();
        (temp_dir, db)
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, mut db) = open();
        let mut session = WorkflowSession::new("Queue Worker", date(2026, 5, 1), None);
        let id = db.insert_session(&mut session).unwrap();
        assert_eq!(session.id(), id);

        let loaded = db.get_session(id).unwrap().unwrap();
        assert_eq!(loaded, session);
        assert!(db.get_session(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_session() {
        let (_temp_dir, mut db) = open();
        let mut session = WorkflowSession::new("Ghost", date(2026, 5, 1), None);
        session.id = 42;
        assert!(matches!(
            db.update_session(&session),
            Err(WorkflowError::SessionNotFound { id: 42 })
        ));
    }

    #[test]
    fn test_list_hides_closed_sessions() {
        let (_temp_dir, mut db) = open();
        let mut open_session = WorkflowSession::new("Open", date(2026, 5, 1), None);
        let mut closed = WorkflowSession::new("Closed", date(2026, 5, 1), None);
        db.insert_session(&mut open_session).unwrap();
        db.insert_session(&mut closed).unwrap();

        closed.status = SessionStatus::Aborted;
        closed.current_step = StepId::SolutionProposal;
        db.update_session(&closed).unwrap();

        let open_only = db.list_sessions(false).unwrap();
        assert_eq!(open_only.len(), 1);
        assert_eq!(open_only[0].topic(), "Open");
        assert_eq!(db.list_sessions(true).unwrap().len(), 2);
    }

    #[test]
    fn test_reopen_keeps_artifact_column() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sessions.db");
        let mut session = WorkflowSession::new("Report", date(2026, 5, 1), None);
        {
            let mut db = Database::new(&path).unwrap();
            db.insert_session(&mut session).unwrap();
            session.artifact_path = Some(temp_dir.path().join("report-design.md"));
            db.update_session(&session).unwrap();
        }

        let db = Database::new(&path).unwrap();
        let stored: Option<String> = db
            .connection
            .query_row(
                "SELECT artifact_path FROM sessions WHERE id = ?1",
                [session.id() as i64],
                |row| row.get(0),
            )
            .unwrap();
        assert!(stored.unwrap().ends_with("report-design.md"));
    }
}
