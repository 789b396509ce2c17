//! Design document rendering and persistence.

use std::{
    fmt::Write as _,
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
};

use log::info;
use tempfile::NamedTempFile;

use crate::{
    error::{Result, WorkflowError},
    models::WorkflowSession,
    paths,
};

/// Reads task context from and writes design documents into a project.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    project_root: PathBuf,
}

impl ArtifactStore {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Canonical path of the session's design document.
    pub fn path_for(&self, session: &WorkflowSession) -> PathBuf {
        paths::design_doc_path(&self.project_root, session.task_id())
    }

    /// Render the confirmed sections as a markdown document.
    pub fn render(session: &WorkflowSession) -> String {
        let mut doc = String::new();
        let _ = writeln!(doc, "# {} Design", session.topic());
        let _ = writeln!(doc);
        let _ = writeln!(doc, "- Task: {}", session.task_id());
        let _ = writeln!(doc, "- Created: {}", session.created_on());
        if let Some((alternative, chosen)) = session.chosen_solution() {
            let _ = writeln!(doc, "- Solution: {}", alternative.title);
            if let Some(revision) = &chosen.revision {
                let _ = writeln!(doc, "- Revision: {revision}");
            }
        }
        for section in session.sections() {
            let _ = writeln!(doc);
            let _ = writeln!(doc, "## {}", section.module.title());
            let _ = writeln!(doc);
            let _ = writeln!(doc, "{}", section.body.trim_end());
        }
        doc
    }

    /// Write the design document to its canonical path.
    ///
    /// The document is staged in a temporary file next to its destination
    /// and linked into place, so a failed write never leaves a partial
    /// document behind. A different existing document is never overwritten.
    /// An existing document identical to the rendered one is accepted, which
    /// lets a session whose completion was not saved finish on retry.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::PersistenceFailure` if the directory cannot be
    /// created, another document already exists, or the write fails.
    pub fn persist(&self, session: &WorkflowSession) -> Result<PathBuf> {
        let path = self.path_for(session);
        let failure = |reason: String| WorkflowError::PersistenceFailure {
            path: path.clone(),
            reason,
        };
        let Some(dir) = path.parent() else {
            return Err(failure("the document path has no parent directory".to_string()));
        };
        let rendered = Self::render(session);

        fs::create_dir_all(dir).map_err(|e| failure(e.to_string()))?;
        let mut staged = NamedTempFile::new_in(dir).map_err(|e| failure(e.to_string()))?;
        staged
            .write_all(rendered.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| failure(e.to_string()))?;

        match staged.persist_noclobber(&path) {
            Ok(_) => {
                info!("Design document written to {}", path.display());
                Ok(path)
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                if fs::read_to_string(&path).is_ok_and(|existing| existing == rendered) {
                    info!("Design document already present at {}", path.display());
                    Ok(path)
                } else {
                    Err(failure("a design document already exists".to_string()))
                }
            }
            Err(e) => Err(failure(e.error.to_string())),
        }
    }

    /// Read `docs/tasks/<task>-task.md` if it exists.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidInput` for a task name that would leave
    /// the tasks directory and `WorkflowError::FileSystem` if the file exists
    /// but cannot be read.
    pub fn load_task_context(&self, task: &str) -> Result<Option<String>> {
        let path = paths::task_context_path(&self.project_root, task)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                info!("Loaded task context from {}", path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(WorkflowError::FileSystem { path, source }),
        }
    }
}
