//! Builder for creating and configuring Workflow instances.

use std::{
    env::current_dir,
    path::{Component, Path, PathBuf},
};

use tokio::task;

use super::Workflow;
use crate::{
    artifact::ArtifactStore,
    controller::WorkflowController,
    db::Database,
    error::{Result, ResultExt, WorkflowError},
};

/// Builder for creating and configuring Workflow instances.
#[derive(Debug, Clone, Default)]
pub struct WorkflowBuilder {
    database_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
}

impl WorkflowBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/planwright/planwright.db` or
    /// `~/.local/share/planwright/planwright.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project directory that receives `docs/plans/` and provides
    /// `docs/tasks/`. Defaults to the current working directory.
    pub fn with_project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the configured workflow instance.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::FileSystem` if the database directory cannot be
    /// created or the working directory cannot be resolved.
    /// Returns `WorkflowError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Workflow> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };
        let project_root = absolute_path(self.project_root.unwrap_or_default())?;

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| WorkflowError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), WorkflowError>(())
        })
        .await
        .with_context("Task join error")??;

        let controller = WorkflowController::new(ArtifactStore::new(project_root));
        Ok(Workflow::new(db_path, controller))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("planwright")
            .place_data_file("planwright.db")
            .map_err(|e| WorkflowError::XdgDirectory(e.to_string()))
    }
}

/// Resolve `path` against the current directory and drop `.`/`..`
/// components without requiring the path to exist. An empty path means the
/// current directory.
fn absolute_path(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_path(&path));
    }
    let cwd = current_dir().map_err(|e| WorkflowError::FileSystem {
        path: path.clone(),
        source: e,
    })?;
    Ok(normalize_path(&cwd.join(path)))
}

fn normalize_path(path: &Path) -> PathBuf {
    path.components().fold(PathBuf::new(), |mut acc, component| {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                acc.pop();
            }
            _ => acc.push(component),
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/work/./project/../other")),
            PathBuf::from("/work/other")
        );
    }

    #[test]
    fn test_relative_root_becomes_absolute() {
        let resolved = absolute_path(PathBuf::from("docs/..")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, normalize_path(&current_dir().unwrap()));
    }
}
