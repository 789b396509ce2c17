//! Project-relative path conventions.
//!
//! ```text
//! <project>/docs/tasks/<task>-task.md              optional task context
//! <project>/docs/plans/YYYY-MM-DD-<topic>-design.md  design document
//! ```

use std::path::{Path, PathBuf};

use jiff::civil::Date;

use crate::error::{Result, WorkflowError};

pub const PLANS_DIR: &str = "docs/plans";
pub const TASKS_DIR: &str = "docs/tasks";

/// Lowercase the topic and collapse every run of non-alphanumeric characters
/// into a single `-`.
pub fn slugify(topic: &str) -> String {
    let mut slug = String::with_capacity(topic.len());
    for ch in topic.trim().chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// `YYYY-MM-DD-<topic-slug>`
pub fn task_id(date: Date, topic: &str) -> String {
    format!("{}-{}", date, slugify(topic))
}

/// Canonical design document location for a task id.
pub fn design_doc_path(project_root: &Path, task_id: &str) -> PathBuf {
    project_root
        .join(PLANS_DIR)
        .join(format!("{task_id}-design.md"))
}

/// Location of the optional task context file. The task name is used as
/// given and must name a file directly inside the tasks directory.
pub fn task_context_path(project_root: &Path, task: &str) -> Result<PathBuf> {
    let task = task.trim();
    if task.is_empty() {
        return Err(WorkflowError::invalid_input("task").with_reason("must not be empty"));
    }
    if task.contains(['/', '\\']) || task.contains("..") {
        return Err(WorkflowError::invalid_input("task")
            .with_reason("must not contain path separators or '..'"));
    }
    Ok(project_root.join(TASKS_DIR).join(format!("{task}-task.md")))
}
