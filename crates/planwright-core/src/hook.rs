//! Session-start hook payload.
//!
//! At session start the host runs the hook and reads one JSON object from
//! stdout:
//!
//! ```json
//! {"hookSpecificOutput":{"hookEventName":"SessionStart","additionalContext":"..."}}
//! ```
//!
//! The context document is embedded as a JSON string, so backslash, double
//! quote, newline, carriage return and tab appear as two-character escapes.
//! A missing or unreadable document never fails the hook; its error
//! description becomes the context instead.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Context document location, relative to the plugin root.
pub const CONTEXT_DOCUMENT: &str = "skills/using-planwright/SKILL.md";

/// Environment variable consulted for the plugin root.
pub const PLUGIN_ROOT_ENV: &str = "PLANWRIGHT_PLUGIN_ROOT";

pub const SESSION_START_EVENT: &str = "SessionStart";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub additional_context: String,
}

/// Top-level object printed by the hook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

impl HookOutput {
    pub fn session_start(context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: SESSION_START_EVENT.to_string(),
                additional_context: context.into(),
            },
        }
    }

    /// Serialize to a single line of JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Path of the context document under a plugin root.
pub fn context_document_path(plugin_root: &Path) -> PathBuf {
    plugin_root.join(CONTEXT_DOCUMENT)
}

/// Read the context document, substituting an error description on failure.
pub fn load_context(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        warn!("Cannot read context document {}: {e}", path.display());
        format!("Error reading {}: {e}", path.display())
    })
}

/// Build the full session-start JSON for the document at `path`.
pub fn session_start_json(path: &Path) -> Result<String> {
    HookOutput::session_start(load_context(path)).to_json()
}
