//! Design document sections, confirmed and pending.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::DesignModule;

/// Confirmed text for one design module.
///
/// A module owns at most one section. Continuation chunks of an oversized
/// draft extend `body` instead of creating a second section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSection {
    pub module: DesignModule,

    /// Confirmed markdown body, without the module heading
    pub body: String,

    /// False while a continuation of this module is still outstanding
    pub complete: bool,

    /// Timestamp of the most recent confirmation (UTC)
    pub confirmed_at: Timestamp,
}

/// Soft size-band overrun detected when a draft was proposed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionOverflow {
    /// Word count of the draft as submitted
    pub word_count: usize,

    /// Upper bound of the size band
    pub limit: usize,
}

/// A draft chunk waiting for explicit confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingSection {
    pub module: DesignModule,

    /// Text that will be appended on confirmation
    pub text: String,

    pub word_count: usize,

    /// Set when the submitted draft exceeded the size band and was cut
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overflow: Option<SectionOverflow>,

    /// Text cut from the draft, offered as the next chunk after confirmation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remainder: Option<String>,

    /// True when this chunk continues an already confirmed section
    #[serde(default)]
    pub continuation: bool,
}

/// Outcome of confirming a pending section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionConfirmation {
    /// The module's section is complete
    Appended { module: DesignModule },

    /// The chunk was appended and the next chunk of the same module is pending
    Continued { next: PendingSection },
}

/// Request for a revised draft after a rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRequest {
    pub module: DesignModule,
    pub feedback: String,
}
