//! Candidate solutions presented during solution proposal.

use serde::{Deserialize, Serialize};

/// A candidate solution with its trade-offs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Alternative {
    /// Short name of the approach
    pub title: String,

    /// One-paragraph description of the approach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default)]
    pub advantages: Vec<String>,

    #[serde(default)]
    pub disadvantages: Vec<String>,

    /// Situations in which this approach is the right choice
    #[serde(default)]
    pub applicable_scenarios: Vec<String>,

    /// Whether the proposer recommends this alternative
    #[serde(default)]
    pub recommended: bool,
}

impl Alternative {
    /// True when advantages, disadvantages and applicable scenarios are all
    /// filled in with non-blank entries.
    pub fn is_complete(&self) -> bool {
        let filled = |items: &[String]| items.iter().any(|item| !item.trim().is_empty());
        !self.title.trim().is_empty()
            && filled(&self.advantages)
            && filled(&self.disadvantages)
            && filled(&self.applicable_scenarios)
    }
}
