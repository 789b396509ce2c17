//! Unmet acceptance requirements reported by the gate.

use std::fmt;

use super::DesignModule;

/// A single acceptance requirement that is not yet satisfied.
///
/// Rendered names are stable and intended for callers to match on, e.g.
/// `confirmation`, `insufficient-alternatives` or a module title such as
/// `Error Handling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Requirement {
    Purpose,
    Constraints,
    SuccessCriteria,
    /// Fewer than two alternatives were presented
    InsufficientAlternatives,
    /// More than three alternatives were presented
    TooManyAlternatives,
    /// Alternative at the given 1-based position lacks trade-off fields
    IncompleteAlternative(usize),
    /// Not exactly one alternative is marked recommended
    Recommendation,
    /// Explicit user confirmation has not been recorded
    Confirmation,
    /// A mandatory design module is absent from the outline or document
    Module(DesignModule),
    /// The design document has not been written to its canonical path
    Artifact,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Purpose => write!(f, "purpose"),
            Requirement::Constraints => write!(f, "constraints"),
            Requirement::SuccessCriteria => write!(f, "success-criteria"),
            Requirement::InsufficientAlternatives => write!(f, "insufficient-alternatives"),
            Requirement::TooManyAlternatives => write!(f, "too-many-alternatives"),
            Requirement::IncompleteAlternative(n) => write!(f, "incomplete-alternative-{n}"),
            Requirement::Recommendation => write!(f, "recommendation"),
            Requirement::Confirmation => write!(f, "confirmation"),
            Requirement::Module(module) => write!(f, "{}", module.title()),
            Requirement::Artifact => write!(f, "artifact"),
        }
    }
}
