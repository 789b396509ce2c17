//! Acceptance gate: pure per-step acceptance predicates.
//!
//! [`evaluate`] never mutates a session. Each predicate is all-or-nothing; the
//! returned [`GateOutcome`] lists every unmet requirement so callers can
//! surface them together.

use std::collections::BTreeSet;

use crate::models::{DesignModule, Requirement, StepId, WorkflowSession};

/// Fewest alternatives a solution proposal may present.
pub const MIN_ALTERNATIVES: usize = 2;
/// Most alternatives a solution proposal may present.
pub const MAX_ALTERNATIVES: usize = 3;

/// Result of evaluating a step's acceptance criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub step: StepId,
    pub satisfied: bool,
    pub missing: BTreeSet<Requirement>,
}

impl GateOutcome {
    fn from_missing(step: StepId, missing: BTreeSet<Requirement>) -> Self {
        Self {
            step,
            satisfied: missing.is_empty(),
            missing,
        }
    }

    /// Missing requirement names, in stable order.
    pub fn missing_names(&self) -> Vec<String> {
        self.missing.iter().map(ToString::to_string).collect()
    }
}

/// Evaluate the acceptance criterion of `step` against a session.
pub fn evaluate(step: StepId, session: &WorkflowSession) -> GateOutcome {
    let missing = match step {
        StepId::Clarification => clarification_missing(session),
        StepId::SolutionProposal => solution_missing(session),
        StepId::PlanDrafting => outline_missing(session),
        StepId::DocumentGeneration => document_missing(session),
    };
    GateOutcome::from_missing(step, missing)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn clarification_missing(session: &WorkflowSession) -> BTreeSet<Requirement> {
    let clarification = session.clarification();
    let mut missing = BTreeSet::new();
    if is_blank(&clarification.purpose) {
        missing.insert(Requirement::Purpose);
    }
    if is_blank(&clarification.constraints) {
        missing.insert(Requirement::Constraints);
    }
    if is_blank(&clarification.success_criteria) {
        missing.insert(Requirement::SuccessCriteria);
    }
    if !clarification.no_ambiguity_confirmed {
        missing.insert(Requirement::Confirmation);
    }
    missing
}

fn solution_missing(session: &WorkflowSession) -> BTreeSet<Requirement> {
    let alternatives = session.alternatives();
    let mut missing = BTreeSet::new();

    if alternatives.len() < MIN_ALTERNATIVES {
        missing.insert(Requirement::InsufficientAlternatives);
    }
    if alternatives.len() > MAX_ALTERNATIVES {
        missing.insert(Requirement::TooManyAlternatives);
    }
    for (index, alternative) in alternatives.iter().enumerate() {
        if !alternative.is_complete() {
            missing.insert(Requirement::IncompleteAlternative(index + 1));
        }
    }
    if alternatives.iter().filter(|a| a.recommended).count() != 1 {
        missing.insert(Requirement::Recommendation);
    }
    if session.chosen_solution().is_none() {
        missing.insert(Requirement::Confirmation);
    }
    missing
}

fn outline_missing(session: &WorkflowSession) -> BTreeSet<Requirement> {
    let covered: BTreeSet<DesignModule> = session
        .outline()
        .map(|outline| outline.modules.iter().copied().collect())
        .unwrap_or_default();
    DesignModule::ALL
        .into_iter()
        .filter(|module| !covered.contains(module))
        .map(Requirement::Module)
        .collect()
}

fn document_missing(session: &WorkflowSession) -> BTreeSet<Requirement> {
    let completed: BTreeSet<DesignModule> = session.draft().completed_modules().collect();
    let mut missing: BTreeSet<Requirement> = DesignModule::ALL
        .into_iter()
        .filter(|module| !completed.contains(module))
        .map(Requirement::Module)
        .collect();
    if !session.artifact_path().is_some_and(|path| path.is_file()) {
        missing.insert(Requirement::Artifact);
    }
    missing
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{Alternative, ChosenSolution, Outline};

    fn session() -> WorkflowSession {
        WorkflowSession::new("Gate Test", date(2026, 2, 1), None)
    }

    fn alternative(title: &str, recommended: bool) -> Alternative {
        Alternative {
            title: title.to_string(),
            summary: None,
            advantages: vec!["fast".to_string()],
            disadvantages: vec!["complex".to_string()],
            applicable_scenarios: vec!["high load".to_string()],
            recommended,
        }
    }

    #[test]
    fn test_empty_clarification_misses_everything() {
        let outcome = evaluate(StepId::Clarification, &session());
        assert!(!outcome.satisfied);
        assert_eq!(
            outcome.missing_names(),
            vec!["purpose", "constraints", "success-criteria", "confirmation"]
        );
    }

    #[test]
    fn test_blank_answers_do_not_count() {
        let mut s = session();
        s.clarification.purpose = Some("   ".to_string());
        s.clarification.constraints = Some("none".to_string());
        s.clarification.success_criteria = Some("tests pass".to_string());
        s.clarification.no_ambiguity_confirmed = true;
        let outcome = evaluate(StepId::Clarification, &s);
        assert_eq!(outcome.missing_names(), vec!["purpose"]);
    }

    #[test]
    fn test_solution_requires_confirmation_and_single_recommendation() {
        let mut s = session();
        s.alternatives = vec![alternative("A", true), alternative("B", true)];
        let outcome = evaluate(StepId::SolutionProposal, &s);
        assert_eq!(outcome.missing_names(), vec!["recommendation", "confirmation"]);

        s.alternatives[1].recommended = false;
        s.chosen = Some(ChosenSolution {
            index: 0,
            revision: None,
            confirmed_at: jiff::Timestamp::now(),
        });
        assert!(evaluate(StepId::SolutionProposal, &s).satisfied);
    }

    #[test]
    fn test_incomplete_alternative_is_named_by_position() {
        let mut s = session();
        let mut second = alternative("B", false);
        second.applicable_scenarios.clear();
        s.alternatives = vec![alternative("A", true), second];
        let outcome = evaluate(StepId::SolutionProposal, &s);
        assert!(outcome
            .missing
            .contains(&Requirement::IncompleteAlternative(2)));
    }

    #[test]
    fn test_too_many_alternatives() {
        let mut s = session();
        s.alternatives = (0..4).map(|i| alternative(&i.to_string(), i == 0)).collect();
        let outcome = evaluate(StepId::SolutionProposal, &s);
        assert!(outcome.missing.contains(&Requirement::TooManyAlternatives));
    }

    #[test]
    fn test_outline_needs_all_five_modules() {
        let mut s = session();
        assert_eq!(evaluate(StepId::PlanDrafting, &s).missing.len(), 5);

        s.outline = Some(Outline {
            modules: DesignModule::ALL.to_vec(),
            notes: None,
        });
        assert!(evaluate(StepId::PlanDrafting, &s).satisfied);
    }

    #[test]
    fn test_document_requires_artifact() {
        let outcome = evaluate(StepId::DocumentGeneration, &session());
        assert!(outcome.missing.contains(&Requirement::Artifact));
        assert!(outcome
            .missing
            .contains(&Requirement::Module(DesignModule::Architecture)));
    }
}
