mod common;

use std::fs;

use common::*;
use planwright_core::{
    models::{DesignModule, Requirement, SectionConfirmation, StepId, WorkflowState},
    params::{
        ConfirmSection, DraftOutline, Id, ListSessions, ProposeSection, ProposeSolutions,
        RecordClarification, RejectSection, StartSession,
    },
    AdvanceOutcome, WorkflowError,
};

fn missing_of(outcome: AdvanceOutcome) -> Vec<Requirement> {
    match outcome {
        AdvanceOutcome::Blocked { missing, .. } => missing.into_iter().collect(),
        other => panic!("Expected blocked outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn test_withheld_confirmation_keeps_step_one_open() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let id = start_session(&workflow, "Billing Export").await;

    workflow
        .record_clarification(&RecordClarification {
            id,
            purpose: Some("Export invoices".to_string()),
            constraints: Some("Read-only".to_string()),
            success_criteria: Some("Reconciled monthly".to_string()),
        })
        .await
        .expect("Failed to record clarification");

    let outcome = workflow.advance(&Id { id }).await.expect("advance failed");
    assert_eq!(missing_of(outcome), vec![Requirement::Confirmation]);

    let session = workflow.get_session(&Id { id }).await.unwrap().unwrap();
    assert_eq!(session.current_step(), StepId::Clarification);
}

#[tokio::test]
async fn test_single_alternative_is_insufficient() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let id = start_session(&workflow, "Billing Export").await;
    clarify(&workflow, id).await;
    workflow.require_advance(&Id { id }).await.unwrap();

    let gate = workflow
        .propose_solutions(&ProposeSolutions {
            id,
            alternatives: vec![alternative("Only option", true)],
        })
        .await
        .unwrap();
    assert!(!gate.satisfied);
    assert!(gate.missing.contains(&Requirement::InsufficientAlternatives));

    let outcome = workflow.advance(&Id { id }).await.unwrap();
    let missing = missing_of(outcome);
    assert!(missing.contains(&Requirement::InsufficientAlternatives));
    assert!(missing.contains(&Requirement::Confirmation));
}

#[tokio::test]
async fn test_alternative_rules() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let id = start_session(&workflow, "Billing Export").await;
    clarify(&workflow, id).await;
    workflow.require_advance(&Id { id }).await.unwrap();

    let mut incomplete = alternative("Half baked", false);
    incomplete.disadvantages.clear();
    let gate = workflow
        .propose_solutions(&ProposeSolutions {
            id,
            alternatives: vec![
                alternative("A", true),
                alternative("B", true),
                alternative("C", false),
                incomplete,
            ],
        })
        .await
        .unwrap();
    let names = gate.missing_names();
    assert!(names.contains(&"too-many-alternatives".to_string()));
    assert!(names.contains(&"incomplete-alternative-4".to_string()));
    assert!(names.contains(&"recommendation".to_string()));
}

#[tokio::test]
async fn test_outline_missing_error_handling() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let id = start_session(&workflow, "Billing Export").await;
    clarify(&workflow, id).await;
    workflow.require_advance(&Id { id }).await.unwrap();
    choose_solution(&workflow, id).await;
    workflow.require_advance(&Id { id }).await.unwrap();

    workflow
        .draft_outline(&DraftOutline {
            id,
            modules: vec![
                DesignModule::Architecture,
                DesignModule::Components,
                DesignModule::DataFlow,
                DesignModule::Testing,
            ],
            notes: None,
        })
        .await
        .unwrap();

    let outcome = workflow.advance(&Id { id }).await.unwrap();
    assert_eq!(
        missing_of(outcome),
        vec![Requirement::Module(DesignModule::ErrorHandling)]
    );
    assert_eq!(
        Requirement::Module(DesignModule::ErrorHandling).to_string(),
        "Error Handling"
    );
}

#[tokio::test]
async fn test_complete_run_produces_five_sections_in_order() {
    let (temp_dir, workflow) = create_test_workflow().await;
    let id = session_at_document_generation(&workflow, "Billing Export").await;
    confirm_all_sections(&workflow, id).await;

    let outcome = workflow.require_advance(&Id { id }).await.unwrap();
    let artifact = match outcome {
        AdvanceOutcome::Completed { artifact } => artifact,
        other => panic!("Expected completion, got {other:?}"),
    };

    let session = workflow.get_session(&Id { id }).await.unwrap().unwrap();
    assert_eq!(session.state(), WorkflowState::Completed);
    assert_eq!(
        artifact,
        temp_dir
            .path()
            .join("docs")
            .join("plans")
            .join(format!("{}-design.md", session.task_id()))
    );

    let document = fs::read_to_string(&artifact).unwrap();
    let headings: Vec<&str> = document.lines().filter(|l| l.starts_with("## ")).collect();
    assert_eq!(
        headings,
        vec![
            "## Architecture",
            "## Components",
            "## Data Flow",
            "## Error Handling",
            "## Testing"
        ]
    );
}

#[tokio::test]
async fn test_steps_never_go_backwards() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let id = start_session(&workflow, "Billing Export").await;
    let mut last = StepId::Clarification;

    clarify(&workflow, id).await;
    for _ in 0..3 {
        let _ = workflow.advance(&Id { id }).await.unwrap();
        let step = workflow.get_session(&Id { id }).await.unwrap().unwrap().current_step();
        assert!(step >= last);
        last = step;
    }
    assert_eq!(last, StepId::SolutionProposal);

    let result = workflow
        .record_clarification(&RecordClarification {
            id,
            purpose: Some("Changed my mind".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(
        result,
        Err(WorkflowError::StepOrderViolation {
            attempted: StepId::Clarification,
            current: StepId::SolutionProposal,
            ..
        })
    ));
}

#[tokio::test]
async fn test_repeated_advance_on_blocked_gate_is_idempotent() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let id = start_session(&workflow, "Billing Export").await;

    let first = workflow.advance(&Id { id }).await.unwrap();
    let snapshot = workflow.get_session(&Id { id }).await.unwrap().unwrap();
    let second = workflow.advance(&Id { id }).await.unwrap();
    let again = workflow.get_session(&Id { id }).await.unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(snapshot, again);
}

#[tokio::test]
async fn test_session_resumes_from_another_workflow() {
    let (temp_dir, workflow) = create_test_workflow().await;
    let id = start_session(&workflow, "Billing Export").await;
    clarify(&workflow, id).await;
    workflow.require_advance(&Id { id }).await.unwrap();
    drop(workflow);

    let resumed = open_workflow(&temp_dir).await;
    let session = resumed.get_session(&Id { id }).await.unwrap().unwrap();
    assert_eq!(session.state(), WorkflowState::SolutionPending);
    assert_eq!(
        session.clarification().purpose.as_deref(),
        Some("Let finance export invoices")
    );

    choose_solution(&resumed, id).await;
    let outcome = resumed.advance(&Id { id }).await.unwrap();
    assert_eq!(
        outcome,
        AdvanceOutcome::Advanced {
            from: StepId::SolutionProposal,
            to: StepId::PlanDrafting
        }
    );
}

#[tokio::test]
async fn test_sections_must_follow_canonical_order() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let id = session_at_document_generation(&workflow, "Billing Export").await;

    let result = workflow
        .propose_section(&ProposeSection {
            id,
            module: DesignModule::Components,
            text: words(220),
        })
        .await;
    assert!(matches!(
        result,
        Err(WorkflowError::SectionOutOfOrder {
            expected: DesignModule::Architecture,
            proposed: DesignModule::Components
        })
    ));
}

#[tokio::test]
async fn test_rejected_section_must_be_reproposed() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let id = session_at_document_generation(&workflow, "Billing Export").await;

    workflow
        .propose_section(&ProposeSection {
            id,
            module: DesignModule::Architecture,
            text: words(210),
        })
        .await
        .unwrap();
    let session = workflow.get_session(&Id { id }).await.unwrap().unwrap();
    assert_eq!(session.status().as_str(), "awaiting_confirmation");

    workflow
        .reject_section(&RejectSection {
            id,
            module: DesignModule::Architecture,
            feedback: "Too vague".to_string(),
        })
        .await
        .unwrap();

    let session = workflow.get_session(&Id { id }).await.unwrap().unwrap();
    assert!(session.sections().is_empty());
    assert!(session.pending_section().is_none());

    let confirm = workflow
        .confirm_section(&ConfirmSection {
            id,
            module: DesignModule::Architecture,
        })
        .await;
    assert!(matches!(confirm, Err(WorkflowError::NoPendingSection { .. })));
}

#[tokio::test]
async fn test_oversized_draft_is_split_into_continuations() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let id = session_at_document_generation(&workflow, "Billing Export").await;

    let pending = workflow
        .propose_section(&ProposeSection {
            id,
            module: DesignModule::Architecture,
            text: words(450),
        })
        .await
        .unwrap();
    assert_eq!(pending.word_count, 300);
    assert_eq!(pending.overflow.map(|o| o.word_count), Some(450));

    let confirmation = workflow
        .confirm_section(&ConfirmSection {
            id,
            module: DesignModule::Architecture,
        })
        .await
        .unwrap();
    let next = match confirmation {
        SectionConfirmation::Continued { next } => next,
        other => panic!("Expected continuation, got {other:?}"),
    };
    assert!(next.continuation);
    assert_eq!(next.word_count, 150);

    // The module is not complete until its continuation is confirmed
    let gate = workflow.evaluate(&Id { id }).await.unwrap();
    assert!(gate
        .missing
        .contains(&Requirement::Module(DesignModule::Architecture)));

    workflow
        .confirm_section(&ConfirmSection {
            id,
            module: DesignModule::Architecture,
        })
        .await
        .unwrap();
    let session = workflow.get_session(&Id { id }).await.unwrap().unwrap();
    assert_eq!(session.sections().len(), 1);
    assert!(session.sections()[0].complete);
    assert_eq!(
        session.sections()[0].body.split_whitespace().count(),
        450
    );
}

#[tokio::test]
async fn test_existing_document_is_not_overwritten() {
    let (temp_dir, workflow) = create_test_workflow().await;
    let id = session_at_document_generation(&workflow, "Billing Export").await;
    confirm_all_sections(&workflow, id).await;

    let session = workflow.get_session(&Id { id }).await.unwrap().unwrap();
    let plans = temp_dir.path().join("docs").join("plans");
    fs::create_dir_all(&plans).unwrap();
    let path = plans.join(format!("{}-design.md", session.task_id()));
    fs::write(&path, "hand written").unwrap();

    let result = workflow.advance(&Id { id }).await;
    assert!(matches!(result, Err(WorkflowError::PersistenceFailure { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "hand written");

    let session = workflow.get_session(&Id { id }).await.unwrap().unwrap();
    assert_eq!(session.state(), WorkflowState::DraftingPending);
    assert_eq!(session.sections().len(), 5);
}

#[tokio::test]
async fn test_task_context_is_merged_as_background() {
    let (temp_dir, workflow) = create_test_workflow().await;
    let tasks = temp_dir.path().join("docs").join("tasks");
    fs::create_dir_all(&tasks).unwrap();
    fs::write(tasks.join("billing-task.md"), "Finance needs CSV exports.\n").unwrap();

    let session = workflow
        .start_session(&StartSession {
            topic: "Billing Export".to_string(),
            task: Some("billing".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(session.background(), Some("Finance needs CSV exports.\n"));

    let without = workflow
        .start_session(&StartSession {
            topic: "Other".to_string(),
            task: Some("missing".to_string()),
        })
        .await
        .unwrap();
    assert!(without.background().is_none());
}

#[tokio::test]
async fn test_list_sessions_filters_closed() {
    let (_temp_dir, workflow) = create_test_workflow().await;
    let open = start_session(&workflow, "Open Topic").await;
    let aborted = start_session(&workflow, "Aborted Topic").await;
    workflow.abort(&Id { id: aborted }).await.unwrap();

    let listed = workflow
        .list_sessions(&ListSessions { include_closed: false })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), open);

    let all = workflow
        .list_sessions(&ListSessions { include_closed: true })
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}
