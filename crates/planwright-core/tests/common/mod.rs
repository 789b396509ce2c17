#![allow(dead_code)]

use planwright_core::{
    models::{Alternative, DesignModule},
    params::{
        ConfirmSection, ConfirmSolution, DraftOutline, Id, ProposeSection, ProposeSolutions,
        RecordClarification, StartSession,
    },
    Workflow, WorkflowBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test workflow whose project root is the temp dir
pub async fn create_test_workflow() -> (TempDir, Workflow) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let workflow = open_workflow(&temp_dir).await;
    (temp_dir, workflow)
}

/// Open another workflow over the same database and project root
pub async fn open_workflow(temp_dir: &TempDir) -> Workflow {
    WorkflowBuilder::new()
        .with_database_path(temp_dir.path().join("test.db"))
        .with_project_root(temp_dir.path())
        .build()
        .await
        .expect("Failed to create workflow")
}

pub fn alternative(title: &str, recommended: bool) -> Alternative {
    Alternative {
        title: title.to_string(),
        summary: Some(format!("{title} approach")),
        advantages: vec!["Few moving parts".to_string()],
        disadvantages: vec!["Higher latency".to_string()],
        applicable_scenarios: vec!["Batch workloads".to_string()],
        recommended,
    }
}

/// Section text of `count` words
pub fn words(count: usize) -> String {
    (0..count).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
}

pub async fn start_session(workflow: &Workflow, topic: &str) -> u64 {
    workflow
        .start_session(&StartSession {
            topic: topic.to_string(),
            task: None,
        })
        .await
        .expect("Failed to start session")
        .id()
}

pub async fn clarify(workflow: &Workflow, id: u64) {
    workflow
        .record_clarification(&RecordClarification {
            id,
            purpose: Some("Let finance export invoices".to_string()),
            constraints: Some("No writes to the ledger".to_string()),
            success_criteria: Some("Monthly reconciliation without manual steps".to_string()),
        })
        .await
        .expect("Failed to record clarification");
    workflow
        .confirm_clarification(&Id { id })
        .await
        .expect("Failed to confirm clarification");
}

pub async fn choose_solution(workflow: &Workflow, id: u64) {
    workflow
        .propose_solutions(&ProposeSolutions {
            id,
            alternatives: vec![alternative("Nightly batch", true), alternative("Streaming", false)],
        })
        .await
        .expect("Failed to propose solutions");
    workflow
        .confirm_solution(&ConfirmSolution {
            id,
            choice: 1,
            revision: None,
        })
        .await
        .expect("Failed to confirm solution");
}

pub async fn outline_all(workflow: &Workflow, id: u64) {
    workflow
        .draft_outline(&DraftOutline {
            id,
            modules: DesignModule::ALL.to_vec(),
            notes: Some("One section per module".to_string()),
        })
        .await
        .expect("Failed to draft outline");
}

pub async fn confirm_all_sections(workflow: &Workflow, id: u64) {
    for module in DesignModule::ALL {
        workflow
            .propose_section(&ProposeSection {
                id,
                module,
                text: words(240),
            })
            .await
            .expect("Failed to propose section");
        workflow
            .confirm_section(&ConfirmSection { id, module })
            .await
            .expect("Failed to confirm section");
    }
}

/// Drive a fresh session to the start of document generation
pub async fn session_at_document_generation(workflow: &Workflow, topic: &str) -> u64 {
    let id = start_session(workflow, topic).await;
    clarify(workflow, id).await;
    workflow.require_advance(&Id { id }).await.expect("step 1");
    choose_solution(workflow, id).await;
    workflow.require_advance(&Id { id }).await.expect("step 2");
    outline_all(workflow, id).await;
    workflow.require_advance(&Id { id }).await.expect("step 3");
    id
}
