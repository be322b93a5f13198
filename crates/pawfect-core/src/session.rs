//! The working evaluation owned by one user session.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::checklist::{ChecklistStore, StepChange};
use crate::error::EvaluationError;
use crate::export::{export, EvaluationSnapshot, ExportedDocument};
use crate::heuristics::{HeuristicChange, RatingStore};
use crate::model::{HeuristicId, StepId, TestDraft, UsabilityTestRecord};
use crate::progress::{Progress, ProgressSummary};
use crate::test_log::TestLog;

/// Heuristic ratings, walkthrough checklist, test log and the pending test
/// draft, mutated one event at a time.
#[derive(Debug, Clone, Default)]
pub struct EvaluationSession {
    heuristics: RatingStore,
    steps: ChecklistStore,
    tests: TestLog,
    draft: TestDraft,
}

impl EvaluationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously captured snapshot. The draft starts empty.
    pub fn from_snapshot(snapshot: EvaluationSnapshot) -> Self {
        Self {
            heuristics: snapshot.heuristics,
            steps: snapshot.cognitive_steps,
            tests: snapshot.usability_tests,
            draft: TestDraft::default(),
        }
    }

    pub fn heuristics(&self) -> &RatingStore {
        &self.heuristics
    }

    pub fn steps(&self) -> &ChecklistStore {
        &self.steps
    }

    pub fn tests(&self) -> &TestLog {
        &self.tests
    }

    pub fn draft(&self) -> &TestDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut TestDraft {
        &mut self.draft
    }

    pub fn update_heuristic(&mut self, id: HeuristicId, change: HeuristicChange) {
        self.heuristics.update(id, change);
    }

    pub fn update_step(&mut self, id: StepId, change: StepChange) {
        self.steps.update(id, change);
    }

    /// Log the current draft as a usability test.
    pub fn add_test(&mut self) -> Result<&UsabilityTestRecord, EvaluationError> {
        self.tests.add(&mut self.draft)
    }

    /// Replace the draft with `draft` and log it.
    pub fn add_test_from(
        &mut self,
        draft: TestDraft,
    ) -> Result<&UsabilityTestRecord, EvaluationError> {
        self.draft = draft;
        self.add_test()
    }

    pub fn remove_test(&mut self, id: &str) -> Option<UsabilityTestRecord> {
        self.tests.remove(id)
    }

    pub fn heuristic_progress(&self) -> u8 {
        self.heuristics.percent()
    }

    pub fn step_progress(&self) -> u8 {
        self.steps.percent()
    }

    pub fn progress(&self) -> ProgressSummary {
        ProgressSummary {
            heuristics_done: self.heuristics.done(),
            heuristics_percent: self.heuristics.percent(),
            steps_done: self.steps.done(),
            steps_percent: self.steps.percent(),
            tests_logged: self.tests.len(),
            tests_succeeded: self.tests.success_count(),
        }
    }

    pub fn snapshot(&self) -> EvaluationSnapshot {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, timestamp: DateTime<Utc>) -> EvaluationSnapshot {
        EvaluationSnapshot {
            heuristics: self.heuristics.clone(),
            cognitive_steps: self.steps.clone(),
            usability_tests: self.tests.clone(),
            timestamp,
        }
    }

    /// Serialize the current state for download.
    pub fn export(&self) -> Result<ExportedDocument> {
        export(&self.snapshot())
    }
}
