//! Cognitive walkthrough checklist store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::model::{CognitiveStep, StepId, WalkthroughTask};

/// A single-field edit to a walkthrough step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepChange {
    Completed(bool),
    Notes(String),
}

/// Completion state for all twelve walkthrough steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<StepId, CognitiveStep>",
    try_from = "BTreeMap<StepId, CognitiveStep>"
)]
pub struct ChecklistStore {
    steps: [CognitiveStep; StepId::COUNT],
}

impl Default for ChecklistStore {
    fn default() -> Self {
        Self {
            steps: StepId::ALL.map(CognitiveStep::seeded),
        }
    }
}

impl ChecklistStore {
    pub fn update(&mut self, id: StepId, change: StepChange) {
        let step = &mut self.steps[id.index()];
        match change {
            StepChange::Completed(completed) => step.completed = completed,
            StepChange::Notes(notes) => step.notes = notes,
        }
    }

    pub fn set_completed(&mut self, id: StepId, completed: bool) {
        self.update(id, StepChange::Completed(completed));
    }

    pub fn set_notes(&mut self, id: StepId, notes: impl Into<String>) {
        self.update(id, StepChange::Notes(notes.into()));
    }

    pub fn get(&self, id: StepId) -> &CognitiveStep {
        &self.steps[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CognitiveStep> {
        self.steps.iter()
    }

    /// Steps belonging to one task, in order.
    pub fn task(&self, task: WalkthroughTask) -> impl Iterator<Item = &CognitiveStep> {
        task.steps().iter().map(move |id| self.get(*id))
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }
}

impl From<ChecklistStore> for BTreeMap<StepId, CognitiveStep> {
    fn from(store: ChecklistStore) -> Self {
        store.steps.into_iter().map(|s| (s.id, s)).collect()
    }
}

impl TryFrom<BTreeMap<StepId, CognitiveStep>> for ChecklistStore {
    type Error = EvaluationError;

    fn try_from(mut map: BTreeMap<StepId, CognitiveStep>) -> Result<Self, Self::Error> {
        let mut store = ChecklistStore::default();
        for id in StepId::ALL {
            let step = map
                .remove(&id)
                .ok_or_else(|| EvaluationError::MissingStep(id.key()))?;
            if step.id != id {
                return Err(EvaluationError::MismatchedKey {
                    key: id.key(),
                    id: step.id.key(),
                });
            }
            store.steps[id.index()] = step;
        }
        Ok(store)
    }
}
