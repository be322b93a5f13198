//! Usability test log.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EvaluationError;
use crate::model::{Scenario, TestDraft, UsabilityTestRecord};

/// Ordered collection of usability-test records.
///
/// Insertion order is display order. Record ids are unique within a log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "Vec<UsabilityTestRecord>",
    try_from = "Vec<UsabilityTestRecord>"
)]
pub struct TestLog {
    records: Vec<UsabilityTestRecord>,
}

impl TestLog {
    /// Log a new record from the draft.
    ///
    /// On success the draft is reset to its defaults. On a validation error
    /// neither the log nor the draft changes.
    pub fn add(&mut self, draft: &mut TestDraft) -> Result<&UsabilityTestRecord, EvaluationError> {
        if draft.participant.trim().is_empty() {
            return Err(EvaluationError::EmptyParticipant);
        }
        if draft.time_to_complete.trim().is_empty() {
            return Err(EvaluationError::EmptyTimeToComplete);
        }

        let draft = std::mem::take(draft);
        let record = UsabilityTestRecord {
            id: self.fresh_id(),
            participant: draft.participant,
            scenario: draft.scenario,
            time_to_complete: draft.time_to_complete,
            clicks: draft.clicks,
            success: draft.success,
            notes: draft.notes,
        };
        tracing::debug!(
            id = %record.id,
            participant = %record.participant,
            "usability test logged"
        );
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Remove the record with this id. Absent ids are ignored.
    pub fn remove(&mut self, id: &str) -> Option<UsabilityTestRecord> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(pos))
    }

    pub fn records(&self) -> &[UsabilityTestRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&UsabilityTestRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UsabilityTestRecord> {
        self.records.iter()
    }

    /// Distinct scenarios in the order they were first logged.
    pub fn scenarios(&self) -> Vec<Scenario> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.scenario) {
                seen.push(record.scenario);
            }
        }
        seen
    }

    /// Distinct participant names in the order they were first logged.
    pub fn participants(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.participant.as_str()) {
                seen.push(&record.participant);
            }
        }
        seen
    }

    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.success).count()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl From<TestLog> for Vec<UsabilityTestRecord> {
    fn from(log: TestLog) -> Self {
        log.records
    }
}

impl TryFrom<Vec<UsabilityTestRecord>> for TestLog {
    type Error = EvaluationError;

    fn try_from(records: Vec<UsabilityTestRecord>) -> Result<Self, Self::Error> {
        let mut ids = HashSet::new();
        for record in &records {
            if !ids.insert(record.id.as_str()) {
                return Err(EvaluationError::DuplicateTestId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }
}
