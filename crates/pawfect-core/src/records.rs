//! Records handed to a persistence gateway by the save action.

use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistStore;
use crate::heuristics::RatingStore;
use crate::model::UsabilityTestRecord;
use crate::test_log::TestLog;

/// Row for the `heuristic_evaluations` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicEvaluationRecord {
    pub evaluator_id: String,
    pub evaluator_name: String,
    pub heuristics: RatingStore,
    pub overall_notes: String,
}

/// Row for the `cognitive_walkthroughs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveWalkthroughRecord {
    pub evaluator_id: String,
    pub evaluator_name: String,
    pub tasks: ChecklistStore,
    pub overall_notes: String,
}

/// Row for the `usability_tests` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsabilityTestsRecord {
    pub evaluator_id: String,
    pub participant_info: ParticipantInfo,
    pub test_scenarios: Vec<String>,
    pub findings: Vec<UsabilityTestRecord>,
    pub overall_notes: String,
}

/// Summary of who took part in the logged sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub count: usize,
    pub participants: Vec<String>,
}

impl UsabilityTestsRecord {
    pub fn from_log(evaluator_id: &str, log: &TestLog, overall_notes: &str) -> Self {
        let participants: Vec<String> =
            log.participants().into_iter().map(str::to_string).collect();
        Self {
            evaluator_id: evaluator_id.to_string(),
            participant_info: ParticipantInfo {
                count: participants.len(),
                participants,
            },
            test_scenarios: log
                .scenarios()
                .into_iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            findings: log.records().to_vec(),
            overall_notes: overall_notes.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Scenario, TestDraft};

    #[test]
    fn usability_record_summarizes_log() {
        let mut log = TestLog::default();
        log.add(&mut TestDraft::new("P1", Scenario::ContactInquiry, "40"))
            .unwrap();
        log.add(&mut TestDraft::new("P1", Scenario::PetDiscovery, "20"))
            .unwrap();
        log.add(&mut TestDraft::new("P2", Scenario::ContactInquiry, "55"))
            .unwrap();

        let record = UsabilityTestsRecord::from_log("user-1", &log, "overall fine");
        assert_eq!(record.participant_info.count, 2);
        assert_eq!(record.participant_info.participants, vec!["P1", "P2"]);
        assert_eq!(
            record.test_scenarios,
            vec!["contact-inquiry", "pet-discovery"]
        );
        assert_eq!(record.findings.len(), 3);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["findings"][0]["timeToComplete"], "40");
        assert_eq!(value["participant_info"]["count"], 2);
    }
}
