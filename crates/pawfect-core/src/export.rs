//! Evaluation snapshots and their JSON export document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistStore;
use crate::heuristics::RatingStore;
use crate::test_log::TestLog;

/// Read-only copy of all three stores at a point in time.
///
/// This is also the shape of the exported document:
/// `{heuristics, cognitiveSteps, usabilityTests, timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSnapshot {
    pub heuristics: RatingStore,
    pub cognitive_steps: ChecklistStore,
    pub usability_tests: TestLog,
    /// When the snapshot was captured.
    pub timestamp: DateTime<Utc>,
}

/// A serialized snapshot ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// `pawfect-evaluation-<YYYY-MM-DD>.json`
    pub file_name: String,
    pub contents: String,
}

impl EvaluationSnapshot {
    /// Download name derived from the capture date.
    pub fn file_name(&self) -> String {
        format!(
            "pawfect-evaluation-{}.json",
            self.timestamp.format("%Y-%m-%d")
        )
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize evaluation")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse evaluation JSON")
    }

    /// Save the snapshot as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write evaluation to {}", path.display()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read evaluation from {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("invalid evaluation document: {}", path.display()))
    }
}

/// Materialize a snapshot as a downloadable document.
pub fn export(snapshot: &EvaluationSnapshot) -> Result<ExportedDocument> {
    Ok(ExportedDocument {
        file_name: snapshot.file_name(),
        contents: snapshot.to_json()?,
    })
}

impl ExportedDocument {
    /// Write the document into `dir` under its download name.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "evaluation exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeuristicId, Rating, Scenario, StepId, TestDraft};
    use chrono::TimeZone;

    fn sample() -> EvaluationSnapshot {
        let mut heuristics = RatingStore::default();
        heuristics.set_rating(HeuristicId::ErrorPrevention, Rating::Poor);
        heuristics.set_checked(HeuristicId::ErrorPrevention, true);

        let mut steps = ChecklistStore::default();
        steps.set_completed(StepId::Task2Step1, true);
        steps.set_notes(StepId::Task2Step1, "nav link found instantly");

        let mut tests = TestLog::default();
        tests
            .add(&mut TestDraft::new("P1", Scenario::PetDiscovery, "30").with_clicks(2))
            .unwrap();
        tests
            .add(&mut TestDraft::new("P2", Scenario::ContactInquiry, "75"))
            .unwrap();

        EvaluationSnapshot {
            heuristics,
            cognitive_steps: steps,
            usability_tests: tests,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn file_name_uses_capture_date() {
        assert_eq!(sample().file_name(), "pawfect-evaluation-2026-03-14.json");
    }

    #[test]
    fn document_has_expected_top_level_keys() {
        let doc = export(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc.contents).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        for key in ["heuristics", "cognitiveSteps", "usabilityTests", "timestamp"] {
            assert!(keys.contains(&key.to_string()), "missing {key}");
        }
        assert_eq!(value["timestamp"], "2026-03-14T09:30:00Z");
        assert_eq!(value["heuristics"]["5"]["rating"], "poor");
        assert_eq!(value["cognitiveSteps"]["task2-1"]["completed"], true);
    }

    #[test]
    fn export_parse_round_trip_preserves_order() {
        let snapshot = sample();
        let doc = export(&snapshot).unwrap();
        let parsed = EvaluationSnapshot::from_json(&doc.contents).unwrap();
        assert_eq!(parsed, snapshot);
        let participants: Vec<_> = parsed
            .usability_tests
            .iter()
            .map(|r| r.participant.as_str())
            .collect();
        assert_eq!(participants, vec!["P1", "P2"]);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("eval.json");
        let snapshot = sample();
        snapshot.save_json(&path).unwrap();
        let loaded = EvaluationSnapshot::load_json(&path).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn write_to_dir_uses_download_name() {
        let dir = tempfile::tempdir().unwrap();
        let doc = export(&sample()).unwrap();
        let path = doc.write_to_dir(dir.path()).unwrap();
        assert!(path.ends_with("pawfect-evaluation-2026-03-14.json"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), doc.contents);
    }

    #[test]
    fn load_rejects_incomplete_document() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["cognitiveSteps"]
            .as_object_mut()
            .unwrap()
            .remove("task1-1");
        assert!(EvaluationSnapshot::from_json(&value.to_string()).is_err());
    }
}
