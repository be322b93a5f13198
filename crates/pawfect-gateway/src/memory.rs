//! In-memory gateway for tests that need a sink without files or HTTP.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use pawfect_core::error::GatewayError;
use pawfect_core::records::{
    CognitiveWalkthroughRecord, HeuristicEvaluationRecord, UsabilityTestsRecord,
};
use pawfect_core::save::SaveStage;
use pawfect_core::traits::PersistenceGateway;

/// A row accepted by [`MemoryGateway`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoredRow {
    Heuristic(HeuristicEvaluationRecord),
    Walkthrough(CognitiveWalkthroughRecord),
    UsabilityTests(UsabilityTestsRecord),
}

impl StoredRow {
    pub fn stage(&self) -> SaveStage {
        match self {
            StoredRow::Heuristic(_) => SaveStage::HeuristicEvaluation,
            StoredRow::Walkthrough(_) => SaveStage::CognitiveWalkthrough,
            StoredRow::UsabilityTests(_) => SaveStage::UsabilityTests,
        }
    }
}

/// Keeps inserted rows in a vector. Individual stages can be made to fail.
#[derive(Default)]
pub struct MemoryGateway {
    rows: Mutex<Vec<StoredRow>>,
    failures: HashMap<&'static str, String>,
    latency: Option<Duration>,
    call_count: AtomicU32,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject inserts for `stage` with `message`.
    pub fn failing_on(mut self, stage: SaveStage, message: &str) -> Self {
        self.failures.insert(stage.table(), message.to_string());
        self
    }

    /// Delay every insert, so an in-flight save can be observed.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of insert attempts, including rejected ones.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Rows accepted so far, in insert order.
    pub fn rows(&self) -> Vec<StoredRow> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    async fn accept(&self, row: StoredRow) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let table = row.stage().table();
        if let Some(message) = self.failures.get(table) {
            return Err(GatewayError::Rejected {
                table: table.to_string(),
                status: 400,
                message: message.clone(),
            }
            .into());
        }

        let mut rows = self
            .rows
            .lock()
            .map_err(|_| anyhow::anyhow!("memory gateway lock poisoned"))?;
        rows.push(row);
        tracing::debug!(table, total = rows.len(), "row stored in memory");
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for MemoryGateway {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert_heuristic_evaluation(
        &self,
        record: &HeuristicEvaluationRecord,
    ) -> anyhow::Result<()> {
        self.accept(StoredRow::Heuristic(record.clone())).await
    }

    async fn insert_cognitive_walkthrough(
        &self,
        record: &CognitiveWalkthroughRecord,
    ) -> anyhow::Result<()> {
        self.accept(StoredRow::Walkthrough(record.clone())).await
    }

    async fn insert_usability_tests(&self, record: &UsabilityTestsRecord) -> anyhow::Result<()> {
        self.accept(StoredRow::UsabilityTests(record.clone())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pawfect_core::traits::Identity;

    use pawfect_core::heuristics::HeuristicChange;
    use pawfect_core::model::{HeuristicId, Rating, Scenario, TestDraft};
    use pawfect_core::save::{EvaluatorDetails, SaveError, Saver};
    use pawfect_core::EvaluationSession;

    fn session_with_test() -> EvaluationSession {
        let mut session = EvaluationSession::new();
        session.update_heuristic(
            HeuristicId::ConsistencyAndStandards,
            HeuristicChange::Rating(Rating::Excellent),
        );
        session
            .add_test_from(TestDraft::new("P1", Scenario::PetDiscovery, "45"))
            .unwrap();
        session
    }

    #[tokio::test]
    async fn stores_all_three_rows() {
        let gateway = Arc::new(MemoryGateway::new());
        let saver = Saver::new(gateway.clone());
        let identity = Identity::new("u-1", "ana@example.com");

        let report = saver
            .save(&session_with_test(), Some(&identity), &EvaluatorDetails::new("Ana"))
            .await
            .unwrap();

        assert_eq!(report.stages.len(), 3);
        let rows = gateway.rows();
        let stages: Vec<_> = rows.iter().map(StoredRow::stage).collect();
        assert_eq!(stages, report.stages);
        match &rows[0] {
            StoredRow::Heuristic(record) => {
                assert_eq!(record.evaluator_id, "u-1");
                let h4 = record.heuristics.get(HeuristicId::ConsistencyAndStandards);
                assert_eq!(h4.rating, Rating::Excellent);
            }
            other => panic!("unexpected first row: {other:?}"),
        }
    }

    #[tokio::test]
    async fn injected_failure_keeps_earlier_rows() {
        let gateway = Arc::new(
            MemoryGateway::new().failing_on(SaveStage::UsabilityTests, "quota exceeded"),
        );
        let saver = Saver::new(gateway.clone());
        let identity = Identity::new("u-1", "ana@example.com");

        let err = saver
            .save(&session_with_test(), Some(&identity), &EvaluatorDetails::new("Ana"))
            .await
            .unwrap_err();

        match &err {
            SaveError::Remote { stage, completed, .. } => {
                assert_eq!(*stage, SaveStage::UsabilityTests);
                assert_eq!(completed.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.notice().description, "quota exceeded");
        assert_eq!(gateway.rows().len(), 2);
        assert_eq!(gateway.call_count(), 3);
    }

    #[tokio::test]
    async fn second_save_is_refused_while_first_runs() {
        let gateway = Arc::new(MemoryGateway::new().with_latency(Duration::from_millis(50)));
        let saver = Saver::new(gateway.clone());
        let identity = Identity::new("u-1", "ana@example.com");
        let details = EvaluatorDetails::new("Ana");
        let session = session_with_test();

        let (first, second) = tokio::join!(
            saver.save(&session, Some(&identity), &details),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                assert!(saver.is_saving());
                saver.save(&session, Some(&identity), &details).await
            }
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(SaveError::InFlight)));
        assert!(!saver.is_saving());
        assert_eq!(gateway.rows().len(), 3);
    }
}
