//! The "save evaluation" action.
//!
//! Checks the preconditions, then inserts the heuristic evaluation, the
//! cognitive walkthrough and (when any tests are logged) the usability tests,
//! in that order. The first failure stops the sequence. Inserts that already
//! went through are not rolled back.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::error::GatewayError;
use crate::notice::Notice;
use crate::records::{
    CognitiveWalkthroughRecord, HeuristicEvaluationRecord, UsabilityTestsRecord,
};
use crate::session::EvaluationSession;
use crate::traits::{Identity, PersistenceGateway};

/// Where the caller is sent when a save needs a signed-in user.
pub const LOGIN_ROUTE: &str = "/login";

/// Shown when a remote failure carries no message of its own.
pub const GENERIC_SAVE_FAILURE: &str = "Failed to save evaluation. Please try again.";

/// One insert in the save sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStage {
    HeuristicEvaluation,
    CognitiveWalkthrough,
    UsabilityTests,
}

impl SaveStage {
    /// Backend table the stage inserts into.
    pub fn table(self) -> &'static str {
        match self {
            SaveStage::HeuristicEvaluation => "heuristic_evaluations",
            SaveStage::CognitiveWalkthrough => "cognitive_walkthroughs",
            SaveStage::UsabilityTests => "usability_tests",
        }
    }
}

impl fmt::Display for SaveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStage::HeuristicEvaluation => write!(f, "heuristic evaluation"),
            SaveStage::CognitiveWalkthrough => write!(f, "cognitive walkthrough"),
            SaveStage::UsabilityTests => write!(f, "usability tests"),
        }
    }
}

/// Who is saving, and their closing remarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluatorDetails {
    pub evaluator_name: String,
    pub overall_notes: String,
}

impl EvaluatorDetails {
    pub fn new(evaluator_name: &str) -> Self {
        Self {
            evaluator_name: evaluator_name.to_string(),
            overall_notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.overall_notes = notes.to_string();
        self
    }
}

/// Why a save did not complete.
#[derive(Debug, Error)]
pub enum SaveError {
    /// No identity present; the caller should redirect to [`LOGIN_ROUTE`].
    #[error("Please log in to save evaluations")]
    NotAuthenticated,

    #[error("Please enter evaluator name")]
    MissingEvaluatorName,

    /// Another save is still running.
    #[error("A save is already in progress")]
    InFlight,

    /// An insert failed. `completed` lists the inserts that went through
    /// before it.
    #[error("failed to save {stage}: {source:#}")]
    Remote {
        stage: SaveStage,
        completed: Vec<SaveStage>,
        source: anyhow::Error,
    },
}

impl SaveError {
    /// Route to redirect to, if the failure calls for one.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            SaveError::NotAuthenticated => Some(LOGIN_ROUTE),
            _ => None,
        }
    }

    /// The backend's own message for a remote failure, if it sent one.
    pub fn sink_message(&self) -> Option<&str> {
        match self {
            SaveError::Remote { source, .. } => source
                .downcast_ref::<GatewayError>()
                .and_then(GatewayError::sink_message),
            _ => None,
        }
    }

    /// The notice to show for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            SaveError::NotAuthenticated => {
                Notice::destructive("Authentication Required", self.to_string())
            }
            SaveError::Remote { .. } => {
                Notice::error(self.sink_message().unwrap_or(GENERIC_SAVE_FAILURE))
            }
            _ => Notice::error(self.to_string()),
        }
    }
}

/// Result of a completed save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Inserts performed, in order.
    pub stages: Vec<SaveStage>,
}

impl SaveReport {
    pub fn notice(&self) -> Notice {
        Notice::success("Success!", "Evaluation saved successfully")
    }
}

/// Runs saves against a gateway, one at a time.
pub struct Saver {
    gateway: Arc<dyn PersistenceGateway>,
    in_flight: AtomicBool,
}

/// Clears the busy flag when the save ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Saver {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a save is running; the save control should be disabled.
    pub fn is_saving(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Save the session's stores through the gateway.
    pub async fn save(
        &self,
        session: &EvaluationSession,
        identity: Option<&Identity>,
        details: &EvaluatorDetails,
    ) -> Result<SaveReport, SaveError> {
        let Some(identity) = identity else {
            tracing::warn!("save refused: no signed-in user");
            return Err(SaveError::NotAuthenticated);
        };
        let evaluator_name = details.evaluator_name.trim();
        if evaluator_name.is_empty() {
            tracing::warn!("save refused: evaluator name is empty");
            return Err(SaveError::MissingEvaluatorName);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SaveError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        // Records are built up front so the stores are read once.
        let heuristics = HeuristicEvaluationRecord {
            evaluator_id: identity.id.clone(),
            evaluator_name: evaluator_name.to_string(),
            heuristics: session.heuristics().clone(),
            overall_notes: details.overall_notes.clone(),
        };
        let walkthrough = CognitiveWalkthroughRecord {
            evaluator_id: identity.id.clone(),
            evaluator_name: evaluator_name.to_string(),
            tasks: session.steps().clone(),
            overall_notes: details.overall_notes.clone(),
        };
        let usability = (!session.tests().is_empty()).then(|| {
            UsabilityTestsRecord::from_log(&identity.id, session.tests(), &details.overall_notes)
        });

        tracing::info!(
            gateway = self.gateway.name(),
            evaluator = %identity.id,
            tests = session.tests().len(),
            "saving evaluation"
        );

        let mut stages = Vec::with_capacity(3);

        self.gateway
            .insert_heuristic_evaluation(&heuristics)
            .await
            .map_err(|e| remote_failure(SaveStage::HeuristicEvaluation, &stages, e))?;
        stages.push(SaveStage::HeuristicEvaluation);

        self.gateway
            .insert_cognitive_walkthrough(&walkthrough)
            .await
            .map_err(|e| remote_failure(SaveStage::CognitiveWalkthrough, &stages, e))?;
        stages.push(SaveStage::CognitiveWalkthrough);

        if let Some(usability) = &usability {
            self.gateway
                .insert_usability_tests(usability)
                .await
                .map_err(|e| remote_failure(SaveStage::UsabilityTests, &stages, e))?;
            stages.push(SaveStage::UsabilityTests);
        }

        tracing::info!(inserts = stages.len(), "evaluation saved");
        Ok(SaveReport { stages })
    }
}

fn remote_failure(stage: SaveStage, completed: &[SaveStage], source: anyhow::Error) -> SaveError {
    tracing::warn!(%stage, table = stage.table(), "insert failed: {source:#}");
    SaveError::Remote {
        stage,
        completed: completed.to_vec(),
        source,
    }
}
