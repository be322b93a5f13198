//! Seams to the external collaborators: the persistence gateway and the
//! identity provider.
//!
//! Implementations live in `pawfect-gateway`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::records::{
    CognitiveWalkthroughRecord, HeuristicEvaluationRecord, UsabilityTestsRecord,
};

// ---------------------------------------------------------------------------
// Persistence gateway
// ---------------------------------------------------------------------------

/// An insert-only remote sink for evaluation records.
///
/// Failures should carry a [`crate::error::GatewayError`] so callers can
/// surface the backend's own message.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Human-readable gateway name (e.g. "rest").
    fn name(&self) -> &str;

    async fn insert_heuristic_evaluation(
        &self,
        record: &HeuristicEvaluationRecord,
    ) -> anyhow::Result<()>;

    async fn insert_cognitive_walkthrough(
        &self,
        record: &CognitiveWalkthroughRecord,
    ) -> anyhow::Result<()>;

    async fn insert_usability_tests(&self, record: &UsabilityTestsRecord) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The signed-in user, as far as the evaluation recorder cares.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user identifier.
    pub id: String,
    /// Display label (usually the email address).
    pub label: String,
    /// Bearer token for the backend, when the provider issued one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Identity {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            access_token: None,
        }
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Sign-in, sign-up and sign-out against an external identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<Identity>;

    async fn sign_up(&self, email: &str, password: &str, full_name: &str)
        -> anyhow::Result<Identity>;

    async fn sign_out(&self, identity: &Identity) -> anyhow::Result<()>;
}
