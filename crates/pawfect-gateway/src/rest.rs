//! REST persistence gateway for a hosted Postgres backend.
//!
//! Rows are inserted with `POST {base_url}/rest/v1/{table}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use pawfect_core::error::GatewayError;
use pawfect_core::records::{
    CognitiveWalkthroughRecord, HeuristicEvaluationRecord, UsabilityTestsRecord,
};
use pawfect_core::save::SaveStage;
use pawfect_core::traits::PersistenceGateway;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Insert-only client for the evaluation tables.
pub struct RestGateway {
    base_url: String,
    api_key: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl RestGateway {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            access_token: None,
            client,
        }
    }

    /// Authenticate inserts as the signed-in user instead of the anonymous key.
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    #[instrument(skip(self, row), fields(table = table))]
    async fn insert<T: Serialize + Sync>(&self, table: &str, row: &T) -> anyhow::Result<()> {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);

        let response = self
            .client
            .post(format!("{}/rest/v1/{table}", self.base_url))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {bearer}"))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    GatewayError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status < 400 {
            tracing::debug!(status, "row inserted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = backend_message(&body);
        if status == 401 || status == 403 {
            return Err(GatewayError::Unauthorized(message).into());
        }
        Err(GatewayError::Rejected {
            table: table.to_string(),
            status,
            message,
        }
        .into())
    }
}

/// Error body returned by the backend's REST layer.
#[derive(Deserialize)]
struct BackendError {
    message: String,
}

/// The backend's `message` field, or the raw body when it is not JSON.
fn backend_message(body: &str) -> String {
    serde_json::from_str::<BackendError>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait]
impl PersistenceGateway for RestGateway {
    fn name(&self) -> &str {
        "rest"
    }

    async fn insert_heuristic_evaluation(
        &self,
        record: &HeuristicEvaluationRecord,
    ) -> anyhow::Result<()> {
        self.insert(SaveStage::HeuristicEvaluation.table(), record)
            .await
    }

    async fn insert_cognitive_walkthrough(
        &self,
        record: &CognitiveWalkthroughRecord,
    ) -> anyhow::Result<()> {
        self.insert(SaveStage::CognitiveWalkthrough.table(), record)
            .await
    }

    async fn insert_usability_tests(&self, record: &UsabilityTestsRecord) -> anyhow::Result<()> {
        self.insert(SaveStage::UsabilityTests.table(), record).await
    }
}
