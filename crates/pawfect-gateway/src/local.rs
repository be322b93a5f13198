//! File-backed gateway and identity provider for working without a backend.
//!
//! Every accepted row is appended as one JSON line to `<dir>/<table>.jsonl`.
//! Accounts created with `sign_up` are kept in `<dir>/accounts.json`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use pawfect_core::records::{
    CognitiveWalkthroughRecord, HeuristicEvaluationRecord, UsabilityTestsRecord,
};
use pawfect_core::save::SaveStage;
use pawfect_core::traits::{Identity, IdentityProvider, PersistenceGateway};

use crate::error::AuthError;

const ACCOUNTS_FILE: &str = "accounts.json";

/// A stored row: the record plus the time it was written.
#[derive(Serialize)]
struct LocalRow<'a, T> {
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    record: &'a T,
}

/// Appends rows to JSON-lines files, one file per table.
#[derive(Debug, Clone)]
pub struct LocalGateway {
    dir: PathBuf,
}

impl LocalGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File holding the rows for `stage`.
    pub fn table_path(&self, stage: SaveStage) -> PathBuf {
        self.dir.join(format!("{}.jsonl", stage.table()))
    }

    async fn append<T: Serialize + Sync>(
        &self,
        stage: SaveStage,
        record: &T,
    ) -> anyhow::Result<()> {
        let row = LocalRow {
            created_at: Utc::now(),
            record,
        };
        let mut line = serde_json::to_string(&row)?;
        line.push('\n');

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            anyhow::anyhow!("failed to create {}: {e}", self.dir.display())
        })?;
        let path = self.table_path(stage);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| anyhow::anyhow!("failed to open {}: {e}", path.display()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
        file.flush().await?;

        tracing::debug!(table = stage.table(), path = %path.display(), "row appended");
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for LocalGateway {
    fn name(&self) -> &str {
        "local"
    }

    async fn insert_heuristic_evaluation(
        &self,
        record: &HeuristicEvaluationRecord,
    ) -> anyhow::Result<()> {
        self.append(SaveStage::HeuristicEvaluation, record).await
    }

    async fn insert_cognitive_walkthrough(
        &self,
        record: &CognitiveWalkthroughRecord,
    ) -> anyhow::Result<()> {
        self.append(SaveStage::CognitiveWalkthrough, record).await
    }

    async fn insert_usability_tests(&self, record: &UsabilityTestsRecord) -> anyhow::Result<()> {
        self.append(SaveStage::UsabilityTests, record).await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocalAccount {
    id: String,
    email: String,
    full_name: String,
    created_at: DateTime<Utc>,
}

/// Accounts registered on this machine.
///
/// Passwords are not stored, so signing in only checks that the email was
/// registered with `sign_up` first.
#[derive(Debug, Clone)]
pub struct LocalIdentity {
    accounts_path: PathBuf,
}

impl LocalIdentity {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            accounts_path: dir.as_ref().join(ACCOUNTS_FILE),
        }
    }

    async fn accounts(&self) -> anyhow::Result<Vec<LocalAccount>> {
        match tokio::fs::read_to_string(&self.accounts_path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                anyhow::anyhow!("invalid accounts file {}: {e}", self.accounts_path.display())
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(anyhow::anyhow!(
                "failed to read {}: {e}",
                self.accounts_path.display()
            )),
        }
    }

    async fn store_accounts(&self, accounts: &[LocalAccount]) -> anyhow::Result<()> {
        if let Some(parent) = self.accounts_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.accounts_path, serde_json::to_string_pretty(accounts)?)
            .await
            .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", self.accounts_path.display()))
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<Identity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials("Invalid login credentials".into()).into());
        }
        let accounts = self.accounts().await?;
        let account = accounts
            .iter()
            .find(|a| same_email(&a.email, email))
            .ok_or_else(|| AuthError::InvalidCredentials("Invalid login credentials".into()))?;

        tracing::info!(user = %account.id, "signed in locally");
        Ok(Identity::new(&account.id, &account.email))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> anyhow::Result<Identity> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(
                AuthError::InvalidCredentials("Email and password are required".into()).into(),
            );
        }
        let mut accounts = self.accounts().await?;
        if accounts.iter().any(|a| same_email(&a.email, email)) {
            return Err(AuthError::InvalidCredentials("User already registered".into()).into());
        }

        let account = LocalAccount {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
            full_name: full_name.to_string(),
            created_at: Utc::now(),
        };
        let identity = Identity::new(&account.id, &account.email);
        accounts.push(account);
        self.store_accounts(&accounts).await?;

        tracing::info!(user = %identity.id, "local account created");
        Ok(identity)
    }

    async fn sign_out(&self, _identity: &Identity) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pawfect_core::heuristics::HeuristicChange;
    use pawfect_core::model::{HeuristicId, Rating, Scenario, TestDraft};
    use pawfect_core::save::{EvaluatorDetails, SaveError, Saver};
    use pawfect_core::EvaluationSession;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn save_appends_one_line_per_table() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(LocalGateway::new(dir.path().join("saved")));
        let saver = Saver::new(gateway.clone());
        let identity = Identity::new("u-1", "ana@example.com");

        let mut session = EvaluationSession::new();
        session.update_heuristic(
            HeuristicId::ConsistencyAndStandards,
            HeuristicChange::Rating(Rating::Excellent),
        );
        session
            .add_test_from(TestDraft::new("P1", Scenario::PetDiscovery, "45"))
            .unwrap();
        let details = EvaluatorDetails::new("Ana").with_notes("first pass");

        saver.save(&session, Some(&identity), &details).await.unwrap();
        saver.save(&session, Some(&identity), &details).await.unwrap();

        let heuristics = read_lines(&gateway.table_path(SaveStage::HeuristicEvaluation));
        assert_eq!(heuristics.len(), 2);
        assert_eq!(heuristics[0]["evaluator_id"], "u-1");
        assert_eq!(heuristics[0]["evaluator_name"], "Ana");
        assert_eq!(heuristics[0]["overall_notes"], "first pass");
        assert_eq!(heuristics[0]["heuristics"]["4"]["rating"], "excellent");
        assert!(heuristics[0]["created_at"].is_string());

        assert_eq!(
            read_lines(&gateway.table_path(SaveStage::CognitiveWalkthrough)).len(),
            2
        );
        let tests = read_lines(&gateway.table_path(SaveStage::UsabilityTests));
        assert_eq!(tests.len(), 2);
        assert_eq!(tests[0]["participant_info"]["count"], 1);
        assert_eq!(tests[0]["findings"][0]["participant"], "P1");
    }

    #[tokio::test]
    async fn unwritable_dir_fails_the_save() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("saved");
        std::fs::write(&blocker, "not a directory").unwrap();
        let saver = Saver::new(Arc::new(LocalGateway::new(&blocker)));
        let identity = Identity::new("u-1", "ana@example.com");

        let err = saver
            .save(
                &EvaluationSession::new(),
                Some(&identity),
                &EvaluatorDetails::new("Ana"),
            )
            .await
            .unwrap_err();

        match &err {
            SaveError::Remote {
                stage,
                completed,
                source,
            } => {
                assert_eq!(*stage, SaveStage::HeuristicEvaluation);
                assert!(completed.is_empty());
                assert!(source.to_string().contains("failed to create"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!saver.is_saving());
    }

    #[tokio::test]
    async fn sign_in_requires_a_registered_account() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalIdentity::new(dir.path());

        let err = provider
            .sign_in("ana@example.com", "hunter22")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");

        let created = provider
            .sign_up("ana@example.com", "hunter22", "Ana Lima")
            .await
            .unwrap();
        let signed_in = provider.sign_in("Ana@Example.com", "pw").await.unwrap();
        assert_eq!(signed_in.id, created.id);
        assert_eq!(signed_in.label, "ana@example.com");
        assert!(signed_in.access_token.is_none());

        assert!(provider.sign_in("ana@example.com", "").await.is_err());
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalIdentity::new(dir.path());

        provider
            .sign_up("ana@example.com", "hunter22", "Ana")
            .await
            .unwrap();
        let err = provider
            .sign_up("ANA@example.com", "hunter22", "Ana")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already registered");

        let accounts: Vec<serde_json::Value> = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(ACCOUNTS_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0]["full_name"], "Ana");
        assert!(accounts[0].get("password").is_none());
    }
}
