//! The working evaluation document and the stored sign-in.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pawfect_core::traits::Identity;
use pawfect_core::{EvaluationSession, EvaluationSnapshot};

pub const DEFAULT_DOCUMENT: &str = "pawfect-evaluation.json";

const IDENTITY_DIR: &str = ".pawfect";

/// Load the session from `path`, or start a fresh one when it does not exist.
pub fn load_session(path: &Path) -> Result<EvaluationSession> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no evaluation document yet, starting fresh");
        return Ok(EvaluationSession::new());
    }
    let snapshot = EvaluationSnapshot::load_json(path)?;
    Ok(EvaluationSession::from_snapshot(snapshot))
}

pub fn store_session(path: &Path, session: &EvaluationSession) -> Result<()> {
    session.snapshot().save_json(path)
}

fn identity_path() -> PathBuf {
    PathBuf::from(IDENTITY_DIR).join("identity.json")
}

/// The signed-in user, if any.
pub fn load_identity() -> Result<Option<Identity>> {
    let path = identity_path();
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let identity = serde_json::from_str(&content)
        .with_context(|| format!("invalid identity file: {}", path.display()))?;
    Ok(Some(identity))
}

pub fn store_identity(identity: &Identity) -> Result<()> {
    let path = identity_path();
    std::fs::create_dir_all(IDENTITY_DIR)?;
    std::fs::write(&path, serde_json::to_string_pretty(identity)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Forget the stored identity, returning it.
pub fn clear_identity() -> Result<Option<Identity>> {
    let identity = load_identity()?;
    if identity.is_some() {
        std::fs::remove_file(identity_path())?;
    }
    Ok(identity)
}
