//! pawfect-core: Evaluation stores, progress, export and save orchestration.
//!
//! This crate defines the data model for the Pawfect HCI self-assessment
//! (heuristic ratings, cognitive walkthrough checklist, usability-test log),
//! the operations that mutate it, and the seams to the external persistence
//! gateway and identity provider.

pub mod catalog;
pub mod checklist;
pub mod error;
pub mod export;
pub mod forms;
pub mod heuristics;
pub mod model;
pub mod notice;
pub mod progress;
pub mod records;
pub mod save;
pub mod session;
pub mod test_log;
pub mod traits;

pub use error::{EvaluationError, GatewayError};
pub use export::{EvaluationSnapshot, ExportedDocument};
pub use session::EvaluationSession;
