//! The `pawfect step` command.

use std::path::Path;

use anyhow::Result;

use pawfect_core::checklist::StepChange;
use pawfect_core::model::StepId;

use crate::workspace;

pub fn execute(
    document: &Path,
    key: StepId,
    completed: Option<bool>,
    notes: Option<String>,
) -> Result<()> {
    let mut session = workspace::load_session(document)?;

    let mut changed = false;
    if let Some(completed) = completed {
        session.update_step(key, StepChange::Completed(completed));
        changed = true;
    }
    if let Some(notes) = notes {
        session.update_step(key, StepChange::Notes(notes));
        changed = true;
    }
    if changed {
        workspace::store_session(document, &session)?;
    }

    let step = session.steps().get(key);
    let task = key.task();
    println!(
        "Task {} ({}), step {}: {}",
        task.number(),
        task.title(),
        key.step_number(),
        key.title()
    );
    println!("  [{}] {key}", if step.completed { "x" } else { " " });
    if !step.notes.is_empty() {
        println!("  Notes: {}", step.notes);
    }
    println!("Walkthrough progress: {}%", session.step_progress());

    Ok(())
}
