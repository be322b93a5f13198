//! The `pawfect heuristic` command.

use std::path::Path;

use anyhow::Result;

use pawfect_core::heuristics::HeuristicChange;
use pawfect_core::model::{HeuristicId, Rating};

use crate::workspace;

pub fn execute(
    document: &Path,
    id: HeuristicId,
    rating: Option<Rating>,
    notes: Option<String>,
    checked: Option<bool>,
) -> Result<()> {
    let mut session = workspace::load_session(document)?;

    let changes: Vec<HeuristicChange> = [
        rating.map(HeuristicChange::Rating),
        notes.map(HeuristicChange::Notes),
        checked.map(HeuristicChange::Checked),
    ]
    .into_iter()
    .flatten()
    .collect();

    let changed = !changes.is_empty();
    for change in changes {
        session.update_heuristic(id, change);
    }
    if changed {
        workspace::store_session(document, &session)?;
    }

    let entry = session.heuristics().get(id);
    println!("{}. {}", id.number(), id.title());
    println!("  Rating:   {}", entry.rating.label());
    println!("  Reviewed: {}", if entry.checked { "yes" } else { "no" });
    if !entry.notes.is_empty() {
        println!("  Notes:    {}", entry.notes);
    }
    println!("Heuristic progress: {}%", session.heuristic_progress());

    Ok(())
}
