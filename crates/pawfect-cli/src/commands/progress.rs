//! The `pawfect progress` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use pawfect_core::model::{HeuristicId, StepId};

use crate::workspace;

pub fn execute(document: &Path) -> Result<()> {
    let session = workspace::load_session(document)?;
    let summary = session.progress();

    let mut table = Table::new();
    table.set_header(vec!["Section", "Done", "Progress"]);
    table.add_row(vec![
        Cell::new("Heuristic evaluation"),
        Cell::new(format!("{}/{}", summary.heuristics_done, HeuristicId::COUNT)),
        Cell::new(format!("{}%", summary.heuristics_percent)),
    ]);
    table.add_row(vec![
        Cell::new("Cognitive walkthrough"),
        Cell::new(format!("{}/{}", summary.steps_done, StepId::COUNT)),
        Cell::new(format!("{}%", summary.steps_percent)),
    ]);
    table.add_row(vec![
        Cell::new("Usability tests"),
        Cell::new(format!(
            "{} logged, {} succeeded",
            summary.tests_logged, summary.tests_succeeded
        )),
        Cell::new("-"),
    ]);

    println!("{table}");
    Ok(())
}
