//! The `pawfect report` command.

use std::path::Path;

use anyhow::Result;

use pawfect_report::write_html_report;

use crate::workspace;

pub fn execute(document: &Path, output: &Path) -> Result<()> {
    let session = workspace::load_session(document)?;
    write_html_report(&session.snapshot(), output)?;
    tracing::info!(path = %output.display(), "HTML report written");
    println!("HTML report: {}", output.display());
    Ok(())
}
