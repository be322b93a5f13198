//! The `pawfect export` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::workspace;

pub fn execute(
    document: &Path,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let dir = match output {
        Some(dir) => dir,
        None => pawfect_gateway::load_config_from(config_path.as_deref())?.export_dir,
    };

    let session = workspace::load_session(document)?;
    let path = session.export()?.write_to_dir(&dir)?;
    println!("Exported evaluation to {}", path.display());
    Ok(())
}
