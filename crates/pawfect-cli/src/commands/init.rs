//! The `pawfect init` command.

use std::path::Path;

use anyhow::Result;

use pawfect_core::EvaluationSession;

use crate::workspace;

pub fn execute(document: &Path, force: bool) -> Result<()> {
    if Path::new("pawfect.toml").exists() {
        println!("pawfect.toml already exists, skipping.");
    } else {
        std::fs::write("pawfect.toml", SAMPLE_CONFIG)?;
        println!("Created pawfect.toml");
    }

    if document.exists() && !force {
        println!(
            "{} already exists, skipping (use --force to start over).",
            document.display()
        );
    } else {
        workspace::store_session(document, &EvaluationSession::new())?;
        println!("Created {}", document.display());
    }

    println!("\nNext steps:");
    println!("  1. Rate heuristics:   pawfect heuristic 1 --rating good --checked true");
    println!("  2. Walk the tasks:    pawfect step task1-1 --completed true");
    println!("  3. Log a test:        pawfect test add --participant P1 --time 45 --success");
    println!("  4. Create an account: pawfect signup --name ... --email ... --password ...");
    println!("  5. Save:              pawfect save --name ...");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# pawfect configuration

# Name recorded on saved evaluations when --name is not given.
# evaluator_name = "Your Name"

# Where `pawfect export` writes its dated JSON file.
export_dir = "."

# Saved rows are appended to JSON-lines files under `dir`.
# Switch to the REST backend to save to the hosted tables instead:
#
# [gateway]
# type = "rest"
# url = "${PAWFECT_BACKEND_URL}"
# api_key = "${PAWFECT_BACKEND_KEY}"
[gateway]
type = "local"
dir = ".pawfect/saved"
"#;
