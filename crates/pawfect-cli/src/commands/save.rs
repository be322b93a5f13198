//! The `pawfect save` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use pawfect_core::save::{EvaluatorDetails, SaveError, Saver};
use pawfect_gateway::{create_gateway, load_config_from, GatewayConfig};

use crate::workspace;

pub async fn execute(
    document: &Path,
    name: Option<String>,
    notes: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let session = workspace::load_session(document)?;
    let identity = workspace::load_identity()?;

    let evaluator_name = name.or(config.evaluator_name).unwrap_or_default();
    let details = EvaluatorDetails::new(&evaluator_name).with_notes(&notes);

    let gateway = create_gateway(&config.gateway, identity.as_ref())?;
    let gateway_name = gateway.name().to_string();
    let saver = Saver::new(gateway);

    match saver.save(&session, identity.as_ref(), &details).await {
        Ok(report) => {
            println!("{}", report.notice());
            for stage in &report.stages {
                println!("  saved {stage} ({gateway_name}: {})", stage.table());
            }
            if let GatewayConfig::Local { dir } = &config.gateway {
                println!("Rows appended under {}", dir.display());
            }
            Ok(())
        }
        Err(err) => {
            if let SaveError::Remote { completed, .. } = &err {
                for stage in completed {
                    eprintln!("  already saved: {stage}");
                }
            }
            if let Some(route) = err.redirect() {
                eprintln!("Redirecting to {route}: run `pawfect login` first.");
            }
            let notice = err.notice();
            if notice.title != "Error" {
                eprintln!("{}", notice.title);
            }
            anyhow::bail!("{}", notice.description)
        }
    }
}
