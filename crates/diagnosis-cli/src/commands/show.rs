use clap::Args;
use std::path::Path;

use diagnosis_core::report;
use diagnosis_core::{FileStore, ResultStore};

/// Arguments for viewing the stored result
#[derive(Args)]
pub struct ShowArgs {
    /// Print the stored record as JSON instead of the text report
    #[arg(long)]
    pub raw: bool,

    /// Append the subsidy checklist or the choice guide, when the brand has one
    #[arg(long)]
    pub follow_up: bool,
}

/// Render the last stored diagnosis.
pub fn run_show(args: ShowArgs, store: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    let dir = store.ok_or("--store <dir> or DIAG_STORE_DIR is required for show")?;
    let store = FileStore::new(dir);
    let record = store
        .load()?
        .ok_or_else(|| format!("No diagnosis stored in {}", store.path().display()))?;

    if args.raw {
        return Ok(serde_json::to_string_pretty(&record)?);
    }

    let mut text = report::render_record(&record);
    if args.follow_up {
        if let Some(extra) = report::follow_up(&record) {
            text.push_str("\n\n");
            text.push_str(&extra);
        }
    }
    Ok(text)
}
