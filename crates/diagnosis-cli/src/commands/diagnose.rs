use clap::Args;
use serde_json::Value;
use std::path::Path;

use diagnosis_core::handoff::{self, Brand};

use crate::input;

/// Arguments for a brand-dispatched diagnosis
#[derive(Args)]
pub struct DiagnoseArgs {
    /// flip, subsidy, kominka or legacy
    #[arg(long)]
    pub brand: String,

    /// Path to the engine's JSON input
    #[arg(long)]
    pub input: Option<String>,
}

/// Run any engine by brand; the result carries its `brand` tag.
pub fn run_diagnose(
    args: DiagnoseArgs,
    store: Option<&Path>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let brand: Brand = args.brand.parse()?;
    let data: Value = input::read_input(args.input.as_deref())?
        .ok_or_else(|| format!("--input <file.json> or stdin required for brand '{brand}'"))?;

    let result = handoff::diagnose(brand, data)?;
    super::persist(store, result.result.clone())?;
    Ok(serde_json::to_value(result)?)
}
