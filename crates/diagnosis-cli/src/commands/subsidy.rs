use clap::Args;
use serde_json::Value;
use std::path::Path;

use diagnosis_core::subsidy::diagnosis::{self, SubsidyInput};

use crate::input;

/// Arguments for subsidy matching
#[derive(Args)]
pub struct SubsidyArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Prefecture, e.g. 東京都
    #[arg(long)]
    pub prefecture: Option<String>,

    /// 戸建て or マンション
    #[arg(long)]
    pub building_type: Option<String>,

    /// Building age bucket, e.g. 30〜40年
    #[arg(long)]
    pub building_age: Option<String>,

    /// Renovation items under consideration (comma-separated or repeated)
    #[arg(long = "item", value_delimiter = ',')]
    pub items: Vec<String>,

    /// Household situation, e.g. 18歳未満の子どもがいる
    #[arg(long)]
    pub household: Option<String>,
}

pub fn run_subsidy(
    args: SubsidyArgs,
    store: Option<&Path>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let subsidy_input: SubsidyInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SubsidyInput {
            prefecture: args
                .prefecture
                .ok_or("--prefecture is required (or provide --input)")?,
            building_type: args
                .building_type
                .ok_or("--building-type is required (or provide --input)")?,
            building_age: args
                .building_age
                .ok_or("--building-age is required (or provide --input)")?,
            renovation_items: args.items,
            household_type: args
                .household
                .ok_or("--household is required (or provide --input)")?,
        },
    };

    let result = diagnosis::diagnose_subsidies(&subsidy_input)?;
    super::persist(store, result.result.clone().into())?;
    Ok(serde_json::to_value(result)?)
}
