use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::Path;

use diagnosis_core::flip::mao::{self, MaoInput};

use crate::input;

/// Arguments for the MAO calculator
#[derive(Args)]
pub struct FlipArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// After-repair value (万円)
    #[arg(long)]
    pub arv: Option<Decimal>,

    /// Estimated rehab cost (万円)
    #[arg(long)]
    pub rehab_cost: Option<Decimal>,

    /// Seller's list price (万円)
    #[arg(long)]
    pub list_price: Option<Decimal>,

    /// Contingency on rehab cost: 0.10, 0.15 or 0.20
    #[arg(long, default_value = "0.15")]
    pub contingency_rate: Decimal,
}

pub fn run_flip(args: FlipArgs, store: Option<&Path>) -> Result<Value, Box<dyn std::error::Error>> {
    let mao_input: MaoInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => MaoInput {
            arv: args.arv.ok_or("--arv is required (or provide --input)")?,
            rehab_cost: args
                .rehab_cost
                .ok_or("--rehab-cost is required (or provide --input)")?,
            list_price: args
                .list_price
                .ok_or("--list-price is required (or provide --input)")?,
            contingency_rate: args.contingency_rate,
        },
    };

    let result = mao::calculate_mao(&mao_input)?;
    super::persist(store, result.result.clone().into())?;
    Ok(serde_json::to_value(result)?)
}
