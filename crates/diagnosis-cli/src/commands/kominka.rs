use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::Path;

use diagnosis_core::kominka::scenarios::{self, ScenarioComparisonInput};
use diagnosis_core::kominka::yield_calc::{self, YieldInput};

use crate::input;

/// Arguments for the rental yield calculator
#[derive(Args)]
pub struct KominkaArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Acquisition price (万円)
    #[arg(long)]
    pub acquisition_price: Option<Decimal>,

    /// Renovation cost (万円)
    #[arg(long)]
    pub renovation_cost: Option<Decimal>,

    /// Acquisition overheads (万円); estimated at 7% of the price when omitted
    #[arg(long)]
    pub other_expenses: Option<Decimal>,

    /// Expected monthly rent (万円)
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Annual expense rate: 0.10, 0.15 or 0.20
    #[arg(long, default_value = "0.15")]
    pub expense_rate: Decimal,
}

/// Arguments for the scenario comparison
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to JSON input file with `base` and `variations`
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_kominka(
    args: KominkaArgs,
    store: Option<&Path>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let yield_input: YieldInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let acquisition_price = args
                .acquisition_price
                .ok_or("--acquisition-price is required (or provide --input)")?;
            let other_expenses = args.other_expenses.unwrap_or_else(|| {
                let estimate = yield_calc::estimate_other_expenses(acquisition_price);
                tracing::info!(%estimate, "other expenses estimated from acquisition price");
                estimate
            });
            YieldInput {
                acquisition_price,
                renovation_cost: args
                    .renovation_cost
                    .ok_or("--renovation-cost is required (or provide --input)")?,
                other_expenses,
                monthly_rent: args
                    .monthly_rent
                    .ok_or("--monthly-rent is required (or provide --input)")?,
                annual_expense_rate: args.expense_rate,
            }
        }
    };

    let result = yield_calc::calculate_yield(&yield_input)?;
    super::persist(store, result.result.clone().into())?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_scenarios(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison: ScenarioComparisonInput = input::read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for scenario comparison")?;
    let result = scenarios::compare_scenarios(&comparison)?;
    Ok(serde_json::to_value(result)?)
}
