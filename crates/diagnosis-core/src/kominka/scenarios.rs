use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::yield_calc::{compute_yield, YieldInput, YieldResult};
use crate::error::DiagnosisError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::DiagnosisResult;

/// Label used when a variation has no name.
pub const UNNAMED_SCENARIO: &str = "無名シナリオ";

/// A named partial override of the base input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldScenario {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renovation_cost: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_expenses: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_expense_rate: Option<Rate>,
}

impl YieldScenario {
    pub fn apply(&self, base: &YieldInput) -> YieldInput {
        YieldInput {
            acquisition_price: self.acquisition_price.unwrap_or(base.acquisition_price),
            renovation_cost: self.renovation_cost.unwrap_or(base.renovation_cost),
            other_expenses: self.other_expenses.unwrap_or(base.other_expenses),
            monthly_rent: self.monthly_rent.unwrap_or(base.monthly_rent),
            annual_expense_rate: self.annual_expense_rate.unwrap_or(base.annual_expense_rate),
        }
    }

    fn label(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_SCENARIO.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparisonInput {
    pub base: YieldInput,
    pub variations: Vec<YieldScenario>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    #[serde(flatten)]
    pub result: YieldResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub scenarios: Vec<ScenarioOutcome>,
    /// Scenario with the highest net yield; the first one wins ties
    pub best_scenario: String,
}

/// Run the yield calculator once per variation, in order.
///
/// Any invalid variation fails the whole comparison.
pub fn compare_scenarios(
    input: &ScenarioComparisonInput,
) -> DiagnosisResult<ComputationOutput<ScenarioComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.variations.is_empty() {
        return Err(DiagnosisError::invalid(
            "variations",
            "比較するシナリオを1つ以上指定してください",
        ));
    }

    let mut scenarios: Vec<ScenarioOutcome> = Vec::with_capacity(input.variations.len());
    for variation in &input.variations {
        let label = variation.label();
        let mut scenario_warnings = Vec::new();
        let result = compute_yield(&variation.apply(&input.base), &mut scenario_warnings)?;
        warnings.extend(scenario_warnings.into_iter().map(|w| format!("[{label}] {w}")));
        scenarios.push(ScenarioOutcome {
            scenario: label,
            result,
        });
    }

    let mut best = &scenarios[0];
    for outcome in &scenarios[1..] {
        if outcome.result.yields.net > best.result.yields.net {
            best = outcome;
        }
    }
    let best_scenario = best.scenario.clone();

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Vacant House Rental Yield Scenario Comparison",
        input,
        warnings,
        elapsed,
        ScenarioComparison {
            scenarios,
            best_scenario,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kominka::yield_calc::YieldVerdict;
    use rust_decimal_macros::dec;

    fn base() -> YieldInput {
        YieldInput {
            acquisition_price: dec!(800),
            renovation_cost: dec!(200),
            other_expenses: dec!(50),
            monthly_rent: dec!(10),
            annual_expense_rate: dec!(0.15),
        }
    }

    #[test]
    fn test_variations_override_base() {
        let input = ScenarioComparisonInput {
            base: base(),
            variations: vec![
                YieldScenario {
                    name: Some("現状".into()),
                    ..Default::default()
                },
                YieldScenario {
                    name: Some("指値成功".into()),
                    acquisition_price: Some(dec!(500)),
                    ..Default::default()
                },
                YieldScenario {
                    monthly_rent: Some(dec!(6)),
                    ..Default::default()
                },
            ],
        };
        let out = compare_scenarios(&input).unwrap().result;
        assert_eq!(out.scenarios.len(), 3);
        assert_eq!(out.scenarios[0].result.judgment, YieldVerdict::Standard);
        // 102 / 750 = 13.6%
        assert_eq!(out.scenarios[1].result.yields.net, dec!(13.6));
        assert_eq!(out.scenarios[1].result.judgment, YieldVerdict::HighYield);
        assert_eq!(out.scenarios[2].scenario, UNNAMED_SCENARIO);
        assert_eq!(out.best_scenario, "指値成功");
    }

    #[test]
    fn test_invalid_variation_fails_comparison() {
        let input = ScenarioComparisonInput {
            base: base(),
            variations: vec![YieldScenario {
                annual_expense_rate: Some(dec!(0.3)),
                ..Default::default()
            }],
        };
        assert!(compare_scenarios(&input).is_err());
    }

    #[test]
    fn test_empty_variations_rejected() {
        let input = ScenarioComparisonInput {
            base: base(),
            variations: vec![],
        };
        assert!(matches!(
            compare_scenarios(&input).unwrap_err(),
            DiagnosisError::InvalidInput { ref field, .. } if field == "variations"
        ));
    }
}
