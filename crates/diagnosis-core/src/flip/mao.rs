use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::DiagnosisError;
use crate::types::{floor_amount, with_metadata, ComputationOutput, Money, Rate};
use crate::DiagnosisResult;

/// Contingency rates the purchase form offers.
pub const CONTINGENCY_RATES: [Rate; 3] = [dec!(0.10), dec!(0.15), dec!(0.20)];

/// Share of ARV reported as overhead in the breakdown. Display only.
const EXPENSE_SHARE: Rate = dec!(0.30);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaoInput {
    /// After-repair (resale) value
    pub arv: Money,
    pub rehab_cost: Money,
    /// Asking price on the market
    pub list_price: Money,
    /// Buffer applied on top of the rehab estimate: 0.10, 0.15 or 0.20
    pub contingency_rate: Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaoVerdict {
    Buy,
    Negotiate,
    Pass,
}

impl MaoVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaoVerdict::Buy => "BUY",
            MaoVerdict::Negotiate => "NEGOTIATE",
            MaoVerdict::Pass => "PASS",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            MaoVerdict::Buy => "理想的な仕入れ価格です。",
            MaoVerdict::Negotiate => "交渉の余地があります。",
            MaoVerdict::Pass => "売出価格が高すぎます。",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            MaoVerdict::Buy => {
                "想定される利益率を確保できる可能性が高い物件です。迅速な意思決定をお勧めします。"
            }
            MaoVerdict::Negotiate => {
                "指値交渉により、利益を確保できる可能性があります。周辺相場を再確認してください。"
            }
            MaoVerdict::Pass => {
                "この価格での仕入れは推奨されません。大幅な価格交渉が必要です。"
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaoJudgment {
    pub id: MaoVerdict,
    pub label: String,
    pub message: String,
    pub description: String,
}

impl From<MaoVerdict> for MaoJudgment {
    fn from(verdict: MaoVerdict) -> Self {
        MaoJudgment {
            id: verdict,
            label: verdict.as_str().to_string(),
            message: verdict.message().to_string(),
            description: verdict.description().to_string(),
        }
    }
}

/// Offer ceilings at each ARV percentage, floored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaoThresholds {
    pub mao75: Money,
    pub mao70: Money,
    pub mao65: Money,
    pub mao60: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaoBreakdown {
    pub arv: Money,
    pub rehab_cost_with_contingency: Money,
    /// Flat 30% of ARV; not used in the verdict
    pub expenses: Money,
    pub max_purchase_price: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaoResult {
    pub judgment: MaoJudgment,
    pub mao: MaoThresholds,
    /// mao70 - list price; negative when the asking price is above it
    pub difference: Money,
    /// Negotiation ceiling. `None` for BUY.
    pub target_price: Option<Money>,
    pub breakdown: MaoBreakdown,
    pub input: MaoInput,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute MAO thresholds and a BUY / NEGOTIATE / PASS verdict.
///
/// Each threshold is `arv * rate - rehab_cost * (1 + contingency_rate)`,
/// floored. The verdict compares the list price against the 70% and 75%
/// ceilings in that order.
pub fn calculate_mao(input: &MaoInput) -> DiagnosisResult<ComputationOutput<MaoResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;

    let rehab_with_contingency = input
        .rehab_cost
        .checked_mul(Decimal::ONE + input.contingency_rate)
        .ok_or_else(|| DiagnosisError::overflow("rehab cost with contingency"))?;
    let threshold = |rate: Rate| -> DiagnosisResult<Money> {
        input
            .arv
            .checked_mul(rate)
            .and_then(|share| share.checked_sub(rehab_with_contingency))
            .map(floor_amount)
            .ok_or_else(|| DiagnosisError::overflow("MAO threshold"))
    };

    let mao = MaoThresholds {
        mao75: threshold(dec!(0.75))?,
        mao70: threshold(dec!(0.70))?,
        mao65: threshold(dec!(0.65))?,
        mao60: threshold(dec!(0.60))?,
    };
    let difference = mao
        .mao70
        .checked_sub(input.list_price)
        .map(floor_amount)
        .ok_or_else(|| DiagnosisError::overflow("difference to list price"))?;

    if mao.mao60 < Decimal::ZERO {
        warnings.push(format!(
            "MAO(60%)がマイナスです（{}万円）。リフォーム費用が再販利益を上回っています",
            mao.mao60
        ));
    }

    let (verdict, target_price) = judge(input.list_price, &mao);
    tracing::debug!(
        verdict = verdict.as_str(),
        mao70 = %mao.mao70,
        list_price = %input.list_price,
        "mao verdict"
    );

    let output = MaoResult {
        judgment: verdict.into(),
        difference,
        target_price,
        breakdown: MaoBreakdown {
            arv: input.arv,
            rehab_cost_with_contingency: floor_amount(rehab_with_contingency),
            expenses: floor_amount(input.arv * EXPENSE_SHARE),
            max_purchase_price: mao.mao70,
        },
        mao,
        input: input.clone(),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Maximum Allowable Offer (70% rule with contingency)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Verdict for a list price against floored thresholds.
///
/// BUY carries no target. NEGOTIATE targets mao70, PASS targets mao75.
pub fn judge(list_price: Money, mao: &MaoThresholds) -> (MaoVerdict, Option<Money>) {
    if list_price <= mao.mao70 {
        (MaoVerdict::Buy, None)
    } else if list_price <= mao.mao75 {
        (MaoVerdict::Negotiate, Some(mao.mao70))
    } else {
        (MaoVerdict::Pass, Some(mao.mao75))
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &MaoInput, warnings: &mut Vec<String>) -> DiagnosisResult<()> {
    if input.arv <= Decimal::ZERO {
        return Err(DiagnosisError::invalid(
            "arv",
            "想定再販価格(ARV)は正の数値である必要があります",
        ));
    }
    if input.rehab_cost < Decimal::ZERO {
        return Err(DiagnosisError::invalid(
            "rehabCost",
            "リフォーム費用は0以上の数値である必要があります",
        ));
    }
    if input.list_price <= Decimal::ZERO {
        return Err(DiagnosisError::invalid(
            "listPrice",
            "売出価格は正の数値である必要があります",
        ));
    }
    if !CONTINGENCY_RATES.contains(&input.contingency_rate) {
        return Err(DiagnosisError::invalid(
            "contingencyRate",
            "予備費率は10%, 15%, 20%のいずれかである必要があります",
        ));
    }

    if input.rehab_cost > input.arv * dec!(0.5) {
        warnings.push("リフォーム費用が想定再販価格(ARV)の50%を超えています。再販価格の見積もりを確認してください".into());
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> MaoInput {
        MaoInput {
            arv: dec!(3000),
            rehab_cost: dec!(300),
            list_price: dec!(1800),
            contingency_rate: dec!(0.15),
        }
    }

    #[test]
    fn test_negotiate_worked_example() {
        let out = calculate_mao(&sample_input()).unwrap().result;

        // rehab with contingency = 300 * 1.15 = 345
        assert_eq!(out.breakdown.rehab_cost_with_contingency, dec!(345));
        // 3000 * 0.70 - 345 = 1755; 3000 * 0.75 - 345 = 1905
        assert_eq!(out.mao.mao70, dec!(1755));
        assert_eq!(out.mao.mao75, dec!(1905));
        assert_eq!(out.mao.mao65, dec!(1605));
        assert_eq!(out.mao.mao60, dec!(1455));

        assert_eq!(out.judgment.id, MaoVerdict::Negotiate);
        assert_eq!(out.target_price, Some(dec!(1755)));
        assert_eq!(out.difference, dec!(-45));
    }

    #[test]
    fn test_buy_has_no_target() {
        let mut input = sample_input();
        input.list_price = dec!(1755);
        let out = calculate_mao(&input).unwrap().result;
        assert_eq!(out.judgment.id, MaoVerdict::Buy);
        assert_eq!(out.judgment.label, "BUY");
        assert!(out.target_price.is_none());
        assert_eq!(out.difference, dec!(0));
    }

    #[test]
    fn test_pass_targets_mao75() {
        let mut input = sample_input();
        input.list_price = dec!(1906);
        let out = calculate_mao(&input).unwrap().result;
        assert_eq!(out.judgment.id, MaoVerdict::Pass);
        assert_eq!(out.target_price, Some(dec!(1905)));
    }

    #[test]
    fn test_breakdown_expenses_fixed_share() {
        let out = calculate_mao(&sample_input()).unwrap().result;
        assert_eq!(out.breakdown.expenses, dec!(900));
        assert_eq!(out.breakdown.max_purchase_price, dec!(1755));
        assert_eq!(out.breakdown.arv, dec!(3000));
    }

    #[test]
    fn test_fractional_threshold_floors() {
        // 2500 * 0.70 - 350 * 1.15 = 1750 - 402.5 = 1347.5 -> 1347
        let input = MaoInput {
            arv: dec!(2500),
            rehab_cost: dec!(350),
            list_price: dec!(1350),
            contingency_rate: dec!(0.15),
        };
        let out = calculate_mao(&input).unwrap().result;
        assert_eq!(out.mao.mao70, dec!(1347));
        // 1875 - 402.5 = 1472.5 -> 1472
        assert_eq!(out.mao.mao75, dec!(1472));
        assert_eq!(out.judgment.id, MaoVerdict::Negotiate);
        assert_eq!(out.difference, dec!(-3));
    }

    #[test]
    fn test_negative_mao_floors_down_and_warns() {
        let input = MaoInput {
            arv: dec!(100),
            rehab_cost: dec!(90),
            list_price: dec!(10),
            contingency_rate: dec!(0.15),
        };
        let result = calculate_mao(&input).unwrap();
        // 60 - 103.5 = -43.5 -> -44
        assert_eq!(result.result.mao.mao60, dec!(-44));
        assert_eq!(result.result.judgment.id, MaoVerdict::Pass);
        assert!(result.warnings.iter().any(|w| w.contains("マイナス")));
        assert!(result.warnings.iter().any(|w| w.contains("50%")));
    }

    #[test]
    fn test_zero_rehab_is_valid() {
        let mut input = sample_input();
        input.rehab_cost = Decimal::ZERO;
        let out = calculate_mao(&input).unwrap().result;
        assert_eq!(out.mao.mao70, dec!(2100));
        assert_eq!(out.judgment.id, MaoVerdict::Buy);
    }

    #[test]
    fn test_rejects_non_positive_arv() {
        let mut input = sample_input();
        input.arv = Decimal::ZERO;
        match calculate_mao(&input).unwrap_err() {
            DiagnosisError::InvalidInput { field, reason } => {
                assert_eq!(field, "arv");
                assert!(reason.contains("ARV"));
            }
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_rejects_negative_rehab_and_list_price() {
        let mut input = sample_input();
        input.rehab_cost = dec!(-1);
        assert!(calculate_mao(&input).is_err());

        let mut input = sample_input();
        input.list_price = Decimal::ZERO;
        assert!(calculate_mao(&input).is_err());
    }

    #[test]
    fn test_rejects_unlisted_contingency_rate() {
        let mut input = sample_input();
        input.contingency_rate = dec!(0.12);
        let err = calculate_mao(&input).unwrap_err();
        assert!(matches!(
            err,
            DiagnosisError::InvalidInput { ref field, .. } if field == "contingencyRate"
        ));
    }

    #[test]
    fn test_contingency_rate_scale_insensitive() {
        let mut input = sample_input();
        input.contingency_rate = dec!(0.2);
        assert!(calculate_mao(&input).is_ok());
    }
}
