use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::DiagnosisError;
use crate::types::{
    floor_amount, round_one_decimal, with_metadata, ComputationOutput, Money, Percent, Rate,
    Years,
};
use crate::DiagnosisResult;

/// Annual expense rates the form offers.
pub const EXPENSE_RATES: [Rate; 3] = [dec!(0.10), dec!(0.15), dec!(0.20)];

const HIGH_YIELD_THRESHOLD: Percent = dec!(12);
const STANDARD_THRESHOLD: Percent = dec!(7);

/// Rule of thumb for acquisition overheads (registration, brokerage, taxes).
const OTHER_EXPENSE_SHARE: Rate = dec!(0.07);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldInput {
    pub acquisition_price: Money,
    pub renovation_cost: Money,
    pub other_expenses: Money,
    pub monthly_rent: Money,
    /// Share of gross rent lost to running costs: 0.10, 0.15 or 0.20
    pub annual_expense_rate: Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YieldVerdict {
    HighYield,
    Standard,
    LowYield,
}

impl YieldVerdict {
    pub fn message(&self) -> &'static str {
        match self {
            YieldVerdict::HighYield => "優秀な数字だ。この利回りを実現できるなら、迷わず動け。",
            YieldVerdict::Standard => {
                "空き家投資としては合格ラインだ。リスクとリターンのバランスが取れている。"
            }
            YieldVerdict::LowYield => {
                "利回りが物足りない。より安く仕入れるか、もっと高利回りの物件を探すべきだ。"
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            YieldVerdict::HighYield => "HIGH YIELD",
            YieldVerdict::Standard => "STANDARD",
            YieldVerdict::LowYield => "LOW YIELD",
        }
    }
}

/// Serialized as the string `"never"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unrecoverable {
    #[serde(rename = "never")]
    Never,
}

/// Years until net income repays the investment.
///
/// A non-positive annual net income never pays back; that case is tagged
/// rather than leaking an infinite or NaN number into the JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaybackPeriod {
    Years(Years),
    Never(Unrecoverable),
}

impl PaybackPeriod {
    pub fn years(&self) -> Option<Years> {
        match self {
            PaybackPeriod::Years(y) => Some(*y),
            PaybackPeriod::Never(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldRates {
    pub gross: Percent,
    pub net: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentBreakdown {
    pub acquisition: Money,
    pub renovation: Money,
    pub other: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub total: Money,
    pub breakdown: InvestmentBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub annual_rent: Money,
    pub annual_expenses: Money,
    pub annual_net: Money,
    pub monthly_cash_flow: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldResult {
    pub judgment: YieldVerdict,
    pub message: String,
    /// Rounded to one decimal
    pub yields: YieldRates,
    pub investment: Investment,
    pub income: Income,
    pub payback_period: PaybackPeriod,
    pub input: YieldInput,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute gross/net yield, payback and cash flow, then classify the net
/// yield into HIGH_YIELD (>= 12%), STANDARD (>= 7%) or LOW_YIELD.
pub fn calculate_yield(input: &YieldInput) -> DiagnosisResult<ComputationOutput<YieldResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = compute_yield(input, &mut warnings)?;

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Vacant House Rental Yield (gross / net on total investment)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Verdict for an unrounded net yield. Boundary values go to the higher tier.
pub fn classify_yield(net_yield: Percent) -> YieldVerdict {
    if net_yield >= HIGH_YIELD_THRESHOLD {
        YieldVerdict::HighYield
    } else if net_yield >= STANDARD_THRESHOLD {
        YieldVerdict::Standard
    } else {
        YieldVerdict::LowYield
    }
}

/// Rough acquisition overheads: 7% of the purchase price, floored.
pub fn estimate_other_expenses(acquisition_price: Money) -> Money {
    floor_amount(acquisition_price * OTHER_EXPENSE_SHARE)
}

/// Payback in years, rounded to one decimal.
pub fn payback_period(
    total_investment: Money,
    annual_net_income: Money,
) -> DiagnosisResult<PaybackPeriod> {
    if annual_net_income <= Decimal::ZERO {
        return Ok(PaybackPeriod::Never(Unrecoverable::Never));
    }
    total_investment
        .checked_div(annual_net_income)
        .map(|years| PaybackPeriod::Years(round_one_decimal(years)))
        .ok_or_else(|| DiagnosisError::overflow("payback period"))
}

pub(crate) fn compute_yield(
    input: &YieldInput,
    warnings: &mut Vec<String>,
) -> DiagnosisResult<YieldResult> {
    validate_input(input)?;

    let total_investment = input
        .acquisition_price
        .checked_add(input.renovation_cost)
        .and_then(|sum| sum.checked_add(input.other_expenses))
        .ok_or_else(|| DiagnosisError::overflow("total investment"))?;
    if total_investment.is_zero() {
        return Err(DiagnosisError::DivisionByZero {
            context: "total investment (acquisition + renovation + other expenses)".into(),
        });
    }

    let annual_rent = input
        .monthly_rent
        .checked_mul(dec!(12))
        .ok_or_else(|| DiagnosisError::overflow("annual rent"))?;
    let annual_expenses = annual_rent * input.annual_expense_rate;
    let annual_net = annual_rent - annual_expenses;

    let percent_of_investment = |amount: Money, context: &str| -> DiagnosisResult<Percent> {
        amount
            .checked_div(total_investment)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or_else(|| DiagnosisError::overflow(context))
    };
    let gross_yield = percent_of_investment(annual_rent, "gross yield")?;
    let net_yield = percent_of_investment(annual_net, "net yield")?;
    let monthly_cash_flow = round_one_decimal(annual_net / dec!(12));
    let payback = payback_period(total_investment, annual_net)?;

    let verdict = classify_yield(net_yield);
    tracing::debug!(
        verdict = verdict.label(),
        net_yield = %net_yield,
        total_investment = %total_investment,
        "yield verdict"
    );

    if monthly_cash_flow < Decimal::ONE {
        warnings.push(format!(
            "月間キャッシュフローが{monthly_cash_flow}万円しかありません（借入返済前）"
        ));
    }
    if let Some(years) = payback.years() {
        if years > dec!(30) {
            warnings.push(format!("投資回収期間が{years}年で、30年を超えています"));
        }
    }

    Ok(YieldResult {
        judgment: verdict,
        message: verdict.message().to_string(),
        yields: YieldRates {
            gross: round_one_decimal(gross_yield),
            net: round_one_decimal(net_yield),
        },
        investment: Investment {
            total: floor_amount(total_investment),
            breakdown: InvestmentBreakdown {
                acquisition: input.acquisition_price,
                renovation: input.renovation_cost,
                other: input.other_expenses,
            },
        },
        income: Income {
            annual_rent: floor_amount(annual_rent),
            annual_expenses: floor_amount(annual_expenses),
            annual_net: floor_amount(annual_net),
            monthly_cash_flow,
        },
        payback_period: payback,
        input: input.clone(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &YieldInput) -> DiagnosisResult<()> {
    if input.acquisition_price < Decimal::ZERO {
        return Err(DiagnosisError::invalid(
            "acquisitionPrice",
            "物件取得価格は0以上の数値である必要があります",
        ));
    }
    if input.renovation_cost < Decimal::ZERO {
        return Err(DiagnosisError::invalid(
            "renovationCost",
            "リノベーション費用は0以上の数値である必要があります",
        ));
    }
    if input.other_expenses < Decimal::ZERO {
        return Err(DiagnosisError::invalid(
            "otherExpenses",
            "諸経費は0以上の数値である必要があります",
        ));
    }
    if input.monthly_rent <= Decimal::ZERO {
        return Err(DiagnosisError::invalid(
            "monthlyRent",
            "想定月額家賃は正の数値である必要があります",
        ));
    }
    if !EXPENSE_RATES.contains(&input.annual_expense_rate) {
        return Err(DiagnosisError::invalid(
            "annualExpenseRate",
            "年間経費率は10%, 15%, 20%のいずれかである必要があります",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> YieldInput {
        YieldInput {
            acquisition_price: dec!(800),
            renovation_cost: dec!(200),
            other_expenses: dec!(50),
            monthly_rent: dec!(10),
            annual_expense_rate: dec!(0.15),
        }
    }

    #[test]
    fn test_standard_worked_example() {
        let out = calculate_yield(&sample_input()).unwrap().result;

        assert_eq!(out.investment.total, dec!(1050));
        assert_eq!(out.income.annual_rent, dec!(120));
        assert_eq!(out.income.annual_expenses, dec!(18));
        assert_eq!(out.income.annual_net, dec!(102));
        // 120 / 1050 = 11.43%, 102 / 1050 = 9.71%
        assert_eq!(out.yields.gross, dec!(11.4));
        assert_eq!(out.yields.net, dec!(9.7));
        assert_eq!(out.judgment, YieldVerdict::Standard);
        // 1050 / 102 = 10.29
        assert_eq!(out.payback_period, PaybackPeriod::Years(dec!(10.3)));
        assert_eq!(out.income.monthly_cash_flow, dec!(8.5));
    }

    #[test]
    fn test_exact_twelve_percent_is_high_yield() {
        // net = 10 * 12 * 0.8 = 96; 96 / 800 = 12%
        let input = YieldInput {
            acquisition_price: dec!(800),
            renovation_cost: Decimal::ZERO,
            other_expenses: Decimal::ZERO,
            monthly_rent: dec!(10),
            annual_expense_rate: dec!(0.20),
        };
        let out = calculate_yield(&input).unwrap().result;
        assert_eq!(out.yields.net, dec!(12));
        assert_eq!(out.judgment, YieldVerdict::HighYield);
    }

    #[test]
    fn test_exact_seven_percent_is_standard() {
        // net = 7 * 12 * 0.8 = 67.2; 67.2 / 960 = 7%
        let input = YieldInput {
            acquisition_price: dec!(900),
            renovation_cost: dec!(60),
            other_expenses: Decimal::ZERO,
            monthly_rent: dec!(7),
            annual_expense_rate: dec!(0.20),
        };
        let out = calculate_yield(&input).unwrap().result;
        assert_eq!(out.judgment, YieldVerdict::Standard);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_yield(dec!(12.0)), YieldVerdict::HighYield);
        assert_eq!(classify_yield(dec!(11.99)), YieldVerdict::Standard);
        assert_eq!(classify_yield(dec!(7.0)), YieldVerdict::Standard);
        assert_eq!(classify_yield(dec!(6.99)), YieldVerdict::LowYield);
    }

    #[test]
    fn test_low_yield_warns_on_long_payback() {
        let input = YieldInput {
            acquisition_price: dec!(3000),
            renovation_cost: dec!(500),
            other_expenses: dec!(100),
            monthly_rent: dec!(8),
            annual_expense_rate: dec!(0.20),
        };
        let result = calculate_yield(&input).unwrap();
        assert_eq!(result.result.judgment, YieldVerdict::LowYield);
        // 3600 / 76.8 = 46.875
        assert_eq!(result.result.payback_period, PaybackPeriod::Years(dec!(46.9)));
        assert!(result.warnings.iter().any(|w| w.contains("30年を超えて")));
    }

    #[test]
    fn test_payback_never_when_no_net_income() {
        assert_eq!(
            payback_period(dec!(1000), Decimal::ZERO).unwrap(),
            PaybackPeriod::Never(Unrecoverable::Never)
        );
        assert_eq!(
            payback_period(dec!(1000), dec!(-5)).unwrap(),
            PaybackPeriod::Never(Unrecoverable::Never)
        );
        let json =
            serde_json::to_value(payback_period(dec!(1000), Decimal::ZERO).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!("never"));
        let json = serde_json::to_value(payback_period(dec!(1050), dec!(102)).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!(10.3));
    }

    #[test]
    fn test_zero_total_investment_rejected() {
        let input = YieldInput {
            acquisition_price: Decimal::ZERO,
            renovation_cost: Decimal::ZERO,
            other_expenses: Decimal::ZERO,
            monthly_rent: dec!(5),
            annual_expense_rate: dec!(0.10),
        };
        assert!(matches!(
            calculate_yield(&input).unwrap_err(),
            DiagnosisError::DivisionByZero { .. }
        ));
    }

    #[test]
    fn test_validation_failures() {
        let mut input = sample_input();
        input.acquisition_price = dec!(-1);
        assert!(calculate_yield(&input).is_err());

        let mut input = sample_input();
        input.other_expenses = dec!(-0.5);
        assert!(matches!(
            calculate_yield(&input).unwrap_err(),
            DiagnosisError::InvalidInput { ref field, .. } if field == "otherExpenses"
        ));

        let mut input = sample_input();
        input.monthly_rent = Decimal::ZERO;
        assert!(calculate_yield(&input).is_err());

        let mut input = sample_input();
        input.annual_expense_rate = dec!(0.25);
        assert!(matches!(
            calculate_yield(&input).unwrap_err(),
            DiagnosisError::InvalidInput { ref field, .. } if field == "annualExpenseRate"
        ));
    }

    #[test]
    fn test_estimate_other_expenses() {
        assert_eq!(estimate_other_expenses(dec!(800)), dec!(56));
        assert_eq!(estimate_other_expenses(dec!(450)), dec!(31));
    }
}
