use super::{group_thousands, RULE};
use crate::kominka::yield_calc::{PaybackPeriod, YieldResult, YieldVerdict};

fn icon(verdict: YieldVerdict) -> &'static str {
    match verdict {
        YieldVerdict::HighYield => "🟢",
        YieldVerdict::Standard => "🟡",
        YieldVerdict::LowYield => "🔴",
    }
}

fn payback_text(payback: &PaybackPeriod) -> String {
    match payback.years() {
        Some(years) => format!("{years:.1}年"),
        None => "回収不能".to_string(),
    }
}

pub fn format_yield(result: &YieldResult) -> String {
    let income = &result.income;
    [
        RULE.to_string(),
        format!("判定：{} {}", icon(result.judgment), result.judgment.label()),
        RULE.to_string(),
        String::new(),
        result.message.clone(),
        String::new(),
        format!("  表面利回り    {:.1}%", result.yields.gross),
        format!("  実質利回り    {:.1}%", result.yields.net),
        format!("  投資回収期間  {}", payback_text(&result.payback_period)),
        format!("  月間CF       約{:.1}万円", income.monthly_cash_flow),
        String::new(),
        "■ 投資サマリー".to_string(),
        format!("  総投資額          {}万円", group_thousands(result.investment.total)),
        format!("  年間家賃収入      {}万円", group_thousands(income.annual_rent)),
        format!("  年間経費          {}万円", group_thousands(income.annual_expenses)),
        format!("  年間純収益        {}万円", group_thousands(income.annual_net)),
        RULE.to_string(),
    ]
    .join("\n")
}
