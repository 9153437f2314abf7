use super::{group_thousands, RULE};
use crate::flip::mao::{MaoResult, MaoVerdict};

fn icon(verdict: MaoVerdict) -> &'static str {
    match verdict {
        MaoVerdict::Buy => "🟢",
        MaoVerdict::Negotiate => "🟡",
        MaoVerdict::Pass => "🔴",
    }
}

pub fn format_mao(result: &MaoResult) -> String {
    let j = &result.judgment;
    let b = &result.breakdown;
    let sign = if result.difference.is_sign_negative() { "" } else { "+" };

    let mut lines = vec![
        RULE.to_string(),
        format!("判定：{} {}", icon(j.id), j.label),
        RULE.to_string(),
        String::new(),
        j.message.clone(),
        j.description.clone(),
        String::new(),
        "■ MAO（最大許容価格）".to_string(),
    ];
    for (pct, value) in [
        (75, result.mao.mao75),
        (70, result.mao.mao70),
        (65, result.mao.mao65),
        (60, result.mao.mao60),
    ] {
        lines.push(format!("  MAO（{pct}%ルール）：{}万円", group_thousands(value)));
    }
    lines.push(String::new());
    lines.push(format!(
        "売出価格との差額：{sign}{}万円",
        group_thousands(result.difference)
    ));
    if let Some(target) = result.target_price {
        lines.push(format!("→ 指値目標：{}万円以下", group_thousands(target)));
    }
    lines.extend([
        String::new(),
        "■ 内訳".to_string(),
        format!("  ・想定再販価格：{}万円", group_thousands(b.arv)),
        format!(
            "  ・リフォーム費用：{}万円（予備費込）",
            group_thousands(b.rehab_cost_with_contingency)
        ),
        format!("  ・諸経費（30%）：{}万円", group_thousands(b.expenses)),
        format!("  ・最大仕入れ価格：{}万円", group_thousands(b.max_purchase_price)),
        RULE.to_string(),
    ]);

    lines.join("\n")
}
