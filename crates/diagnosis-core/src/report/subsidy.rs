use super::{group_thousands, RULE};
use crate::subsidy::diagnosis::SubsidyResult;

fn stars(score: u8) -> String {
    let filled = score.min(3) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(3 - filled))
}

pub fn format_subsidies(result: &SubsidyResult) -> String {
    let mut lines = vec![
        RULE.to_string(),
        result.display_message.clone(),
        RULE.to_string(),
        String::new(),
    ];

    if result.matched_subsidies.is_empty() {
        lines.extend([
            "現在の条件では国の補助金制度に該当するものが".to_string(),
            "見つかりませんでしたが、お住まいの自治体独自の".to_string(),
            "補助金制度がある可能性があります。".to_string(),
            RULE.to_string(),
        ]);
        return lines.join("\n");
    }

    lines.push(format!(
        "合計で最大 約{}万円 戻ってくる可能性があります",
        group_thousands(result.total_estimate)
    ));

    for (index, subsidy) in result.matched_subsidies.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("■ {}. {}", index + 1, subsidy.name));
        lines.push(format!("   {} / {}", subsidy.amount_text, subsidy.description));
        lines.push(format!("   おすすめ度：{}", stars(subsidy.match_score)));
        lines.push(format!("   理由：{}", subsidy.reason));
        if let Some(note) = &subsidy.note {
            lines.push(format!("   {note}"));
        }
    }

    lines.extend([
        String::new(),
        "※金額は目安です。実際の金額は工事内容により異なります。".to_string(),
        RULE.to_string(),
    ]);
    lines.join("\n")
}

/// Per-program checklist handed to the user after the diagnosis.
///
/// `None` when nothing matched.
pub fn subsidy_sheet(result: &SubsidyResult) -> Option<String> {
    if result.matched_subsidies.is_empty() {
        return None;
    }

    let mut lines = vec![
        "📄 あなた専用 補助金活用シート".to_string(),
        String::new(),
        "■ 診断結果サマリー".to_string(),
        format!("・使える制度：{}件", result.subsidy_count),
        format!("・最大補助額：約{}万円", group_thousands(result.total_estimate)),
        String::new(),
        "■ 制度別チェックリスト".to_string(),
    ];

    for (index, subsidy) in result.matched_subsidies.iter().enumerate() {
        lines.push(format!("□ {}. {}", index + 1, subsidy.name));
        lines.push(format!("   └ {}", subsidy.amount_text));
        lines.push(format!("   └ {}", subsidy.description));
        lines.push("   └ 申請期限：予算上限に達し次第終了".to_string());
    }

    lines.extend([
        String::new(),
        "■ 次のステップ".to_string(),
        "1. リフォーム箇所を決める".to_string(),
        "2. 見積もりを取る".to_string(),
        "3. 申請手続き".to_string(),
        "4. 工事開始".to_string(),
    ]);

    Some(lines.join("\n"))
}
