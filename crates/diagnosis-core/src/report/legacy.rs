use super::RULE;
use crate::legacy::choice::ChoiceResult;

const BAR_WIDTH: u32 = 12;

fn bar(score: u32, total: u32) -> String {
    if total == 0 {
        return " ".repeat(BAR_WIDTH as usize);
    }
    // Nearest integer, halves rounding up.
    let filled = ((score * BAR_WIDTH * 2 + total) / (total * 2)) as usize;
    let filled = filled.min(BAR_WIDTH as usize);
    format!("{}{}", "█".repeat(filled), " ".repeat(BAR_WIDTH as usize - filled))
}

pub fn format_choice(result: &ChoiceResult) -> String {
    let s = &result.scores;
    let total = s.total();

    let mut lines = vec![
        RULE.to_string(),
        "あなたへのご提案".to_string(),
        RULE.to_string(),
        String::new(),
        result.title.clone(),
        String::new(),
        result.message.clone(),
        String::new(),
        "■ あなたの診断スコア".to_string(),
        format!("  売却     {}  {}pt", bar(s.sell, total), s.sell),
        format!("  賃貸     {}  {}pt", bar(s.rent, total), s.rent),
        format!("  所有継続 {}  {}pt", bar(s.keep, total), s.keep),
        String::new(),
        "■ 次にやるべきこと".to_string(),
    ];
    for (i, action) in result.next_actions.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, action));
    }
    lines.push(RULE.to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::choice::{diagnose_choice, ChoiceInput};

    #[test]
    fn test_bar_rounding() {
        assert_eq!(bar(0, 0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(bar(14, 14).chars().filter(|c| *c == '█').count(), 12);
        // 1/8 of 12 = 1.5 -> 2
        assert_eq!(bar(1, 8).chars().filter(|c| *c == '█').count(), 2);
        assert_eq!(bar(1, 3).chars().count(), 12);
    }

    #[test]
    fn test_choice_report_lists_actions() {
        let input: ChoiceInput = [("q4", "ありそう"), ("q9", "分からない")].into_iter().collect();
        let result = diagnose_choice(&input).unwrap().result;
        let text = format_choice(&result);
        assert!(text.contains("賃貸     ████████████  3pt"));
        assert!(text.contains("  1. 賃貸需要を調査する"));
    }
}
