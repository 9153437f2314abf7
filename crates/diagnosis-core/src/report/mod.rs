//! Plain-text renderings of diagnosis results, one per brand.

#[cfg(feature = "flip")]
pub mod flip;
#[cfg(feature = "kominka")]
pub mod kominka;
#[cfg(feature = "legacy")]
pub mod legacy;
#[cfg(feature = "subsidy")]
pub mod subsidy;

use rust_decimal::Decimal;

use crate::handoff::DiagnosisRecord;

pub(crate) const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Render a stored record with the view matching its brand.
pub fn render_record(record: &DiagnosisRecord) -> String {
    match record {
        #[cfg(feature = "flip")]
        DiagnosisRecord::Flip(result) => flip::format_mao(result),
        #[cfg(feature = "subsidy")]
        DiagnosisRecord::Subsidy(result) => subsidy::format_subsidies(result),
        #[cfg(feature = "kominka")]
        DiagnosisRecord::Kominka(result) => kominka::format_yield(result),
        #[cfg(feature = "legacy")]
        DiagnosisRecord::Legacy(result) => legacy::format_choice(result),
    }
}

/// Follow-up material for the brands that have one: the subsidy checklist
/// and the choice guide.
pub fn follow_up(record: &DiagnosisRecord) -> Option<String> {
    match record {
        #[cfg(feature = "subsidy")]
        DiagnosisRecord::Subsidy(result) => subsidy::subsidy_sheet(result),
        #[cfg(feature = "legacy")]
        DiagnosisRecord::Legacy(result) => Some(
            crate::legacy::guides::detailed_guide(result.diagnosis_type).to_string(),
        ),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// Format with comma thousands separators, e.g. `-12,345.5`.
pub fn group_thousands(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(dec!(1755)), "1,755");
        assert_eq!(group_thousands(dec!(-45)), "-45");
        assert_eq!(group_thousands(dec!(1234567.5)), "1,234,567.5");
        assert_eq!(group_thousands(dec!(-1000)), "-1,000");
        assert_eq!(group_thousands(dec!(100.00)), "100");
    }
}
