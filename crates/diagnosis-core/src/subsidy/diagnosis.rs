use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::catalog::{
    BuildingAge, BuildingType, ProgramId, HOUSEHOLD_CARE_NEEDED, HOUSEHOLD_CHILDREN,
    HOUSEHOLD_YOUNG_COUPLE, ITEM_BARRIER_FREE, ITEM_WATER_HEATER, ITEM_WINDOW_INSULATION,
};
use crate::error::DiagnosisError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::DiagnosisResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Form answers, kept as the labels the user picked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsidyInput {
    pub prefecture: String,
    /// 戸建て or マンション
    pub building_type: String,
    /// One of the five age bands, e.g. 20〜30年
    pub building_age: String,
    pub renovation_items: Vec<String>,
    pub household_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsidyMatch {
    pub name: String,
    pub max_amount: Money,
    pub amount_text: String,
    pub description: String,
    pub match_score: u8,
    pub avg_amount: Money,
    /// Which rule matched
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
}

impl SubsidyMatch {
    fn new(id: ProgramId, reason: impl Into<String>) -> Self {
        let program = id.program();
        SubsidyMatch {
            name: program.name.to_string(),
            max_amount: program.max_amount(),
            amount_text: program.amount_text.to_string(),
            description: program.description.to_string(),
            match_score: program.match_score,
            avg_amount: program.avg_amount(),
            reason: reason.into(),
            note: None,
        }
    }

    fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    pub fn is_program(&self, id: ProgramId) -> bool {
        self.name == id.program().name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    /// Three or more programs matched
    Multiple,
    Found,
    /// Nothing national matched; point at municipal programs
    Local,
}

impl DisplayType {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 => DisplayType::Local,
            1 | 2 => DisplayType::Found,
            _ => DisplayType::Multiple,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DisplayType::Multiple => "🎉 たくさんの補助金が使えそうです！",
            DisplayType::Found => "✅ 使える補助金が見つかりました",
            DisplayType::Local => "📋 お住まいの自治体独自の制度を確認しましょう",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsidyResult {
    pub display_type: DisplayType,
    pub display_message: String,
    /// Sorted by match score, highest first
    pub matched_subsidies: Vec<SubsidyMatch>,
    /// Plain sum of `avg_amount`; ignores caps and program exclusivity
    pub total_estimate: Money,
    pub subsidy_count: usize,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Match the input against the subsidy catalog.
///
/// Every rule is evaluated independently. The nursing-care program is listed
/// at most once: the barrier-free rule only adds it when the household rule
/// did not.
pub fn diagnose_subsidies(
    input: &SubsidyInput,
) -> DiagnosisResult<ComputationOutput<SubsidyResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let building_age = validate_input(input)?;

    let mut matched = match_programs(input, building_age);
    // Stable: equal scores keep rule order.
    matched.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    let total_estimate: Money = matched.iter().map(|s| s.avg_amount).sum();
    let display_type = DisplayType::for_count(matched.len());

    if matched.len() >= 2 {
        warnings.push("合計額は各制度の平均額の単純合計です。併用できない制度があります".into());
    }
    if matched.iter().any(|s| s.note.is_some()) {
        warnings.push("介護保険の住宅改修には要介護・要支援認定が必要です".into());
    }

    tracing::debug!(
        count = matched.len(),
        total = %total_estimate,
        display = ?display_type,
        "subsidy diagnosis"
    );

    let output = SubsidyResult {
        display_type,
        display_message: display_type.message().to_string(),
        subsidy_count: matched.len(),
        matched_subsidies: matched,
        total_estimate,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "National Renovation Subsidy Matching",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn match_programs(input: &SubsidyInput, building_age: BuildingAge) -> Vec<SubsidyMatch> {
    let has_item = |tag: &str| input.renovation_items.iter().any(|i| i == tag);
    let household = input.household_type.as_str();
    let mut matched: Vec<SubsidyMatch> = Vec::new();

    if has_item(ITEM_WINDOW_INSULATION) {
        matched.push(SubsidyMatch::new(
            ProgramId::WindowRenovation,
            "窓の断熱改修を検討中",
        ));
    }

    if has_item(ITEM_WATER_HEATER) {
        matched.push(SubsidyMatch::new(
            ProgramId::WaterHeater,
            "給湯器の交換を検討中",
        ));
    }

    if household == HOUSEHOLD_CHILDREN || household == HOUSEHOLD_YOUNG_COUPLE {
        matched.push(SubsidyMatch::new(
            ProgramId::ChildcareEco,
            "子育て世帯・若者夫婦世帯",
        ));
    }

    if household == HOUSEHOLD_CARE_NEEDED {
        matched.push(SubsidyMatch::new(
            ProgramId::NursingCare,
            "要介護・要支援の方がいる",
        ));
    }

    if has_item(ITEM_BARRIER_FREE) && !matched.iter().any(|s| s.is_program(ProgramId::NursingCare))
    {
        matched.push(
            SubsidyMatch::new(ProgramId::NursingCare, "バリアフリー改修を検討中")
                .with_note("※要介護・要支援認定が必要です"),
        );
    }

    if building_age.qualifies_for_long_term_quality() {
        matched.push(SubsidyMatch::new(
            ProgramId::LongTermQuality,
            format!("築{}の建物", input.building_age),
        ));
    }

    for m in &matched {
        tracing::trace!(program = %m.name, reason = %m.reason, "subsidy rule fired");
    }

    matched
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &SubsidyInput) -> DiagnosisResult<BuildingAge> {
    if input.prefecture.trim().is_empty() {
        return Err(DiagnosisError::invalid("prefecture", "都道府県を選択してください"));
    }
    if BuildingType::from_label(&input.building_type).is_none() {
        return Err(DiagnosisError::invalid(
            "buildingType",
            "建物の種類を選択してください",
        ));
    }
    let building_age = BuildingAge::from_label(&input.building_age)
        .ok_or_else(|| DiagnosisError::invalid("buildingAge", "築年数を選択してください"))?;
    if input.renovation_items.is_empty() {
        return Err(DiagnosisError::invalid(
            "renovationItems",
            "検討中のリフォーム項目を選択してください",
        ));
    }
    if input.household_type.trim().is_empty() {
        return Err(DiagnosisError::invalid(
            "householdType",
            "世帯の状況を選択してください",
        ));
    }
    Ok(building_age)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(items: &[&str], household: &str, age: &str) -> SubsidyInput {
        SubsidyInput {
            prefecture: "東京都".into(),
            building_type: "戸建て".into(),
            building_age: age.into(),
            renovation_items: items.iter().map(|s| s.to_string()).collect(),
            household_type: household.into(),
        }
    }

    #[test]
    fn test_worked_example_multiple() {
        let out = diagnose_subsidies(&input(&["窓の断熱"], "18歳未満の子どもがいる", "30〜40年"))
            .unwrap()
            .result;
        assert_eq!(out.subsidy_count, 3);
        assert_eq!(out.display_type, DisplayType::Multiple);
        let names: Vec<&str> = out.matched_subsidies.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["先進的窓リノベ事業", "子育てエコホーム支援事業", "長期優良住宅化リフォーム推進事業"]
        );
        assert_eq!(out.total_estimate, dec!(290));
        assert_eq!(out.matched_subsidies[2].reason, "築30〜40年の建物");
    }

    #[test]
    fn test_nursing_care_listed_once() {
        let out = diagnose_subsidies(&input(&["バリアフリー"], "要介護・要支援の方がいる", "10年未満"))
            .unwrap()
            .result;
        let nursing: Vec<&SubsidyMatch> = out
            .matched_subsidies
            .iter()
            .filter(|s| s.is_program(ProgramId::NursingCare))
            .collect();
        assert_eq!(nursing.len(), 1);
        // Household rule wins; no certification note.
        assert_eq!(nursing[0].reason, "要介護・要支援の方がいる");
        assert!(nursing[0].note.is_none());
        assert_eq!(out.display_type, DisplayType::Found);
    }

    #[test]
    fn test_barrier_free_fallback_adds_note() {
        let result = diagnose_subsidies(&input(&["バリアフリー"], "該当なし", "10〜20年")).unwrap();
        let out = &result.result;
        assert_eq!(out.subsidy_count, 1);
        assert_eq!(out.matched_subsidies[0].reason, "バリアフリー改修を検討中");
        assert_eq!(
            out.matched_subsidies[0].note.as_deref(),
            Some("※要介護・要支援認定が必要です")
        );
        assert!(result.warnings.iter().any(|w| w.contains("認定")));
    }

    #[test]
    fn test_no_match_is_local() {
        let out = diagnose_subsidies(&input(&["外壁"], "該当なし", "10年未満"))
            .unwrap()
            .result;
        assert_eq!(out.display_type, DisplayType::Local);
        assert!(out.matched_subsidies.is_empty());
        assert_eq!(out.total_estimate, Decimal::ZERO);
        assert_eq!(out.display_message, "📋 お住まいの自治体独自の制度を確認しましょう");
    }

    #[test]
    fn test_sorted_by_score_stable() {
        let out = diagnose_subsidies(&input(
            &["給湯器", "窓の断熱"],
            "夫婦どちらかが39歳以下",
            "40年以上",
        ))
        .unwrap()
        .result;
        let scores: Vec<u8> = out.matched_subsidies.iter().map(|s| s.match_score).collect();
        assert_eq!(scores, vec![3, 2, 2, 1]);
        // Water heater fired before childcare-eco and keeps that order.
        assert_eq!(out.matched_subsidies[1].name, "給湯省エネ事業");
        assert_eq!(out.matched_subsidies[2].name, "子育てエコホーム支援事業");
        assert_eq!(out.total_estimate, dec!(305));
    }

    #[test]
    fn test_validation_failures() {
        let mut bad = input(&["窓の断熱"], "該当なし", "10年未満");
        bad.prefecture = "".into();
        assert!(matches!(
            diagnose_subsidies(&bad).unwrap_err(),
            DiagnosisError::InvalidInput { ref field, .. } if field == "prefecture"
        ));

        let mut bad = input(&["窓の断熱"], "該当なし", "10年未満");
        bad.building_type = "ビル".into();
        assert!(diagnose_subsidies(&bad).is_err());

        let bad = input(&["窓の断熱"], "該当なし", "築浅");
        assert!(matches!(
            diagnose_subsidies(&bad).unwrap_err(),
            DiagnosisError::InvalidInput { ref field, .. } if field == "buildingAge"
        ));

        let bad = input(&[], "該当なし", "10年未満");
        assert!(diagnose_subsidies(&bad).is_err());

        let bad = input(&["窓の断熱"], "", "10年未満");
        assert!(matches!(
            diagnose_subsidies(&bad).unwrap_err(),
            DiagnosisError::InvalidInput { ref field, .. } if field == "householdType"
        ));
    }
}
