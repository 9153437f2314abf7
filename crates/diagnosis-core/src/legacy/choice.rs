use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use super::questions::{question, Category, QUESTIONS};
use crate::error::DiagnosisError;
use crate::types::{with_metadata, ComputationOutput};
use crate::DiagnosisResult;

/// Largest lead over the runner-up that still counts as a close call.
const HYBRID_MARGIN: u32 = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Answers keyed by question id (`q1`..`q10`). Missing keys score nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceInput {
    pub answers: BTreeMap<String, String>,
}

impl ChoiceInput {
    pub fn answer(&self, id: &str) -> Option<&str> {
        self.answers
            .get(id)
            .map(String::as_str)
            .filter(|a| !a.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ChoiceInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ChoiceInput {
            answers: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceScores {
    pub sell: u32,
    pub rent: u32,
    pub keep: u32,
}

impl ChoiceScores {
    fn add(&mut self, category: Category, points: u32) {
        match category {
            Category::Sell => self.sell += points,
            Category::Rent => self.rent += points,
            Category::Keep => self.keep += points,
        }
    }

    /// Scores in priority order: sell, rent, keep.
    pub fn ranked(&self) -> [(Category, u32); 3] {
        [
            (Category::Sell, self.sell),
            (Category::Rent, self.rent),
            (Category::Keep, self.keep),
        ]
    }

    pub fn total(&self) -> u32 {
        self.sell + self.rent + self.keep
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisType {
    Sell,
    Rent,
    Keep,
    /// No category leads by more than two points
    Hybrid,
}

impl From<Category> for DiagnosisType {
    fn from(category: Category) -> Self {
        match category {
            Category::Sell => DiagnosisType::Sell,
            Category::Rent => DiagnosisType::Rent,
            Category::Keep => DiagnosisType::Keep,
        }
    }
}

impl DiagnosisType {
    pub fn title(&self) -> &'static str {
        match self {
            DiagnosisType::Sell => "「手放す」ことで、前に進めるかもしれません",
            DiagnosisType::Rent => "「活かしながら持つ」という選択肢があります",
            DiagnosisType::Keep => "今は「持ち続ける」という選択も、正解です",
            DiagnosisType::Hybrid => "選択肢は、一つではありません",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DiagnosisType::Sell => {
                "今のあなたの状況では、実家を売却することで、経済的にも心理的にも整理がつきやすいかもしれません。\n\n売却は「諦める」ことではなく、「次のステップに進む」選択です。"
            }
            DiagnosisType::Rent => {
                "所有権を手放さず、誰かに住んでもらうことで、実家を活かし続けることができます。\n\n将来の選択肢を残しながら、収入を得ることも可能です。"
            }
            DiagnosisType::Keep => {
                "無理に決断を急ぐ必要はありません。\n\n思い入れのある実家を、もう少し持ち続けることで見えてくるものもあります。"
            }
            DiagnosisType::Hybrid => {
                "あなたの状況では、複数の選択肢が考えられます。\n\nそれぞれのメリット・デメリットを比較しながら、ゆっくり考えていきましょう。"
            }
        }
    }

    pub fn next_actions(&self) -> [&'static str; 3] {
        match self {
            DiagnosisType::Sell => [
                "実家の査定を依頼してみる",
                "相続登記が済んでいるか確認",
                "兄弟姉妹と方針を共有する",
            ],
            DiagnosisType::Rent => [
                "賃貸需要を調査する",
                "賃貸物件として貸し出せる状態か確認",
                "管理会社に相談してみる",
            ],
            DiagnosisType::Keep => [
                "定期的な管理計画を立てる",
                "維持費用の見積もりを出す",
                "将来的な活用方法を家族で話し合う",
            ],
            DiagnosisType::Hybrid => [
                "各選択肢のメリット・デメリットを整理",
                "専門家に相談して客観的な意見を聞く",
                "期限を決めて再度検討する",
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceResult {
    pub diagnosis_type: DiagnosisType,
    pub title: String,
    pub message: String,
    pub next_actions: Vec<String>,
    pub scores: ChoiceScores,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score the answers and resolve a diagnosis type.
///
/// Partial answer sets are accepted; see [`diagnose_choice_strict`] for the
/// variant that requires all ten.
pub fn diagnose_choice(input: &ChoiceInput) -> DiagnosisResult<ComputationOutput<ChoiceResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let unanswered: Vec<String> = QUESTIONS
        .iter()
        .filter(|q| input.answer(q.id).is_none())
        .map(|q| q.id.to_uppercase())
        .collect();
    if !unanswered.is_empty() {
        warnings.push(format!(
            "未回答の質問は0点として扱いました: {}",
            unanswered.join(", ")
        ));
    }

    let scores = score_answers(input, &mut warnings);
    let diagnosis_type = resolve(&scores);

    tracing::debug!(
        sell = scores.sell,
        rent = scores.rent,
        keep = scores.keep,
        diagnosis = ?diagnosis_type,
        "choice diagnosis"
    );

    let output = ChoiceResult {
        diagnosis_type,
        title: diagnosis_type.title().to_string(),
        message: diagnosis_type.message().to_string(),
        next_actions: diagnosis_type
            .next_actions()
            .iter()
            .map(|a| a.to_string())
            .collect(),
        scores,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Inherited Home Choice Diagnosis (weighted answer points)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Same as [`diagnose_choice`], but every question must be answered.
pub fn diagnose_choice_strict(
    input: &ChoiceInput,
) -> DiagnosisResult<ComputationOutput<ChoiceResult>> {
    validate_complete(input)?;
    diagnose_choice(input)
}

/// Fails on the first unanswered question, in question order.
pub fn validate_complete(input: &ChoiceInput) -> DiagnosisResult<()> {
    for q in &QUESTIONS {
        if input.answer(q.id).is_none() {
            return Err(DiagnosisError::invalid(
                q.id,
                format!("質問{}に回答してください", q.id.to_uppercase()),
            ));
        }
    }
    Ok(())
}

/// Resolve scores into a type.
///
/// A lead of two points or less over the runner-up is a hybrid; otherwise
/// the first category holding the maximum, in sell / rent / keep order.
pub fn resolve(scores: &ChoiceScores) -> DiagnosisType {
    let ranked = scores.ranked();
    let mut values: Vec<u32> = ranked.iter().map(|(_, s)| *s).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    let (max_score, second_score) = (values[0], values[1]);

    if max_score - second_score <= HYBRID_MARGIN {
        return DiagnosisType::Hybrid;
    }

    ranked
        .iter()
        .find(|(_, s)| *s == max_score)
        .map(|(c, _)| DiagnosisType::from(*c))
        .unwrap_or(DiagnosisType::Hybrid)
}

fn score_answers(input: &ChoiceInput, warnings: &mut Vec<String>) -> ChoiceScores {
    let mut scores = ChoiceScores::default();

    for (id, answer) in &input.answers {
        let Some(q) = question(id) else {
            warnings.push(format!("不明な質問ID「{id}」は無視しました"));
            continue;
        };
        if answer.is_empty() {
            continue;
        }
        match q.option(answer) {
            Some(option) => {
                if let Some((category, points)) = option.award {
                    tracing::trace!(question = q.id, ?category, points, "choice points");
                    scores.add(category, points);
                }
            }
            None => warnings.push(format!(
                "回答「{answer}」は{}の選択肢にないため0点として扱いました",
                q.id.to_uppercase()
            )),
        }
    }

    scores
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> ChoiceInput {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn all_sell() -> ChoiceInput {
        answers(&[
            ("q1", "ないと思う"),
            ("q2", "難しい"),
            ("q3", "はい"),
            ("q4", "なさそう"),
            ("q5", "3人以上"),
            ("q6", "整理がついている"),
            ("q7", "40年以上"),
            ("q8", "ほとんどない"),
            ("q9", "ないと思う"),
            ("q10", "早く決着をつけたい"),
        ])
    }

    #[test]
    fn test_all_sell_answers() {
        let out = diagnose_choice(&all_sell()).unwrap().result;
        // 2+2+2+1+2+1+1+1+1+1
        assert_eq!(out.scores, ChoiceScores { sell: 14, rent: 0, keep: 0 });
        assert_eq!(out.diagnosis_type, DiagnosisType::Sell);
        assert_eq!(out.title, "「手放す」ことで、前に進めるかもしれません");
        assert_eq!(out.next_actions.len(), 3);
    }

    #[test]
    fn test_keep_leaning_answers() {
        let input = answers(&[
            ("q1", "ある"),
            ("q2", "できる"),
            ("q3", "いいえ"),
            ("q4", "分からない"),
            ("q5", "自分だけ"),
            ("q6", "抵抗がある"),
            ("q7", "20年未満"),
            ("q8", "年に数回以上"),
            ("q9", "あるかもしれない"),
            ("q10", "じっくり考えたい"),
        ]);
        let out = diagnose_choice(&input).unwrap().result;
        assert_eq!(out.scores, ChoiceScores { sell: 0, rent: 0, keep: 9 });
        assert_eq!(out.diagnosis_type, DiagnosisType::Keep);
    }

    #[test]
    fn test_resolve_hybrid_on_tie() {
        let scores = ChoiceScores { sell: 5, rent: 3, keep: 5 };
        assert_eq!(resolve(&scores), DiagnosisType::Hybrid);
    }

    #[test]
    fn test_resolve_margin_boundaries() {
        assert_eq!(
            resolve(&ChoiceScores { sell: 6, rent: 4, keep: 0 }),
            DiagnosisType::Hybrid
        );
        assert_eq!(
            resolve(&ChoiceScores { sell: 1, rent: 4, keep: 0 }),
            DiagnosisType::Rent
        );
        assert_eq!(
            resolve(&ChoiceScores { sell: 0, rent: 0, keep: 0 }),
            DiagnosisType::Hybrid
        );
    }

    #[test]
    fn test_partial_answers_accepted_with_warning() {
        let input = answers(&[("q4", "ありそう"), ("q2", "誰かに頼めばできる")]);
        let result = diagnose_choice(&input).unwrap();
        assert_eq!(result.result.scores.rent, 3);
        assert_eq!(result.result.diagnosis_type, DiagnosisType::Rent);
        assert!(result.warnings.iter().any(|w| w.starts_with("未回答")));
    }

    #[test]
    fn test_strict_requires_every_answer() {
        let mut input = all_sell();
        input.answers.remove("q7");
        match diagnose_choice_strict(&input).unwrap_err() {
            DiagnosisError::InvalidInput { field, reason } => {
                assert_eq!(field, "q7");
                assert_eq!(reason, "質問Q7に回答してください");
            }
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
        assert!(diagnose_choice_strict(&all_sell()).is_ok());
    }

    #[test]
    fn test_empty_answer_counts_as_missing() {
        let mut input = all_sell();
        input.answers.insert("q1".into(), String::new());
        assert!(validate_complete(&input).is_err());
        assert_eq!(diagnose_choice(&input).unwrap().result.scores.sell, 12);
    }

    #[test]
    fn test_unknown_option_scores_zero() {
        let input = answers(&[("q1", "たぶん"), ("q99", "はい")]);
        let result = diagnose_choice(&input).unwrap();
        assert_eq!(result.result.scores.total(), 0);
        assert!(result.warnings.iter().any(|w| w.contains("Q1の選択肢にない")));
        assert!(result.warnings.iter().any(|w| w.contains("q99")));
    }

    #[test]
    fn test_input_serializes_as_flat_map() {
        let input = answers(&[("q1", "ある")]);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({ "q1": "ある" }));
    }
}
