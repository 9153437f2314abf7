use serde::{Deserialize, Serialize};

/// The three competing outcomes points are awarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sell,
    Rent,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOption {
    pub label: &'static str,
    /// Points this answer adds, if any
    pub award: Option<(Category, u32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [AnswerOption],
}

impl Question {
    pub fn option(&self, label: &str) -> Option<&'static AnswerOption> {
        self.options.iter().find(|o| o.label == label)
    }
}

const fn award(label: &'static str, category: Category, points: u32) -> AnswerOption {
    AnswerOption {
        label,
        award: Some((category, points)),
    }
}

const fn neutral(label: &'static str) -> AnswerOption {
    AnswerOption { label, award: None }
}

pub const QUESTIONS: [Question; 10] = [
    Question {
        id: "q1",
        text: "実家に、今後ご自身やご家族が住む可能性はありますか？",
        options: &[
            award("ある", Category::Keep, 2),
            award("ないと思う", Category::Sell, 2),
            neutral("分からない"),
        ],
    },
    Question {
        id: "q2",
        text: "実家の維持管理（掃除・換気・草刈り等）を続けることは可能ですか？",
        options: &[
            award("できる", Category::Keep, 1),
            award("難しい", Category::Sell, 2),
            award("誰かに頼めばできる", Category::Rent, 1),
        ],
    },
    Question {
        id: "q3",
        text: "まとまった資金（介護費用・老後資金等）が必要な状況ですか？",
        options: &[
            award("はい", Category::Sell, 2),
            neutral("いいえ"),
            award("近い将来必要になりそう", Category::Sell, 1),
        ],
    },
    Question {
        id: "q4",
        text: "実家のある地域に、賃貸の需要はありそうですか？",
        options: &[
            award("ありそう", Category::Rent, 2),
            award("なさそう", Category::Sell, 1),
            neutral("分からない"),
        ],
    },
    Question {
        id: "q5",
        text: "相続人（兄弟姉妹等）は何人いますか？",
        options: &[
            neutral("自分だけ"),
            award("2人", Category::Sell, 1),
            award("3人以上", Category::Sell, 2),
        ],
    },
    Question {
        id: "q6",
        text: "実家を手放すことへの心理的な抵抗は？",
        options: &[
            award("抵抗がある", Category::Keep, 2),
            award("整理がついている", Category::Sell, 1),
            neutral("どちらとも言えない"),
        ],
    },
    Question {
        id: "q7",
        text: "実家の築年数は？",
        options: &[
            neutral("20年未満"),
            neutral("20〜40年"),
            award("40年以上", Category::Sell, 1),
        ],
    },
    Question {
        id: "q8",
        text: "実家に帰省する頻度は？",
        options: &[
            award("年に数回以上", Category::Keep, 1),
            award("ほとんどない", Category::Sell, 1),
        ],
    },
    Question {
        id: "q9",
        text: "将来、お子さんやお孫さんが使う可能性は？",
        options: &[
            award("あるかもしれない", Category::Keep, 2),
            award("ないと思う", Category::Sell, 1),
            award("分からない", Category::Rent, 1),
        ],
    },
    Question {
        id: "q10",
        text: "今の気持ちに最も近いものは？",
        options: &[
            award("早く決着をつけたい", Category::Sell, 1),
            award("じっくり考えたい", Category::Keep, 1),
            neutral("何から始めればいいか分からない"),
        ],
    },
];

pub fn question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_q1_to_q10_in_order() {
        for (i, q) in QUESTIONS.iter().enumerate() {
            assert_eq!(q.id, format!("q{}", i + 1));
        }
    }

    #[test]
    fn test_option_lookup() {
        let q2 = question("q2").unwrap();
        assert_eq!(
            q2.option("誰かに頼めばできる").unwrap().award,
            Some((Category::Rent, 1))
        );
        assert!(q2.option("分からない").is_none());
        assert!(question("q11").is_none());
    }

    #[test]
    fn test_max_points_per_question() {
        for q in &QUESTIONS {
            for o in q.options {
                if let Some((_, points)) = o.award {
                    assert!((1..=2).contains(&points), "{} / {}", q.id, o.label);
                }
            }
        }
    }
}
