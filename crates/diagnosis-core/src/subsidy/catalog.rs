use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A national subsidy program as listed in the diagnosis.
///
/// Amounts are in 万円. `avg_amount` feeds the aggregate estimate and
/// `match_score` (1-3) only orders the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsidyProgram {
    pub name: &'static str,
    pub max_amount: u32,
    pub amount_text: &'static str,
    pub description: &'static str,
    pub match_score: u8,
    pub avg_amount: u32,
}

impl SubsidyProgram {
    pub fn max_amount(&self) -> Decimal {
        Decimal::from(self.max_amount)
    }

    pub fn avg_amount(&self) -> Decimal {
        Decimal::from(self.avg_amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgramId {
    WindowRenovation,
    WaterHeater,
    ChildcareEco,
    NursingCare,
    LongTermQuality,
}

impl ProgramId {
    pub const ALL: [ProgramId; 5] = [
        ProgramId::WindowRenovation,
        ProgramId::WaterHeater,
        ProgramId::ChildcareEco,
        ProgramId::NursingCare,
        ProgramId::LongTermQuality,
    ];

    pub fn program(&self) -> &'static SubsidyProgram {
        match self {
            ProgramId::WindowRenovation => &WINDOW_RENOVATION,
            ProgramId::WaterHeater => &WATER_HEATER,
            ProgramId::ChildcareEco => &CHILDCARE_ECO,
            ProgramId::NursingCare => &NURSING_CARE,
            ProgramId::LongTermQuality => &LONG_TERM_QUALITY,
        }
    }
}

pub const WINDOW_RENOVATION: SubsidyProgram = SubsidyProgram {
    name: "先進的窓リノベ事業",
    max_amount: 200,
    amount_text: "最大200万円",
    description: "窓の断熱改修向け",
    match_score: 3,
    avg_amount: 100,
};

pub const WATER_HEATER: SubsidyProgram = SubsidyProgram {
    name: "給湯省エネ事業",
    max_amount: 20,
    amount_text: "最大20万円",
    description: "給湯器交換向け",
    match_score: 2,
    avg_amount: 15,
};

pub const CHILDCARE_ECO: SubsidyProgram = SubsidyProgram {
    name: "子育てエコホーム支援事業",
    max_amount: 60,
    amount_text: "最大60万円",
    description: "子育て世帯向け",
    match_score: 2,
    avg_amount: 40,
};

pub const NURSING_CARE: SubsidyProgram = SubsidyProgram {
    name: "介護保険住宅改修",
    max_amount: 18,
    amount_text: "最大18万円（9割支給）",
    description: "介護のための住宅改修",
    match_score: 2,
    avg_amount: 15,
};

pub const LONG_TERM_QUALITY: SubsidyProgram = SubsidyProgram {
    name: "長期優良住宅化リフォーム推進事業",
    max_amount: 250,
    amount_text: "最大250万円",
    description: "住宅の長寿命化・性能向上",
    match_score: 1,
    avg_amount: 150,
};

// Renovation tags and household types the rules look for.
pub const ITEM_WINDOW_INSULATION: &str = "窓の断熱";
pub const ITEM_WATER_HEATER: &str = "給湯器";
pub const ITEM_BARRIER_FREE: &str = "バリアフリー";

pub const HOUSEHOLD_CHILDREN: &str = "18歳未満の子どもがいる";
pub const HOUSEHOLD_YOUNG_COUPLE: &str = "夫婦どちらかが39歳以下";
pub const HOUSEHOLD_CARE_NEEDED: &str = "要介護・要支援の方がいる";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingType {
    Detached,
    Condominium,
}

impl BuildingType {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "戸建て" => Some(BuildingType::Detached),
            "マンション" => Some(BuildingType::Condominium),
            _ => None,
        }
    }
}

/// Building age bands offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildingAge {
    UnderTen,
    TenToTwenty,
    TwentyToThirty,
    ThirtyToForty,
    FortyPlus,
}

impl BuildingAge {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "10年未満" => Some(BuildingAge::UnderTen),
            "10〜20年" => Some(BuildingAge::TenToTwenty),
            "20〜30年" => Some(BuildingAge::TwentyToThirty),
            "30〜40年" => Some(BuildingAge::ThirtyToForty),
            "40年以上" => Some(BuildingAge::FortyPlus),
            _ => None,
        }
    }

    /// Twenty years or older qualifies for the long-term quality program.
    pub fn qualifies_for_long_term_quality(&self) -> bool {
        *self >= BuildingAge::TwentyToThirty
    }
}
