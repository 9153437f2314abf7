//! Brand-tagged result records handed from an engine to the result view.
//!
//! The JSON form is a flattened result plus a `brand` field, e.g.
//! `{"brand":"flip","judgment":{...},"mao":{...},...}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DiagnosisError;
use crate::types::ComputationOutput;
use crate::DiagnosisResult;

#[cfg(feature = "flip")]
use crate::flip::mao::{calculate_mao, MaoInput, MaoResult};
#[cfg(feature = "kominka")]
use crate::kominka::yield_calc::{calculate_yield, YieldInput, YieldResult};
#[cfg(feature = "legacy")]
use crate::legacy::choice::{diagnose_choice_strict, ChoiceInput, ChoiceResult};
#[cfg(feature = "subsidy")]
use crate::subsidy::diagnosis::{diagnose_subsidies, SubsidyInput, SubsidyResult};

/// Site brand, which picks both the engine and the result view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    Flip,
    Subsidy,
    Kominka,
    Legacy,
}

impl Brand {
    pub const ALL: [Brand; 4] = [Brand::Flip, Brand::Subsidy, Brand::Kominka, Brand::Legacy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Flip => "flip",
            Brand::Subsidy => "subsidy",
            Brand::Kominka => "kominka",
            Brand::Legacy => "legacy",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Brand {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Brand::ALL
            .into_iter()
            .find(|b| b.as_str() == s.trim())
            .ok_or_else(|| DiagnosisError::invalid("brand", format!("Unknown brand '{s}'")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "brand", rename_all = "lowercase")]
pub enum DiagnosisRecord {
    #[cfg(feature = "flip")]
    Flip(MaoResult),
    #[cfg(feature = "subsidy")]
    Subsidy(SubsidyResult),
    #[cfg(feature = "kominka")]
    Kominka(YieldResult),
    #[cfg(feature = "legacy")]
    Legacy(ChoiceResult),
}

impl DiagnosisRecord {
    pub fn brand(&self) -> Brand {
        match self {
            #[cfg(feature = "flip")]
            DiagnosisRecord::Flip(_) => Brand::Flip,
            #[cfg(feature = "subsidy")]
            DiagnosisRecord::Subsidy(_) => Brand::Subsidy,
            #[cfg(feature = "kominka")]
            DiagnosisRecord::Kominka(_) => Brand::Kominka,
            #[cfg(feature = "legacy")]
            DiagnosisRecord::Legacy(_) => Brand::Legacy,
        }
    }

    pub fn to_json(&self) -> DiagnosisResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> DiagnosisResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(feature = "flip")]
impl From<MaoResult> for DiagnosisRecord {
    fn from(result: MaoResult) -> Self {
        DiagnosisRecord::Flip(result)
    }
}

#[cfg(feature = "subsidy")]
impl From<SubsidyResult> for DiagnosisRecord {
    fn from(result: SubsidyResult) -> Self {
        DiagnosisRecord::Subsidy(result)
    }
}

#[cfg(feature = "kominka")]
impl From<YieldResult> for DiagnosisRecord {
    fn from(result: YieldResult) -> Self {
        DiagnosisRecord::Kominka(result)
    }
}

#[cfg(feature = "legacy")]
impl From<ChoiceResult> for DiagnosisRecord {
    fn from(result: ChoiceResult) -> Self {
        DiagnosisRecord::Legacy(result)
    }
}

/// Run the engine for `brand` on raw JSON input and tag the result.
///
/// The choice engine runs in strict mode here: all ten answers are required.
pub fn diagnose(
    brand: Brand,
    input: serde_json::Value,
) -> DiagnosisResult<ComputationOutput<DiagnosisRecord>> {
    tracing::debug!(%brand, "dispatching diagnosis");
    match brand {
        #[cfg(feature = "flip")]
        Brand::Flip => {
            let input: MaoInput = serde_json::from_value(input)?;
            Ok(calculate_mao(&input)?.map(DiagnosisRecord::from))
        }
        #[cfg(feature = "subsidy")]
        Brand::Subsidy => {
            let input: SubsidyInput = serde_json::from_value(input)?;
            Ok(diagnose_subsidies(&input)?.map(DiagnosisRecord::from))
        }
        #[cfg(feature = "kominka")]
        Brand::Kominka => {
            let input: YieldInput = serde_json::from_value(input)?;
            Ok(calculate_yield(&input)?.map(DiagnosisRecord::from))
        }
        #[cfg(feature = "legacy")]
        Brand::Legacy => {
            let input: ChoiceInput = serde_json::from_value(input)?;
            Ok(diagnose_choice_strict(&input)?.map(DiagnosisRecord::from))
        }
        #[allow(unreachable_patterns)]
        other => Err(DiagnosisError::invalid(
            "brand",
            format!("Brand '{other}' is not enabled in this build"),
        )),
    }
}

#[cfg(all(test, feature = "full"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_brand_round_trip_str() {
        for brand in Brand::ALL {
            assert_eq!(brand.as_str().parse::<Brand>().unwrap(), brand);
        }
        assert!("agent".parse::<Brand>().is_err());
    }

    #[test]
    fn test_flip_record_carries_brand() {
        let out = diagnose(
            Brand::Flip,
            json!({ "arv": 3000, "rehabCost": 300, "listPrice": 1800, "contingencyRate": 0.15 }),
        )
        .unwrap();
        let value = serde_json::to_value(&out.result).unwrap();
        assert_eq!(value["brand"], "flip");
        assert_eq!(value["judgment"]["id"], "NEGOTIATE");
        assert_eq!(value["targetPrice"], json!(1755.0));
        assert_eq!(value["mao"]["mao70"], json!(1755.0));
    }

    #[test]
    fn test_bad_input_shape_is_serialization_error() {
        let err = diagnose(Brand::Kominka, json!({ "monthlyRent": 10 })).unwrap_err();
        assert!(matches!(err, DiagnosisError::SerializationError(_)));
    }

    #[test]
    fn test_legacy_dispatch_is_strict() {
        let err = diagnose(Brand::Legacy, json!({ "q1": "ある" })).unwrap_err();
        assert!(matches!(
            err,
            DiagnosisError::InvalidInput { ref field, .. } if field == "q2"
        ));
    }
}
