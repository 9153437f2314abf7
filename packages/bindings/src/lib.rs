use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use diagnosis_core::handoff::{self, Brand, DiagnosisRecord};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Flip
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_mao(input_json: String) -> NapiResult<String> {
    let input: diagnosis_core::flip::mao::MaoInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = diagnosis_core::flip::mao::calculate_mao(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Subsidy
// ---------------------------------------------------------------------------

#[napi]
pub fn diagnose_subsidies(input_json: String) -> NapiResult<String> {
    let input: diagnosis_core::subsidy::diagnosis::SubsidyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        diagnosis_core::subsidy::diagnosis::diagnose_subsidies(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// The printable checklist for a subsidy result; null when nothing matched.
#[napi]
pub fn subsidy_sheet(result_json: String) -> NapiResult<Option<String>> {
    let result: diagnosis_core::subsidy::diagnosis::SubsidyResult =
        serde_json::from_str(&result_json).map_err(to_napi_error)?;
    Ok(diagnosis_core::report::subsidy::subsidy_sheet(&result))
}

// ---------------------------------------------------------------------------
// Kominka
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_yield(input_json: String) -> NapiResult<String> {
    let input: diagnosis_core::kominka::yield_calc::YieldInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        diagnosis_core::kominka::yield_calc::calculate_yield(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_yield_scenarios(input_json: String) -> NapiResult<String> {
    let input: diagnosis_core::kominka::scenarios::ScenarioComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        diagnosis_core::kominka::scenarios::compare_scenarios(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn estimate_other_expenses(acquisition_price: f64) -> NapiResult<f64> {
    let price = Decimal::try_from(acquisition_price).map_err(to_napi_error)?;
    diagnosis_core::kominka::yield_calc::estimate_other_expenses(price)
        .to_f64()
        .ok_or_else(|| napi::Error::from_reason("estimate out of range"))
}

// ---------------------------------------------------------------------------
// Legacy
// ---------------------------------------------------------------------------

/// Requires all ten answers.
#[napi]
pub fn diagnose_choice(input_json: String) -> NapiResult<String> {
    let input: diagnosis_core::legacy::choice::ChoiceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        diagnosis_core::legacy::choice::diagnose_choice_strict(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Scores whatever was answered; gaps come back as warnings.
#[napi]
pub fn diagnose_choice_partial(input_json: String) -> NapiResult<String> {
    let input: diagnosis_core::legacy::choice::ChoiceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = diagnosis_core::legacy::choice::diagnose_choice(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn choice_guide(diagnosis_type: String) -> NapiResult<String> {
    let parsed: diagnosis_core::legacy::choice::DiagnosisType =
        serde_json::from_value(serde_json::Value::String(diagnosis_type))
            .map_err(to_napi_error)?;
    Ok(diagnosis_core::legacy::guides::detailed_guide(parsed).to_string())
}

// ---------------------------------------------------------------------------
// Handoff
// ---------------------------------------------------------------------------

/// Run the engine for `brand` and return the brand-tagged record envelope.
#[napi]
pub fn diagnose_record(brand: String, input_json: String) -> NapiResult<String> {
    let brand: Brand = brand.parse().map_err(to_napi_error)?;
    let input: serde_json::Value = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = handoff::diagnose(brand, input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Text report for a stored record, dispatched on its `brand`.
#[napi]
pub fn render_record(record_json: String) -> NapiResult<String> {
    let record = DiagnosisRecord::from_json(&record_json).map_err(to_napi_error)?;
    Ok(diagnosis_core::report::render_record(&record))
}
