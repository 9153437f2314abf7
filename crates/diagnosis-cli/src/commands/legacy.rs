use clap::Args;
use serde_json::{json, Value};
use std::path::Path;

use diagnosis_core::legacy::choice::{self, ChoiceInput};
use diagnosis_core::legacy::questions::QUESTIONS;

use crate::input;

/// Arguments for the inherited home choice diagnosis
#[derive(Args)]
pub struct LegacyArgs {
    /// Path to JSON file mapping q1..q10 to answers (overrides --answer)
    #[arg(long)]
    pub input: Option<String>,

    /// One answer, e.g. --answer q1=ある (repeatable)
    #[arg(long = "answer", value_name = "QID=ANSWER")]
    pub answers: Vec<String>,

    /// Score unanswered questions as zero instead of failing
    #[arg(long)]
    pub allow_partial: bool,
}

pub fn run_legacy(
    args: LegacyArgs,
    store: Option<&Path>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let choice_input: ChoiceInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => parse_answers(&args.answers)?,
    };

    let result = if args.allow_partial {
        choice::diagnose_choice(&choice_input)?
    } else {
        choice::diagnose_choice_strict(&choice_input)?
    };
    super::persist(store, result.result.clone().into())?;
    Ok(serde_json::to_value(result)?)
}

/// The question catalog with each question's allowed answers.
pub fn run_questions() -> Result<Value, Box<dyn std::error::Error>> {
    let catalog: Vec<Value> = QUESTIONS
        .iter()
        .map(|q| {
            let options: Vec<&str> = q.options.iter().map(|o| o.label).collect();
            json!({ "id": q.id, "text": q.text, "options": options })
        })
        .collect();
    Ok(Value::Array(catalog))
}

fn parse_answers(raw: &[String]) -> Result<ChoiceInput, Box<dyn std::error::Error>> {
    let mut parsed = ChoiceInput::default();
    for pair in raw {
        let (id, answer) = pair
            .split_once('=')
            .ok_or_else(|| format!("--answer expects QID=ANSWER, got '{pair}'"))?;
        parsed
            .answers
            .insert(id.trim().to_string(), answer.trim().to_string());
    }
    Ok(parsed)
}
