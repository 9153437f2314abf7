use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Monetary amounts, in 万円 throughout.
pub type Money = Decimal;

/// Rates expressed as decimals (0.15 = 15%).
pub type Rate = Decimal;

/// Percentages expressed on a 0-100 scale (9.7 = 9.7%).
pub type Percent = Decimal;

/// Year counts
pub type Years = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

impl<T: Serialize> ComputationOutput<T> {
    /// Transform the result while keeping warnings and metadata.
    pub fn map<U: Serialize>(self, f: impl FnOnce(T) -> U) -> ComputationOutput<U> {
        ComputationOutput {
            result: f(self.result),
            methodology: self.methodology,
            assumptions: self.assumptions,
            warnings: self.warnings,
            metadata: self.metadata,
        }
    }
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Round to one decimal place, midpoints away from zero.
///
/// Callers only pass non-negative values, where this is the usual
/// round-half-up used for displayed yields.
pub fn round_one_decimal(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Floor to an integral amount. Negative values move further from zero.
pub fn floor_amount(value: Decimal) -> Decimal {
    value.floor().normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_one_decimal_half_up() {
        assert_eq!(round_one_decimal(dec!(11.428571)), dec!(11.4));
        assert_eq!(round_one_decimal(dec!(9.714285)), dec!(9.7));
        assert_eq!(round_one_decimal(dec!(2.25)), dec!(2.3));
        assert_eq!(round_one_decimal(dec!(8)), dec!(8));
    }

    #[test]
    fn test_floor_amount_negative_moves_down() {
        assert_eq!(floor_amount(dec!(1755.0)), dec!(1755));
        assert_eq!(floor_amount(dec!(1347.5)), dec!(1347));
        assert_eq!(floor_amount(dec!(-12.5)), dec!(-13));
    }
}
