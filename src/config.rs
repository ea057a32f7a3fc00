use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Id of the loyalty-points method every catalog has to provide.
pub const POINTS_METHOD_ID: &str = "PUNKTY";

/// Tunables of the allocation engine.
///
/// The defaults reproduce the reference behaviour; the CLI exposes each field as a flag.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Id of the points method. Orders without promotions are eligible for this method only.
    pub points_method: String,
    /// The greedy pass only uses methods whose discount is strictly above this percentage.
    pub promo_threshold: i32,
    /// Share of an order's value that must be paid with points to earn the mixed-payment rate.
    pub min_points_share: Decimal,
}

impl EngineConfig {
    /// Share left for the lowest-discount method in a mixed payment.
    pub fn remainder_share(&self) -> Decimal {
        Decimal::ONE - self.min_points_share
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            points_method: POINTS_METHOD_ID.to_string(),
            promo_threshold: 10,
            min_points_share: dec!(0.10),
        }
    }
}
