use crate::error::{AllocationError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};

/// A payment channel with a discount rate and a spending limit.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentMethod {
    pub id: String,
    /// Discount in whole percent.
    #[serde(deserialize_with = "deserialize_percent")]
    pub discount: i32,
    /// Initial spendable budget.
    pub limit: Decimal,
}

impl PaymentMethod {
    pub fn new(id: impl Into<String>, discount: i32, limit: Decimal) -> Self {
        Self {
            id: id.into(),
            discount,
            limit,
        }
    }

    /// Price of `value` after this method's discount.
    pub fn discounted(&self, value: Decimal) -> Decimal {
        value * (Decimal::ONE - Decimal::from(self.discount) / dec!(100))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Percent {
    Number(i32),
    Text(String),
}

fn deserialize_percent<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match Percent::deserialize(deserializer)? {
        Percent::Number(n) => Ok(n),
        Percent::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// The method catalog as the engine sees it.
///
/// Keeps the methods sorted by discount descending (stable, so ties keep catalog order) and
/// resolves the two methods the engine refers to by role: the points method and the
/// lowest-discount fallback, which is the last method of that ordering.
#[derive(Debug, Clone)]
pub struct MethodCatalog {
    by_discount: Vec<PaymentMethod>,
    points: usize,
}

impl MethodCatalog {
    pub fn new(methods: &[PaymentMethod], points_method: &str) -> Result<Self> {
        if methods.is_empty() {
            return Err(AllocationError::EmptyCatalog);
        }

        let mut by_discount = methods.to_vec();
        by_discount.sort_by(|a, b| b.discount.cmp(&a.discount));

        let points = by_discount
            .iter()
            .position(|m| m.id == points_method)
            .ok_or_else(|| AllocationError::MissingPointsMethod(points_method.to_string()))?;

        Ok(Self {
            by_discount,
            points,
        })
    }

    /// All methods, highest discount first.
    pub fn by_discount(&self) -> &[PaymentMethod] {
        &self.by_discount
    }

    pub fn points(&self) -> &PaymentMethod {
        &self.by_discount[self.points]
    }

    /// The universal fallback payer.
    pub fn lowest(&self) -> &PaymentMethod {
        // non-empty is checked in `new`
        &self.by_discount[self.by_discount.len() - 1]
    }
}
