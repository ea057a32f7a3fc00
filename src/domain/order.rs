use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single purchase to be paid for.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    /// Unique identifier within a batch.
    pub id: String,
    /// Undiscounted price.
    pub value: Decimal,
    /// Ids of the promotional methods this order may be paid with.
    ///
    /// `None` means the order declared no promotions; see
    /// [`Eligibility`](crate::domain::eligibility::Eligibility) for the default applied then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotions: Option<Vec<String>>,
}

impl Order {
    pub fn new(id: impl Into<String>, value: Decimal) -> Self {
        Self {
            id: id.into(),
            value,
            promotions: None,
        }
    }

    pub fn with_promotions<I, S>(mut self, promotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.promotions = Some(promotions.into_iter().map(Into::into).collect());
        self
    }
}

/// Returns the orders sorted by value ascending. Equal values keep their input order.
pub fn by_value_ascending(orders: &[Order]) -> Vec<&Order> {
    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by(|a, b| a.value.cmp(&b.value));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_deserialization_without_promotions() {
        let order: Order = serde_json::from_str(r#"{"id": "ORDER4", "value": "50.00"}"#).unwrap();
        assert_eq!(order.id, "ORDER4");
        assert_eq!(order.value, dec!(50.00));
        assert_eq!(order.promotions, None);
    }

    #[test]
    fn test_order_deserialization_numeric_value() {
        let order: Order =
            serde_json::from_str(r#"{"id": "ORDER1", "value": 150.25, "promotions": ["mZysk"]}"#)
                .unwrap();
        assert_eq!(order.value, dec!(150.25));
        assert_eq!(order.promotions, Some(vec!["mZysk".to_string()]));
    }

    #[test]
    fn test_by_value_ascending_is_stable() {
        let orders = vec![
            Order::new("A", dec!(20)),
            Order::new("B", dec!(10)),
            Order::new("C", dec!(20)),
            Order::new("D", dec!(5)),
        ];
        let ids: Vec<&str> = by_value_ascending(&orders)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["D", "B", "A", "C"]);
    }
}
