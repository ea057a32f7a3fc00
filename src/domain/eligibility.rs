use super::method::PaymentMethod;
use super::order::Order;

/// Decides whether a method may settle an order.
///
/// An order that declared no promotions is eligible for the default method only, which is the
/// points method.
#[derive(Debug, Clone)]
pub struct Eligibility {
    default_method: String,
}

impl Eligibility {
    pub fn new(default_method: impl Into<String>) -> Self {
        Self {
            default_method: default_method.into(),
        }
    }

    pub fn supports(&self, order: &Order, method: &PaymentMethod) -> bool {
        match &order.promotions {
            Some(promotions) => promotions.iter().any(|id| *id == method.id),
            None => method.id == self.default_method,
        }
    }
}
