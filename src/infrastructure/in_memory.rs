use crate::domain::method::PaymentMethod;
use crate::domain::order::Order;
use crate::domain::ports::RecordSource;
use crate::error::Result;

/// A record source over records that are already in memory.
///
/// Useful for embedding the engine behind another loader and for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    orders: Vec<Order>,
    methods: Vec<PaymentMethod>,
}

impl InMemorySource {
    pub fn new(orders: Vec<Order>, methods: Vec<PaymentMethod>) -> Self {
        Self { orders, methods }
    }
}

impl RecordSource for InMemorySource {
    fn orders(&self) -> Result<Vec<Order>> {
        Ok(self.orders.clone())
    }

    fn methods(&self) -> Result<Vec<PaymentMethod>> {
        Ok(self.methods.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RecordSourceBox;
    use rust_decimal_macros::dec;

    #[test]
    fn test_in_memory_source() {
        let source: RecordSourceBox = Box::new(InMemorySource::new(
            vec![Order::new("ORDER1", dec!(100))],
            vec![PaymentMethod::new("PUNKTY", 15, dec!(100))],
        ));

        assert_eq!(source.orders().unwrap()[0].id, "ORDER1");
        assert_eq!(source.methods().unwrap()[0].id, "PUNKTY");
    }

    #[test]
    fn test_empty_source() {
        let source = InMemorySource::default();
        assert!(source.orders().unwrap().is_empty());
        assert!(source.methods().unwrap().is_empty());
    }
}
