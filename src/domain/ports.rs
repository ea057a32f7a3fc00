use super::method::PaymentMethod;
use super::order::Order;
use crate::error::Result;

/// Supplies the two record sets a run works on.
///
/// Implementations either hand back fully deserialized records or fail before the engine is
/// ever constructed.
pub trait RecordSource {
    fn orders(&self) -> Result<Vec<Order>>;
    fn methods(&self) -> Result<Vec<PaymentMethod>>;
}

pub type RecordSourceBox = Box<dyn RecordSource>;
