//! Domain layer: the records a run works on, the eligibility rule and the payment ledger.

pub mod eligibility;
pub mod ledger;
pub mod method;
pub mod order;
pub mod ports;
