//! Application layer: the allocation engine that settles a batch of orders against the
//! payment method catalog.

pub mod engine;
