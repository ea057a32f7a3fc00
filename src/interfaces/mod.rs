//! Adapters between the engine and the outside world: the JSON loader and the report writer.

pub mod json;
pub mod report;
