use crate::domain::method::PaymentMethod;
use crate::domain::order::Order;
use crate::domain::ports::RecordSource;
use crate::error::{AllocationError, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Reads a JSON array of records from any `Read` source.
pub struct JsonRecordReader<R: Read> {
    source: R,
}

impl<R: Read> JsonRecordReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Deserializes the whole array. Any malformed record fails the read.
    pub fn records<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        serde_json::from_reader(self.source).map_err(AllocationError::from)
    }
}

/// Loads orders and payment methods from two JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    orders_path: PathBuf,
    methods_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(orders_path: impl Into<PathBuf>, methods_path: impl Into<PathBuf>) -> Self {
        Self {
            orders_path: orders_path.into(),
            methods_path: methods_path.into(),
        }
    }

    fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let file = File::open(path).map_err(|source| AllocationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        JsonRecordReader::new(BufReader::new(file))
            .records()
            .map_err(|e| match e {
                AllocationError::JsonStream(source) => AllocationError::Json {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })
    }
}

impl RecordSource for JsonFileSource {
    fn orders(&self) -> Result<Vec<Order>> {
        Self::load(&self.orders_path)
    }

    fn methods(&self) -> Result<Vec<PaymentMethod>> {
        Self::load(&self.methods_path)
    }
}
