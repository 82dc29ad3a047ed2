//! Error types for the accumulation engine and the CSV boundary

use crate::claims::ProductType;
use thiserror::Error;

/// Failures raised by the accumulator and the triangle builder
#[derive(Debug, Error)]
pub enum CumulativeError {
    /// Input collection absent, or holding a value the engine cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Triangle builder given an empty accumulated set
    #[error("Cannot build a triangle from an empty set of cumulative claims")]
    EmptyInput,

    /// A lineage broke the development invariants
    #[error("Malformed lineage {product_type:?} {origin_year}/{development_year}: {reason}")]
    MalformedLineage {
        product_type: ProductType,
        origin_year: i32,
        development_year: i32,
        reason: String,
    },
}

impl CumulativeError {
    pub(crate) fn malformed(
        product_type: ProductType,
        origin_year: i32,
        development_year: i32,
        reason: impl Into<String>,
    ) -> Self {
        CumulativeError::MalformedLineage {
            product_type,
            origin_year,
            development_year,
            reason: reason.into(),
        }
    }
}

/// Failures reading incremental claims or writing a triangle
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("Failed to read claims CSV (line {line:?}): {source}")]
    FailedToRead {
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    #[error("Unknown product type {label:?} on line {line:?}")]
    UnknownProductType { line: Option<u64>, label: String },

    #[error("Failed to write triangle CSV: {0}")]
    FailedToWrite(#[source] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
