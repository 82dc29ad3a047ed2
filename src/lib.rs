//! Claims Triangle - cumulative development triangles from incremental claims
//!
//! This library provides:
//! - Incremental claim records and CSV loading
//! - Accumulation into cumulative lineages, carrying values over missing development years
//! - Development triangles aligned across product types, with CSV output

pub mod claims;
pub mod cumulative;
pub mod error;
pub mod triangle;

// Re-export commonly used types
pub use claims::{Claim, CumulativeClaim, ProductType};
pub use cumulative::{CumulativeEngine, CumulativeResult, EngineConfig};
pub use error::{CsvError, CumulativeError};
pub use triangle::{build_triangle, Triangle, TriangleHeader};
