//! Claim records and incremental claim loading

mod data;
pub mod loader;

pub use data::{Claim, CumulativeClaim, CellOrigin, ProductType, UnknownProductType};
pub use loader::{load_claims, load_claims_from_reader, load_sample_claims, SAMPLE_CLAIMS_PATH};
