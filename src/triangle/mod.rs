//! Development triangles: structures, builder, and CSV output

mod types;
mod builder;
pub mod writer;

pub use types::{CategorySeries, PeriodPair, Triangle, TriangleHeader};
pub use builder::build_triangle;
pub use writer::{triangle_to_csv_bytes, write_triangle, write_triangle_to_writer};
