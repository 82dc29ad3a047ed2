//! Write a triangle as CSV
//!
//! First row: min origin year, development years. Then one row per product type:
//! display name followed by its cumulative values. No column header row.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use super::types::Triangle;
use crate::error::CsvError;

/// Write the triangle to any writer (file, buffer, stdout)
pub fn write_triangle_to_writer<W: Write>(writer: W, triangle: &Triangle) -> Result<(), CsvError> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);

    csv_writer
        .write_record([
            triangle.header.min_origin_year.to_string(),
            triangle.header.development_years.to_string(),
        ])
        .map_err(CsvError::FailedToWrite)?;

    for series in &triangle.series {
        let row = std::iter::once(series.product_type.display_name().to_string())
            .chain(series.values.iter().map(|v| v.to_string()));
        csv_writer.write_record(row).map_err(CsvError::FailedToWrite)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the triangle to a CSV file
pub fn write_triangle<P: AsRef<Path>>(path: P, triangle: &Triangle) -> Result<(), CsvError> {
    let file = File::create(path)?;
    write_triangle_to_writer(file, triangle)
}

/// Render the triangle as CSV bytes (e.g., for a download response)
pub fn triangle_to_csv_bytes(triangle: &Triangle) -> Result<Vec<u8>, CsvError> {
    let mut buffer = Vec::new();
    write_triangle_to_writer(&mut buffer, triangle)?;
    Ok(buffer)
}
