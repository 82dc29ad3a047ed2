//! Load incremental claims from CSV
//!
//! Four positional columns: product, origin year, development year, incremental value.
//! The first row is a header and its names are ignored.

use super::{Claim, ProductType};
use crate::error::CsvError;
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Path of the bundled sample claims file
pub const SAMPLE_CLAIMS_PATH: &str = "data/sample_incremental.csv";

/// Raw CSV row, read by position
#[derive(Debug, Deserialize)]
struct ClaimRow(String, i32, i32, Option<f64>);

impl ClaimRow {
    fn to_claim(self, line: Option<u64>) -> Result<Claim, CsvError> {
        let product_type = self
            .0
            .parse::<ProductType>()
            .map_err(|e| CsvError::UnknownProductType { line, label: e.0 })?;

        Ok(Claim {
            product_type,
            origin_year: self.1,
            development_year: self.2,
            value: self.3,
        })
    }
}

fn claims_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn read_claims<R: Read>(mut reader: Reader<R>) -> Result<Vec<Claim>, CsvError> {
    let mut claims = Vec::new();
    let mut record = StringRecord::new();

    loop {
        let has_row = reader
            .read_record(&mut record)
            .map_err(|source| CsvError::FailedToRead {
                line: source.position().map(|p| p.line()),
                source,
            })?;
        if !has_row {
            break;
        }

        let line = record.position().map(|p| p.line());
        let row: ClaimRow = record
            .deserialize(None)
            .map_err(|source| CsvError::FailedToRead { line, source })?;
        claims.push(row.to_claim(line)?);
    }

    Ok(claims)
}

/// Load all incremental claims from a CSV file
pub fn load_claims<P: AsRef<Path>>(path: P) -> Result<Vec<Claim>, CsvError> {
    let file = File::open(path)?;
    load_claims_from_reader(file)
}

/// Load claims from the bundled sample file
pub fn load_sample_claims() -> Result<Vec<Claim>, CsvError> {
    load_claims(SAMPLE_CLAIMS_PATH)
}

/// Load incremental claims from any reader (e.g., string buffer, upload stream)
pub fn load_claims_from_reader<R: Read>(reader: R) -> Result<Vec<Claim>, CsvError> {
    let claims = read_claims(claims_reader(reader))?;
    log::debug!("Read {} incremental claims", claims.len());
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_sample_claims() {
        let claims = load_sample_claims().expect("Failed to load sample claims");
        assert_eq!(claims.len(), 12);

        assert_eq!(claims[0], Claim::new(ProductType::Comp, 1992, 1992, 110.0));
        assert_eq!(claims[3].product_type, ProductType::NonComp);
        assert_eq!(claims[3].value, Some(45.2));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_claims("data/does_not_exist.csv").unwrap_err();
        assert!(matches!(err, CsvError::Io(_)));
    }

    #[test]
    fn test_load_single_claim() {
        let content = "Product, Origin Year, Development Year, Incremental Value\n\
                       Comp, 1992, 1992, 110.0\n";

        let claims = load_claims_from_reader(content.as_bytes()).expect("Failed to load claims");
        assert_eq!(claims, vec![Claim::new(ProductType::Comp, 1992, 1992, 110.0)]);
    }

    #[test]
    fn test_load_resolves_both_label_forms() {
        let content = "Product,Origin Year,Development Year,Incremental Value\n\
                       Non-Comp,1990,1990,45.2\n\
                       NonComp,1990,1991,64.8\n\
                       comp,1991,1991,10\n";

        let claims = load_claims_from_reader(content.as_bytes()).unwrap();
        assert_eq!(claims.len(), 3);
        assert_eq!(claims[0].product_type, ProductType::NonComp);
        assert_eq!(claims[1].product_type, ProductType::NonComp);
        assert_eq!(claims[2].product_type, ProductType::Comp);
        assert_eq!(claims[1].value, Some(64.8));
    }

    #[test]
    fn test_blank_value_is_absent() {
        let content = "Product,Origin Year,Development Year,Incremental Value\n\
                       Comp,1990,1991,\n";

        let claims = load_claims_from_reader(content.as_bytes()).unwrap();
        assert_eq!(claims, vec![Claim::blank(ProductType::Comp, 1990, 1991)]);
    }

    #[test]
    fn test_header_only_yields_no_claims() {
        let content = "Product,Origin Year,Development Year,Incremental Value\n";
        let claims = load_claims_from_reader(content.as_bytes()).unwrap();
        assert!(claims.is_empty());
    }

    #[test]
    fn test_missing_product_column_fails() {
        let content = "Product, Origin Year, Development Year, Incremental Value\n\
                       1992, 1992, 110.0\n";

        let err = load_claims_from_reader(content.as_bytes()).unwrap_err();
        assert!(matches!(err, CsvError::FailedToRead { .. }), "got {:?}", err);
    }

    #[test]
    fn test_unknown_product_fails() {
        let content = "Product,Origin Year,Development Year,Incremental Value\n\
                       Comp,1990,1990,1\n\
                       Marine,1990,1990,1\n";

        match load_claims_from_reader(content.as_bytes()) {
            Err(CsvError::UnknownProductType { line, label }) => {
                assert_eq!(label, "Marine");
                assert_eq!(line, Some(3));
            }
            other => panic!("expected UnknownProductType, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_year_fails() {
        let content = "Product,Origin Year,Development Year,Incremental Value\n\
                       Comp,nineteen,1990,1\n";

        let err = load_claims_from_reader(content.as_bytes()).unwrap_err();
        assert!(matches!(err, CsvError::FailedToRead { line: Some(2), .. }), "got {:?}", err);
    }
}
