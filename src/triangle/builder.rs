//! Build a development triangle from cumulative claims

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use super::types::{CategorySeries, PeriodPair, Triangle, TriangleHeader};
use crate::claims::{CumulativeClaim, ProductType};
use crate::error::CumulativeError;

/// Align cumulative claims into one zero-filled series per product type
///
/// Series follow the distinct (origin, development) pairs present anywhere in
/// `cumulative`, not the full rectangle implied by the header.
pub fn build_triangle(cumulative: Option<&[CumulativeClaim]>) -> Result<Triangle, CumulativeError> {
    let claims = cumulative
        .ok_or_else(|| CumulativeError::InvalidInput("no cumulative claims supplied".to_string()))?;
    let first = claims.first().ok_or(CumulativeError::EmptyInput)?;

    let mut min_origin_year = first.origin_year;
    let mut max_development_year = first.development_year;
    let mut cells: HashMap<(ProductType, PeriodPair), f64> = HashMap::with_capacity(claims.len());
    let mut periods = BTreeSet::new();
    let mut product_types = BTreeSet::new();

    for claim in claims {
        if claim.development_year < claim.origin_year {
            return Err(CumulativeError::malformed(
                claim.product_type,
                claim.origin_year,
                claim.development_year,
                "development year precedes origin year",
            ));
        }

        min_origin_year = min_origin_year.min(claim.origin_year);
        max_development_year = max_development_year.max(claim.development_year);

        let period = PeriodPair::new(claim.origin_year, claim.development_year);
        match cells.entry((claim.product_type, period)) {
            Entry::Occupied(_) => {
                return Err(CumulativeError::malformed(
                    claim.product_type,
                    claim.origin_year,
                    claim.development_year,
                    "more than one cumulative cell",
                ));
            }
            Entry::Vacant(slot) => {
                slot.insert(claim.value);
            }
        }
        periods.insert(period);
        product_types.insert(claim.product_type);
    }

    let header = TriangleHeader::from_bounds(min_origin_year, max_development_year).ok_or_else(|| {
        CumulativeError::InvalidInput(format!(
            "development span {}..={} is too wide for a triangle header",
            min_origin_year, max_development_year
        ))
    })?;
    let periods: Vec<PeriodPair> = periods.into_iter().collect();

    let series = product_types
        .into_iter()
        .map(|product_type| CategorySeries {
            product_type,
            values: periods
                .iter()
                .map(|period| cells.get(&(product_type, *period)).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    log::debug!(
        "Built triangle from {} cells: origin {} spanning {} years, {} periods",
        claims.len(),
        header.min_origin_year,
        header.development_years,
        periods.len()
    );

    Ok(Triangle {
        header,
        periods,
        series,
    })
}
