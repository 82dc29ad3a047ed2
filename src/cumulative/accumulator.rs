//! Running totals per (product type, origin year) lineage
//!
//! Each lineage is ordered by development year and accumulated independently.
//! Development years missing between two observations are filled with a copy of
//! the last cumulative value, so a lineage is continuous from its first diagonal
//! to its latest observation.

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;

use super::engine::EngineConfig;
use crate::claims::{Claim, CumulativeClaim, ProductType};
use crate::error::CumulativeError;

/// Claims sharing a product type and origin year, in input order
type Lineage<'a> = Vec<&'a Claim>;

/// Cumulative cells of one lineage keyed by development year
type LineageCells = BTreeMap<i32, CumulativeClaim>;

/// Turns incremental claims into cumulative claims
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    config: EngineConfig,
}

impl Accumulator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Accumulate incremental claims lineage by lineage
    ///
    /// `None` stands for an absent input collection and is rejected; an empty
    /// slice yields an empty result. Lineages appear in order of first
    /// appearance in the input, each sorted by development year with filled
    /// cells interleaved.
    ///
    /// A blank amount adds nothing to the running total; the lineage continues
    /// from the prior cumulative value instead of becoming blank from there on.
    ///
    /// Claims more than `max_development_lag` years past their origin are
    /// rejected, since every year in between becomes a cell.
    pub fn accumulate(&self, claims: Option<&[Claim]>) -> Result<Vec<CumulativeClaim>, CumulativeError> {
        let claims = claims
            .ok_or_else(|| CumulativeError::InvalidInput("no incremental claims supplied".to_string()))?;

        for claim in claims {
            validate_claim(claim, self.config.max_development_lag)?;
        }

        let lineages = partition(claims);
        let parallel = self.config.use_parallel(lineages.len());
        log::debug!(
            "Accumulating {} claims across {} lineages ({})",
            claims.len(),
            lineages.len(),
            if parallel { "parallel" } else { "sequential" }
        );

        let accumulated: Vec<Vec<CumulativeClaim>> = if parallel {
            lineages.into_par_iter().map(accumulate_lineage).collect::<Result<_, _>>()?
        } else {
            lineages.into_iter().map(accumulate_lineage).collect::<Result<_, _>>()?
        };

        let cumulative: Vec<CumulativeClaim> = accumulated.into_iter().flatten().collect();
        let filled = cumulative.iter().filter(|c| c.is_filled()).count();
        log::debug!("Produced {} cumulative cells ({} filled)", cumulative.len(), filled);

        Ok(cumulative)
    }
}

fn validate_claim(claim: &Claim, max_development_lag: i64) -> Result<(), CumulativeError> {
    let lag = claim.lag();
    if lag < 0 {
        return Err(CumulativeError::malformed(
            claim.product_type,
            claim.origin_year,
            claim.development_year,
            "development year precedes origin year",
        ));
    }
    if lag > max_development_lag {
        return Err(CumulativeError::InvalidInput(format!(
            "{:?} {}/{} is {} years past its origin (limit {})",
            claim.product_type, claim.origin_year, claim.development_year, lag, max_development_lag
        )));
    }
    if let Some(value) = claim.value {
        if !value.is_finite() {
            return Err(CumulativeError::InvalidInput(format!(
                "non-finite value {} for {:?} {}/{}",
                value, claim.product_type, claim.origin_year, claim.development_year
            )));
        }
    }
    Ok(())
}

/// Group claims by (product type, origin year), keeping first-appearance order
fn partition(claims: &[Claim]) -> Vec<Lineage<'_>> {
    let mut slots: HashMap<(ProductType, i32), usize> = HashMap::new();
    let mut lineages: Vec<Lineage<'_>> = Vec::new();

    for claim in claims {
        let slot = *slots
            .entry((claim.product_type, claim.origin_year))
            .or_insert_with(|| {
                lineages.push(Vec::new());
                lineages.len() - 1
            });
        lineages[slot].push(claim);
    }

    lineages
}

fn accumulate_lineage(mut lineage: Lineage<'_>) -> Result<Vec<CumulativeClaim>, CumulativeError> {
    // Stable: equal development years keep input order
    lineage.sort_by_key(|claim| claim.development_year);

    let mut cells = LineageCells::new();

    for claim in lineage {
        if cells.contains_key(&claim.development_year) {
            return Err(CumulativeError::malformed(
                claim.product_type,
                claim.origin_year,
                claim.development_year,
                "duplicate claim for development year",
            ));
        }

        let mut cumulative = claim.value.unwrap_or(0.0);
        if claim.development_year > claim.origin_year {
            cumulative += prior_cumulative(&mut cells, claim)?;
        }

        cells.insert(
            claim.development_year,
            CumulativeClaim::observed(claim.product_type, claim.origin_year, claim.development_year, cumulative),
        );
    }

    Ok(cells.into_values().collect())
}

/// Cumulative value just before `claim`, filling any skipped development years
fn prior_cumulative(cells: &mut LineageCells, claim: &Claim) -> Result<f64, CumulativeError> {
    let previous_year = claim.development_year - 1;

    let (found_year, found) = cells
        .range(claim.origin_year..=previous_year)
        .next_back()
        .map(|(year, cell)| (*year, cell.clone()))
        .ok_or_else(|| {
            CumulativeError::malformed(
                claim.product_type,
                claim.origin_year,
                claim.development_year,
                "no cumulative value on or after the origin year",
            )
        })?;

    for year in (found_year + 1)..=previous_year {
        cells.insert(year, CumulativeClaim::carried_forward(&found, year));
    }

    Ok(found.value)
}
