//! Cumulative engine: incremental claims in, development triangle out

use crate::claims::{Claim, CumulativeClaim};
use crate::error::CumulativeError;
use crate::triangle::{build_triangle, Triangle};
use super::accumulator::Accumulator;

/// Default lineage count before the parallel path is worth taking
pub const DEFAULT_MIN_PARALLEL_PARTITIONS: usize = 64;

/// Longest development lag accepted in one lineage
pub const DEFAULT_MAX_DEVELOPMENT_LAG: i64 = 1_000;

/// Configuration for an accumulation run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Accumulate lineages on the rayon thread pool
    pub parallel: bool,

    /// Fewer lineages than this always run sequentially
    pub min_parallel_partitions: usize,

    /// Claims further than this from their origin year are rejected
    pub max_development_lag: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            min_parallel_partitions: DEFAULT_MIN_PARALLEL_PARTITIONS,
            max_development_lag: DEFAULT_MAX_DEVELOPMENT_LAG,
        }
    }
}

impl EngineConfig {
    /// Single-threaded accumulation
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Parallel accumulation for large inputs
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Default::default()
        }
    }

    /// Set the lineage count threshold for the parallel path
    pub fn with_min_parallel_partitions(mut self, partitions: usize) -> Self {
        self.min_parallel_partitions = partitions;
        self
    }

    /// Set the longest accepted development lag
    pub fn with_max_development_lag(mut self, lag: i64) -> Self {
        self.max_development_lag = lag;
        self
    }

    pub(crate) fn use_parallel(&self, partitions: usize) -> bool {
        self.parallel && partitions >= self.min_parallel_partitions.max(1)
    }
}

/// Output of a full engine run
#[derive(Debug, Clone)]
pub struct CumulativeResult {
    /// Every cumulative cell, filled cells included
    pub cumulative_claims: Vec<CumulativeClaim>,

    pub triangle: Triangle,
}

impl CumulativeResult {
    pub fn filled_cells(&self) -> usize {
        self.cumulative_claims.iter().filter(|c| c.is_filled()).count()
    }
}

/// Main cumulative engine
#[derive(Debug, Clone, Default)]
pub struct CumulativeEngine {
    config: EngineConfig,
}

impl CumulativeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Accumulate incremental claims without building the triangle
    pub fn accumulate(&self, claims: Option<&[Claim]>) -> Result<Vec<CumulativeClaim>, CumulativeError> {
        Accumulator::new(self.config.clone()).accumulate(claims)
    }

    /// Accumulate, then build the triangle from the cumulative cells
    pub fn run(&self, claims: Option<&[Claim]>) -> Result<CumulativeResult, CumulativeError> {
        let cumulative_claims = self.accumulate(claims)?;
        let triangle = build_triangle(Some(&cumulative_claims))?;

        Ok(CumulativeResult {
            cumulative_claims,
            triangle,
        })
    }

    /// Triangle only
    pub fn triangle(&self, claims: Option<&[Claim]>) -> Result<Triangle, CumulativeError> {
        self.run(claims).map(|result| result.triangle)
    }
}
