//! Accumulation of incremental claims into cumulative lineages

mod accumulator;
mod engine;

pub use accumulator::Accumulator;
pub use engine::{
    CumulativeEngine, CumulativeResult, EngineConfig, DEFAULT_MAX_DEVELOPMENT_LAG, DEFAULT_MIN_PARALLEL_PARTITIONS,
};
