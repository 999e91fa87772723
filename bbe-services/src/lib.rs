//! Business logic services for the Blue Banner Engine
//!
//! This crate provides the aggregation layer that fans requests out to the
//! prediction engine and the results provider and merges their answers.

pub mod aggregator;
pub mod sources;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use aggregator::{merge_view, parse_simulation_count, PredictionAggregator, MAX_SIMULATIONS};
pub use sources::{PredictionSource, ResultsSource};
