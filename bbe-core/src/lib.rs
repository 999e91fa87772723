//! Core types for the Blue Banner Engine
//!
//! This crate defines the shared data structures used across the gateway:
//! predictions from the Matchpoint engine, actual results from The Blue
//! Alliance, the merged views returned to callers, and the error taxonomy.

pub mod alliance;
pub mod error;
pub mod prediction;
pub mod results;
pub mod simulation;
pub mod view;

pub use alliance::{Alliance, AllianceMap};
pub use error::{EngineError, EngineResult};
pub use prediction::{MatchPrediction, ShapAnalysis};
pub use results::{AllianceScore, EventDetails, EventSummary, MatchResult, Webcast, UNPLAYED_SCORE};
pub use simulation::{AllianceOutlook, PlayoffSimulation, SimulationMetadata};
pub use view::{EventPredictions, MatchOutcome, MergedMatchView};
