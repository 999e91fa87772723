//! Monte-Carlo playoff simulation records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Run metadata reported by the simulation engine, passed through verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetadata {
    pub total_simulations_run: i64,
    pub timestamp_utc: DateTime<Utc>,
}

/// Simulated outlook for one playoff alliance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllianceOutlook {
    pub alliance_number: i32,
    pub teams: Vec<i32>,
    pub win_probability: f32,
    pub wins: i32,
}

/// Response record for a playoff simulation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffSimulation {
    pub event_key: String,
    pub metadata: SimulationMetadata,
    pub results: Vec<AllianceOutlook>,
}
