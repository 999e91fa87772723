//! Matchpoint wire messages
//!
//! Hand-maintained prost definitions mirroring the `matchpoint.Matchpoint`
//! service, plus conversions into the core types.

use bbe_core::{
    AllianceMap, AllianceOutlook, EngineError, EngineResult, MatchPrediction, ShapAnalysis,
    SimulationMetadata,
};
use chrono::DateTime;
use tracing::warn;

/// Fully qualified gRPC service name
pub const SERVICE_NAME: &str = "matchpoint.Matchpoint";

pub const GET_MATCH_PREDICTION: &str = "/matchpoint.Matchpoint/GetMatchPrediction";
pub const PREDICT_ALL_EVENT_MATCHES: &str = "/matchpoint.Matchpoint/PredictAllEventMatches";
pub const SIMULATE_PLAYOFFS: &str = "/matchpoint.Matchpoint/SimulatePlayoffs";

// ============================================================================
// Requests
// ============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MatchPredictionRequest {
    #[prost(string, tag = "1")]
    pub match_key: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventPredictionRequest {
    #[prost(string, tag = "1")]
    pub event_key: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimulationRequest {
    #[prost(string, tag = "1")]
    pub event_key: String,
    #[prost(uint32, tag = "2")]
    pub n_sims: u32,
}

// ============================================================================
// Prediction responses
// ============================================================================

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct WinProbability {
    #[prost(float, tag = "1")]
    pub red: f32,
    #[prost(float, tag = "2")]
    pub blue: f32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PredictedScores {
    #[prost(int32, tag = "1")]
    pub red: i32,
    #[prost(int32, tag = "2")]
    pub blue: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ShapAnalysisMessage {
    #[prost(float, tag = "1")]
    pub base_value: f32,
    #[prost(float, repeated, tag = "2")]
    pub values: Vec<f32>,
    #[prost(string, repeated, tag = "3")]
    pub feature_names: Vec<String>,
    #[prost(float, repeated, tag = "4")]
    pub feature_data: Vec<f32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MatchPredictionResponse {
    #[prost(string, tag = "1")]
    pub match_key: String,
    #[prost(string, tag = "2")]
    pub predicted_winner: String,
    #[prost(message, optional, tag = "3")]
    pub win_probability: Option<WinProbability>,
    #[prost(message, optional, tag = "4")]
    pub predicted_scores: Option<PredictedScores>,
    #[prost(message, optional, tag = "5")]
    pub shap_analysis: Option<ShapAnalysisMessage>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventPredictionResponse {
    #[prost(message, repeated, tag = "1")]
    pub predictions: Vec<MatchPredictionResponse>,
}

impl MatchPredictionResponse {
    /// Convert into a core prediction
    ///
    /// An unknown winner is a parse error. A malformed SHAP attribution is
    /// dropped rather than failing the prediction.
    pub fn into_prediction(self) -> EngineResult<MatchPrediction> {
        let predicted_winner = self.predicted_winner.parse().map_err(|e| {
            EngineError::parse(format!(
                "Invalid predicted winner for {}: {}",
                self.match_key, e
            ))
        })?;

        let win_probability = self.win_probability.unwrap_or_default();
        let predicted_scores = self.predicted_scores.unwrap_or_default();

        let shap_analysis = self.shap_analysis.and_then(|shap| {
            ShapAnalysis::new(
                shap.base_value,
                shap.values,
                shap.feature_names,
                shap.feature_data,
            )
            .map_err(|e| warn!("Dropping SHAP analysis for {}: {}", self.match_key, e))
            .ok()
        });

        Ok(MatchPrediction {
            match_key: self.match_key,
            predicted_winner,
            win_probability: AllianceMap::new(win_probability.red, win_probability.blue),
            predicted_scores: AllianceMap::new(predicted_scores.red, predicted_scores.blue),
            shap_analysis,
        })
    }
}

// ============================================================================
// Simulation responses
// ============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimulationMetadataMessage {
    #[prost(int32, tag = "1")]
    pub total_simulations_run: i32,
    #[prost(message, optional, tag = "2")]
    pub timestamp_utc: Option<::prost_types::Timestamp>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AllianceResultMessage {
    #[prost(int32, tag = "1")]
    pub alliance_number: i32,
    #[prost(int32, repeated, tag = "2")]
    pub teams: Vec<i32>,
    #[prost(float, tag = "3")]
    pub win_probability: f32,
    #[prost(int32, tag = "4")]
    pub wins: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SimulationResultMessage {
    #[prost(message, optional, tag = "1")]
    pub simulation_metadata: Option<SimulationMetadataMessage>,
    #[prost(message, repeated, tag = "2")]
    pub results: Vec<AllianceResultMessage>,
}

impl SimulationResultMessage {
    /// Split into run metadata and per-alliance outlooks, preserving order
    pub fn into_parts(self) -> EngineResult<(SimulationMetadata, Vec<AllianceOutlook>)> {
        let metadata = self
            .simulation_metadata
            .ok_or_else(|| EngineError::parse("Simulation response is missing metadata"))?;

        let timestamp = metadata
            .timestamp_utc
            .ok_or_else(|| EngineError::parse("Simulation metadata is missing timestamp"))?;

        let nanos = u32::try_from(timestamp.nanos)
            .map_err(|_| EngineError::parse("Simulation timestamp has negative nanos"))?;
        let timestamp_utc = DateTime::from_timestamp(timestamp.seconds, nanos)
            .ok_or_else(|| EngineError::parse("Simulation timestamp out of range"))?;

        let results = self
            .results
            .into_iter()
            .map(|r| AllianceOutlook {
                alliance_number: r.alliance_number,
                teams: r.teams,
                win_probability: r.win_probability,
                wins: r.wins,
            })
            .collect();

        Ok((
            SimulationMetadata {
                total_simulations_run: i64::from(metadata.total_simulations_run),
                timestamp_utc,
            },
            results,
        ))
    }
}
