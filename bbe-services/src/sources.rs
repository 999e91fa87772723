//! Upstream source abstractions
//!
//! The aggregator talks to the prediction engine and the results provider
//! through these traits so the two can be swapped for in-memory sources.

use async_trait::async_trait;
use bbe_core::{
    AllianceOutlook, EngineResult, EventDetails, EventSummary, MatchPrediction, MatchResult,
    SimulationMetadata,
};
use bbe_matchpoint::MatchpointClient;
use bbe_tba::TbaClient;
use std::collections::HashMap;

/// Source of model predictions
#[async_trait]
pub trait PredictionSource: Send + Sync + 'static {
    async fn get_prediction(&self, match_key: &str) -> EngineResult<MatchPrediction>;

    /// Predictions for every match of an event; the order is authoritative
    async fn get_event_predictions(&self, event_key: &str) -> EngineResult<Vec<MatchPrediction>>;

    async fn simulate_playoffs(
        &self,
        event_key: &str,
        simulation_count: u32,
    ) -> EngineResult<(SimulationMetadata, Vec<AllianceOutlook>)>;
}

/// Source of actual match results and event metadata
#[async_trait]
pub trait ResultsSource: Send + Sync + 'static {
    async fn get_match(&self, match_key: &str) -> EngineResult<MatchResult>;

    async fn get_event_matches(&self, event_key: &str) -> EngineResult<HashMap<String, MatchResult>>;

    async fn get_event_details(&self, event_key: &str) -> EngineResult<EventDetails>;

    async fn list_events(&self, year: u16) -> EngineResult<Vec<EventSummary>>;

    /// Whether the source holds the credential it needs
    fn is_configured(&self) -> bool;
}

#[async_trait]
impl PredictionSource for MatchpointClient {
    async fn get_prediction(&self, match_key: &str) -> EngineResult<MatchPrediction> {
        MatchpointClient::get_prediction(self, match_key).await
    }

    async fn get_event_predictions(&self, event_key: &str) -> EngineResult<Vec<MatchPrediction>> {
        MatchpointClient::get_event_predictions(self, event_key).await
    }

    async fn simulate_playoffs(
        &self,
        event_key: &str,
        simulation_count: u32,
    ) -> EngineResult<(SimulationMetadata, Vec<AllianceOutlook>)> {
        MatchpointClient::simulate_playoffs(self, event_key, simulation_count).await
    }
}

#[async_trait]
impl ResultsSource for TbaClient {
    async fn get_match(&self, match_key: &str) -> EngineResult<MatchResult> {
        TbaClient::get_match(self, match_key).await
    }

    async fn get_event_matches(&self, event_key: &str) -> EngineResult<HashMap<String, MatchResult>> {
        TbaClient::get_event_matches(self, event_key).await
    }

    async fn get_event_details(&self, event_key: &str) -> EngineResult<EventDetails> {
        TbaClient::get_event_details(self, event_key).await
    }

    async fn list_events(&self, year: u16) -> EngineResult<Vec<EventSummary>> {
        TbaClient::list_events(self, year).await
    }

    fn is_configured(&self) -> bool {
        TbaClient::is_configured(self)
    }
}
