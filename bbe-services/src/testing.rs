//! In-memory sources for exercising the aggregator without network access
//!
//! Each source counts its calls and can be told to sleep before answering
//! or to fail outright.

use crate::sources::{PredictionSource, ResultsSource};
use async_trait::async_trait;
use bbe_core::{
    Alliance, AllianceMap, AllianceOutlook, AllianceScore, EngineError, EngineResult, EventDetails,
    EventSummary, MatchPrediction, MatchResult, SimulationMetadata,
};
use chrono::DateTime;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Build a prediction for `match_key` favouring `winner`
pub fn prediction(match_key: &str, winner: Alliance) -> MatchPrediction {
    let (red, blue) = match winner {
        Alliance::Red => (0.7, 0.3),
        Alliance::Blue => (0.3, 0.7),
    };
    MatchPrediction {
        match_key: match_key.to_string(),
        predicted_winner: winner,
        win_probability: AllianceMap::new(red, blue),
        predicted_scores: AllianceMap::new(100, 90),
        shap_analysis: None,
    }
}

/// Build a results record; `winner` of `None` means not yet played
pub fn match_result(match_key: &str, winner: Option<Alliance>, red: i32, blue: i32) -> MatchResult {
    MatchResult {
        key: match_key.to_string(),
        comp_level: "qm".to_string(),
        event_key: None,
        winning_alliance: winner,
        alliances: AllianceMap::new(
            AllianceScore {
                score: red,
                team_keys: vec!["frc1".into(), "frc2".into(), "frc3".into()],
            },
            AllianceScore {
                score: blue,
                team_keys: vec!["frc4".into(), "frc5".into(), "frc6".into()],
            },
        ),
    }
}

/// Prediction source backed by a fixed list
#[derive(Default)]
pub struct StaticPredictions {
    pub predictions: Vec<MatchPrediction>,
    pub simulation: Vec<AllianceOutlook>,
    pub delay: Duration,
    pub fail: bool,
    calls: AtomicUsize,
    simulation_counts: Mutex<Vec<u32>>,
}

impl StaticPredictions {
    pub fn new(predictions: Vec<MatchPrediction>) -> Self {
        Self {
            predictions,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_simulation(mut self, simulation: Vec<AllianceOutlook>) -> Self {
        self.simulation = simulation;
        self
    }

    /// Total number of calls across all operations
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Simulation counts received, in call order
    pub fn simulation_counts(&self) -> Vec<u32> {
        self.simulation_counts
            .lock()
            .map(|counts| counts.clone())
            .unwrap_or_default()
    }

    async fn enter(&self) -> EngineResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(EngineError::unavailable("prediction engine offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl PredictionSource for StaticPredictions {
    async fn get_prediction(&self, match_key: &str) -> EngineResult<MatchPrediction> {
        self.enter().await?;
        self.predictions
            .iter()
            .find(|p| p.match_key == match_key)
            .cloned()
            .ok_or_else(|| EngineError::unavailable(format!("no prediction for {}", match_key)))
    }

    async fn get_event_predictions(&self, _event_key: &str) -> EngineResult<Vec<MatchPrediction>> {
        self.enter().await?;
        Ok(self.predictions.clone())
    }

    async fn simulate_playoffs(
        &self,
        _event_key: &str,
        simulation_count: u32,
    ) -> EngineResult<(SimulationMetadata, Vec<AllianceOutlook>)> {
        if let Ok(mut counts) = self.simulation_counts.lock() {
            counts.push(simulation_count);
        }
        self.enter().await?;

        let metadata = SimulationMetadata {
            total_simulations_run: i64::from(simulation_count),
            timestamp_utc: DateTime::from_timestamp(1_741_458_600, 0).unwrap_or_default(),
        };
        Ok((metadata, self.simulation.clone()))
    }
}

/// Results source backed by fixed data; `None` slices fail when requested
#[derive(Default)]
pub struct StaticResults {
    pub matches: Option<HashMap<String, MatchResult>>,
    pub details: Option<EventDetails>,
    pub events: Vec<EventSummary>,
    pub delay: Duration,
    pub configured: bool,
    calls: AtomicUsize,
}

impl StaticResults {
    pub fn new(matches: Vec<MatchResult>) -> Self {
        Self {
            matches: Some(matches.into_iter().map(|m| (m.key.clone(), m)).collect()),
            configured: true,
            ..Self::default()
        }
    }

    /// A source with no data at all; every call fails
    pub fn failing() -> Self {
        Self {
            configured: true,
            ..Self::default()
        }
    }

    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_events(mut self, events: Vec<EventSummary>) -> Self {
        self.events = events;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Behave as if the credential were missing
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> EngineResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if !self.configured {
            return Err(EngineError::config("TBA_API_KEY is not configured"));
        }
        Ok(())
    }
}

#[async_trait]
impl ResultsSource for StaticResults {
    async fn get_match(&self, match_key: &str) -> EngineResult<MatchResult> {
        self.enter().await?;
        self.matches
            .as_ref()
            .and_then(|m| m.get(match_key))
            .cloned()
            .ok_or_else(|| EngineError::unavailable(format!("TBA API error (404) for {}", match_key)))
    }

    async fn get_event_matches(&self, _event_key: &str) -> EngineResult<HashMap<String, MatchResult>> {
        self.enter().await?;
        self.matches
            .clone()
            .ok_or_else(|| EngineError::unavailable("TBA API error (503)"))
    }

    async fn get_event_details(&self, event_key: &str) -> EngineResult<EventDetails> {
        self.enter().await?;
        self.details
            .clone()
            .ok_or_else(|| EngineError::unavailable(format!("TBA API error (404) for {}", event_key)))
    }

    async fn list_events(&self, _year: u16) -> EngineResult<Vec<EventSummary>> {
        self.enter().await?;
        Ok(self.events.clone())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
