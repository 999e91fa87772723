//! Prediction aggregator
//!
//! Fans each request out to the prediction engine and the results provider
//! concurrently, waits for every call to finish, then merges.
//!
//! Failure policy:
//! - a prediction failure fails the whole operation
//! - a results failure only removes the enrichment it would have provided

use crate::sources::{PredictionSource, ResultsSource};
use bbe_core::{
    EngineError, EngineResult, EventPredictions, EventSummary, MatchOutcome, MatchPrediction,
    MatchResult, MergedMatchView, PlayoffSimulation,
};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, error, info, instrument, warn};

/// Upper bound on simulations per playoff request
pub const MAX_SIMULATIONS: i64 = 10_000;

/// Merges engine predictions with actual results
#[derive(Clone)]
pub struct PredictionAggregator {
    predictions: Arc<dyn PredictionSource>,
    results: Arc<dyn ResultsSource>,
}

impl PredictionAggregator {
    /// Create a new aggregator over shared, read-only sources
    pub fn new(predictions: Arc<dyn PredictionSource>, results: Arc<dyn ResultsSource>) -> Self {
        Self {
            predictions,
            results,
        }
    }

    /// Whether the results provider has its credential
    pub fn results_configured(&self) -> bool {
        self.results.is_configured()
    }

    /// Predict one match, enriched with its actual result when available
    #[instrument(skip(self))]
    pub async fn predict_match(&self, match_key: &str) -> EngineResult<MergedMatchView> {
        let prediction_task = {
            let source = Arc::clone(&self.predictions);
            let key = match_key.to_string();
            tokio::spawn(async move { source.get_prediction(&key).await })
        };
        let result_task = {
            let source = Arc::clone(&self.results);
            let key = match_key.to_string();
            tokio::spawn(async move { source.get_match(&key).await })
        };

        let (prediction, result) = tokio::join!(prediction_task, result_task);

        let prediction = joined(prediction).map_err(|e| {
            error!("Prediction for {} failed: {}", match_key, e);
            EngineError::prediction_unavailable(e.to_string())
        })?;

        let result = match joined(result) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Results for {} unavailable, serving prediction only: {}", match_key, e);
                None
            }
        };

        Ok(merge_view(prediction, result.as_ref()))
    }

    /// Predict every match of an event, in the engine's order
    #[instrument(skip(self))]
    pub async fn predict_event(&self, event_key: &str) -> EngineResult<EventPredictions> {
        let predictions_task = {
            let source = Arc::clone(&self.predictions);
            let key = event_key.to_string();
            tokio::spawn(async move { source.get_event_predictions(&key).await })
        };
        let matches_task = {
            let source = Arc::clone(&self.results);
            let key = event_key.to_string();
            tokio::spawn(async move { source.get_event_matches(&key).await })
        };
        let details_task = {
            let source = Arc::clone(&self.results);
            let key = event_key.to_string();
            tokio::spawn(async move { source.get_event_details(&key).await })
        };

        let (predictions, matches, details) =
            tokio::join!(predictions_task, matches_task, details_task);

        let predictions = joined(predictions).map_err(|e| {
            error!("Event predictions for {} failed: {}", event_key, e);
            EngineError::prediction_unavailable(e.to_string())
        })?;

        let matches = joined(matches)
            .map_err(|e| warn!("Match results for {} unavailable: {}", event_key, e))
            .ok();

        let event_details = joined(details)
            .map_err(|e| warn!("Event details for {} unavailable: {}", event_key, e))
            .ok();

        let predictions: Vec<MergedMatchView> = predictions
            .into_iter()
            .map(|prediction| {
                let result = matches
                    .as_ref()
                    .and_then(|m| m.get(&prediction.match_key));
                merge_view(prediction, result)
            })
            .collect();

        info!(
            "Merged {} predictions for {} ({} played)",
            predictions.len(),
            event_key,
            predictions.iter().filter(|p| p.outcome.is_played()).count()
        );

        Ok(EventPredictions {
            event_details,
            predictions,
        })
    }

    /// Run a playoff simulation
    ///
    /// `requested_count` is validated before anything is sent upstream.
    #[instrument(skip(self))]
    pub async fn simulate(
        &self,
        event_key: &str,
        requested_count: &str,
    ) -> EngineResult<PlayoffSimulation> {
        let count = parse_simulation_count(requested_count)?;

        debug!("Requesting {} simulations for {}", count, event_key);

        let (metadata, results) = self
            .predictions
            .simulate_playoffs(event_key, count)
            .await
            .map_err(|e| {
                error!("Playoff simulation for {} failed: {}", event_key, e);
                EngineError::simulation_unavailable(e.to_string())
            })?;

        Ok(PlayoffSimulation {
            event_key: event_key.to_string(),
            metadata,
            results,
        })
    }

    /// List a season's events from the results provider
    #[instrument(skip(self))]
    pub async fn list_events(&self, year: u16) -> EngineResult<Vec<EventSummary>> {
        self.results.list_events(year).await
    }
}

/// Parse and bound-check a caller-supplied simulation count
pub fn parse_simulation_count(raw: &str) -> EngineResult<u32> {
    let count: i64 = raw.parse().map_err(|_| {
        EngineError::validation(format!(
            "Cannot parse number of simulations '{}' as an integer",
            raw
        ))
    })?;

    if count < 0 {
        return Err(EngineError::validation(
            "Number of simulations must not be negative",
        ));
    }

    if count > MAX_SIMULATIONS {
        return Err(EngineError::validation(format!(
            "Number of simulations exceeds the limit of {}",
            MAX_SIMULATIONS
        )));
    }

    u32::try_from(count).map_err(|_| EngineError::validation("Number of simulations out of range"))
}

/// Merge a prediction with its results record, if any
///
/// The match counts as played only when the record names a winner; the
/// actual scores are then copied as reported.
pub fn merge_view(prediction: MatchPrediction, result: Option<&MatchResult>) -> MergedMatchView {
    let team_keys = result.map(MatchResult::team_keys).unwrap_or_default();

    let outcome = match result {
        Some(r) => match r.winning_alliance {
            Some(winner) => MatchOutcome::Played {
                actual_winner: winner,
                actual_scores: r.scores(),
            },
            None => MatchOutcome::Upcoming,
        },
        None => MatchOutcome::Upcoming,
    };

    MergedMatchView {
        match_key: prediction.match_key,
        predicted_winner: prediction.predicted_winner,
        win_probability: prediction.win_probability,
        predicted_scores: prediction.predicted_scores,
        team_keys,
        outcome,
        shap_analysis: prediction.shap_analysis,
    }
}

/// Flatten a spawned task's outcome
fn joined<T>(outcome: Result<EngineResult<T>, JoinError>) -> EngineResult<T> {
    outcome.unwrap_or_else(|e| Err(EngineError::unavailable(format!("Upstream task aborted: {}", e))))
}
