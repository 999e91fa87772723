//! Predictions produced by the Matchpoint engine

use crate::alliance::{Alliance, AllianceMap};
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

/// Model prediction for a single match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPrediction {
    pub match_key: String,

    pub predicted_winner: Alliance,

    /// Probability of each alliance winning, each in [0, 1]
    pub win_probability: AllianceMap<f32>,

    pub predicted_scores: AllianceMap<i32>,

    /// Feature attribution for the prediction, when the engine supplies one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shap_analysis: Option<ShapAnalysis>,
}

/// SHAP explainability attribution
///
/// `values`, `feature_names` and `feature_data` are parallel lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapAnalysis {
    pub base_value: f32,
    pub values: Vec<f32>,
    pub feature_names: Vec<String>,
    pub feature_data: Vec<f32>,
}

impl ShapAnalysis {
    /// Build an attribution, rejecting lists of unequal length
    pub fn new(
        base_value: f32,
        values: Vec<f32>,
        feature_names: Vec<String>,
        feature_data: Vec<f32>,
    ) -> EngineResult<Self> {
        if values.len() != feature_names.len() || values.len() != feature_data.len() {
            return Err(EngineError::parse(format!(
                "SHAP lists differ in length (values {}, names {}, data {})",
                values.len(),
                feature_names.len(),
                feature_data.len()
            )));
        }

        Ok(Self {
            base_value,
            values,
            feature_names,
            feature_data,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
