//! Merged records returned to API callers

use crate::alliance::{Alliance, AllianceMap};
use crate::prediction::ShapAnalysis;
use crate::results::EventDetails;
use serde::{Deserialize, Serialize};

/// Whether a match has been played, with the actual result when it has
///
/// Serialised flat into the enclosing view as `status` plus
/// `actual_winner`/`actual_scores` for played matches only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MatchOutcome {
    Upcoming,
    Played {
        actual_winner: Alliance,
        actual_scores: AllianceMap<i32>,
    },
}

impl MatchOutcome {
    pub fn is_played(&self) -> bool {
        matches!(self, MatchOutcome::Played { .. })
    }
}

/// A prediction enriched with whatever is known about the real match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedMatchView {
    pub match_key: String,
    pub predicted_winner: Alliance,
    pub win_probability: AllianceMap<f32>,
    pub predicted_scores: AllianceMap<i32>,

    /// Team rosters; empty lists when results were unavailable
    pub team_keys: AllianceMap<Vec<String>>,

    #[serde(flatten)]
    pub outcome: MatchOutcome,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shap_analysis: Option<ShapAnalysis>,
}

/// Response for an event-wide prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPredictions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_details: Option<EventDetails>,
    pub predictions: Vec<MergedMatchView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(outcome: MatchOutcome) -> MergedMatchView {
        MergedMatchView {
            match_key: "2025mxle_qm1".to_string(),
            predicted_winner: Alliance::Blue,
            win_probability: AllianceMap::new(0.21, 0.79),
            predicted_scores: AllianceMap::new(95, 112),
            team_keys: AllianceMap::default(),
            outcome,
            shap_analysis: None,
        }
    }

    #[test]
    fn test_upcoming_omits_actual_fields() {
        let json = serde_json::to_value(view(MatchOutcome::Upcoming)).unwrap();
        assert_eq!(json["status"], "upcoming");
        assert!(json.get("actual_winner").is_none());
        assert!(json.get("actual_scores").is_none());
        assert!(json.get("shap_analysis").is_none());
        assert_eq!(json["team_keys"], serde_json::json!({"red": [], "blue": []}));
    }

    #[test]
    fn test_played_carries_actual_fields() {
        let json = serde_json::to_value(view(MatchOutcome::Played {
            actual_winner: Alliance::Red,
            actual_scores: AllianceMap::new(100, 98),
        }))
        .unwrap();
        assert_eq!(json["status"], "played");
        assert_eq!(json["actual_winner"], "red");
        assert_eq!(json["actual_scores"], serde_json::json!({"red": 100, "blue": 98}));
        assert_eq!(json["predicted_winner"], "blue");
    }

    #[test]
    fn test_event_details_omitted_when_absent() {
        let response = EventPredictions {
            event_details: None,
            predictions: vec![view(MatchOutcome::Upcoming)],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("event_details").is_none());
        assert_eq!(json["predictions"].as_array().unwrap().len(), 1);
    }
}
