//! Actual match results and event metadata from The Blue Alliance

use crate::alliance::{deserialize_optional_alliance, Alliance, AllianceMap};
use serde::{Deserialize, Deserializer, Serialize};

/// Score TBA uses for a match that has not been played
pub const UNPLAYED_SCORE: i32 = -1;

/// Score and roster of one alliance in a played (or scheduled) match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllianceScore {
    /// TBA reports `null` or -1 for matches that have not been played
    #[serde(default = "unplayed_score", deserialize_with = "deserialize_score")]
    pub score: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_keys: Vec<String>,
}

/// A match as reported by the results provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub key: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub comp_level: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_key: Option<String>,

    /// `None` until the match has a winner
    #[serde(default, deserialize_with = "deserialize_optional_alliance")]
    pub winning_alliance: Option<Alliance>,

    pub alliances: AllianceMap<AllianceScore>,
}

impl MatchResult {
    pub fn is_played(&self) -> bool {
        self.winning_alliance.is_some()
    }

    pub fn team_keys(&self) -> AllianceMap<Vec<String>> {
        self.alliances.map(|a| a.team_keys.clone())
    }

    pub fn scores(&self) -> AllianceMap<i32> {
        self.alliances.map(|a| a.score)
    }
}

/// Event metadata, passed through to callers as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub event_type_string: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub webcasts: Vec<Webcast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webcast {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel: String,
}

/// Simplified event entry used by the season listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub key: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_type: i32,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

fn unplayed_score() -> i32 {
    UNPLAYED_SCORE
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or(UNPLAYED_SCORE))
}

/// Decode an explicit `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
