//! Alliance definitions

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One of the two competing sides in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alliance::Red => "red",
            Alliance::Blue => "blue",
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Alliance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(Alliance::Red),
            "blue" => Ok(Alliance::Blue),
            _ => Err(format!("Unknown alliance: {}", s)),
        }
    }
}

/// A value per alliance, serialised as `{"red": .., "blue": ..}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllianceMap<T> {
    pub red: T,
    pub blue: T,
}

impl<T> AllianceMap<T> {
    pub fn new(red: T, blue: T) -> Self {
        Self { red, blue }
    }

    pub fn get(&self, alliance: Alliance) -> &T {
        match alliance {
            Alliance::Red => &self.red,
            Alliance::Blue => &self.blue,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> AllianceMap<U> {
        AllianceMap {
            red: f(&self.red),
            blue: f(&self.blue),
        }
    }
}

/// Decode a winning alliance where `""` and `null` mean "no winner yet"
pub fn deserialize_optional_alliance<'de, D>(deserializer: D) -> Result<Option<Alliance>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alliance() {
        assert_eq!("red".parse::<Alliance>().unwrap(), Alliance::Red);
        assert_eq!("Blue".parse::<Alliance>().unwrap(), Alliance::Blue);
        assert!("green".parse::<Alliance>().is_err());
    }

    #[test]
    fn test_alliance_map_serializes_by_color() {
        let scores = AllianceMap::new(95, 112);
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json, serde_json::json!({"red": 95, "blue": 112}));
        assert_eq!(*scores.get(Alliance::Blue), 112);
    }
}
