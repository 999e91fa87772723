//! The Blue Alliance API client
//!
//! Provides methods for reading match results and event metadata from the
//! TBA v3 REST API. Every call requires an API key.

use bbe_core::{EngineError, EngineResult, EventDetails, EventSummary, MatchResult};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Base URL for TBA API
pub const TBA_API_BASE: &str = "https://www.thebluealliance.com/api/v3";

/// Default deadline for every TBA call
pub const DEFAULT_RESULTS_TIMEOUT: Duration = Duration::from_secs(10);

const AUTH_HEADER: &str = "X-TBA-Auth-Key";

/// TBA API client
#[derive(Clone)]
pub struct TbaClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl TbaClient {
    /// Create a client against the public TBA API
    ///
    /// An empty key is treated the same as a missing one.
    pub fn new(api_key: Option<String>) -> EngineResult<Self> {
        Self::with_config(TBA_API_BASE, api_key, DEFAULT_RESULTS_TIMEOUT)
    }

    /// Create a client with an explicit base URL and deadline
    pub fn with_config(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| EngineError::config(format!("Invalid TBA base URL {}: {}", base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Get a single match by key
    #[instrument(skip(self))]
    pub async fn get_match(&self, match_key: &str) -> EngineResult<MatchResult> {
        self.get_json(&["match", match_key]).await
    }

    /// Get every match of an event, indexed by match key
    #[instrument(skip(self))]
    pub async fn get_event_matches(&self, event_key: &str) -> EngineResult<HashMap<String, MatchResult>> {
        let matches: Vec<MatchResult> = self
            .get_json(&["event", event_key, "matches", "simple"])
            .await?;

        debug!("TBA returned {} matches for {}", matches.len(), event_key);

        Ok(matches.into_iter().map(|m| (m.key.clone(), m)).collect())
    }

    /// Get event metadata
    #[instrument(skip(self))]
    pub async fn get_event_details(&self, event_key: &str) -> EngineResult<EventDetails> {
        self.get_json(&["event", event_key]).await
    }

    /// List all events of a season
    #[instrument(skip(self))]
    pub async fn list_events(&self, year: u16) -> EngineResult<Vec<EventSummary>> {
        self.get_json(&["events", &year.to_string(), "simple"]).await
    }

    /// Append `segments` to the base URL, percent-encoding each one
    fn url(&self, segments: &[&str]) -> EngineResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| EngineError::config(format!("TBA base URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue one authenticated GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> EngineResult<T> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EngineError::config("TBA_API_KEY is not configured"))?;

        let url = self.url(segments)?;
        let path = url.path().to_string();
        debug!("Fetching TBA resource: {}", url);

        let response = self
            .client
            .get(url)
            .header(AUTH_HEADER, api_key)
            .send()
            .await
            .map_err(|e| transport_error(&path, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("TBA API returned {} for {}: {}", status, path, body);
            return Err(EngineError::unavailable(format!(
                "TBA API error ({}) for {}",
                status, path
            )));
        }

        let body = response.bytes().await.map_err(|e| transport_error(&path, e))?;

        serde_json::from_slice(&body)
            .map_err(|e| EngineError::parse(format!("Failed to parse TBA response for {}: {}", path, e)))
    }
}

fn transport_error(path: &str, e: reqwest::Error) -> EngineError {
    if e.is_timeout() {
        EngineError::timeout(format!("TBA request {} timed out: {}", path, e))
    } else {
        EngineError::unavailable(format!("TBA request {} failed: {}", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbe_core::Alliance;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn match_json(key: &str, winner: &str, red: i32, blue: i32) -> serde_json::Value {
        serde_json::json!({
            "key": key,
            "comp_level": "qm",
            "event_key": "2025mxle",
            "winning_alliance": winner,
            "alliances": {
                "red": {"score": red, "team_keys": ["frc1", "frc2", "frc3"]},
                "blue": {"score": blue, "team_keys": ["frc4", "frc5", "frc6"]}
            }
        })
    }

    fn client_for(server: &MockServer, key: Option<&str>) -> TbaClient {
        TbaClient::with_config(
            &server.uri(),
            key.map(str::to_string),
            Duration::from_millis(500),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_match_sends_auth_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/match/2025mxle_qm1"))
            .and(header("X-TBA-Auth-Key", "secret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(match_json("2025mxle_qm1", "red", 100, 98)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, Some("secret"))
            .get_match("2025mxle_qm1")
            .await
            .unwrap();

        assert_eq!(result.winning_alliance, Some(Alliance::Red));
        assert_eq!(result.alliances.red.score, 100);
        assert_eq!(result.alliances.blue.team_keys.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, Some(""));
        assert!(!client.is_configured());

        let err = client.get_event_details("2025mxle").await.unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[tokio::test]
    async fn test_non_success_status_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/event/2025mxle"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("wrong"))
            .get_event_details("2025mxle")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/match/2025mxle_qm1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("secret"))
            .get_match("2025mxle_qm1")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[tokio::test]
    async fn test_slow_response_is_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/match/2025mxle_qm1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(match_json("2025mxle_qm1", "", -1, -1))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, Some("secret"))
            .get_match("2025mxle_qm1")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_event_matches_indexed_by_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/event/2025mxle/matches/simple"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                match_json("2025mxle_qm2", "", -1, -1),
                match_json("2025mxle_qm1", "blue", 80, 120),
            ])))
            .mount(&server)
            .await;

        let matches = client_for(&server, Some("secret"))
            .get_event_matches("2025mxle")
            .await
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert!(matches["2025mxle_qm1"].is_played());
        assert!(!matches["2025mxle_qm2"].is_played());
    }

    #[tokio::test]
    async fn test_event_matches_tolerate_null_scores() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/event/2025mxle/matches/simple"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                match_json("2025mxle_qm1", "red", 100, 98),
                {
                    "key": "2025mxle_sf1m1",
                    "comp_level": "sf",
                    "winning_alliance": "",
                    "alliances": {
                        "red": {"score": null, "team_keys": ["frc1", "frc2", "frc3"]},
                        "blue": {"score": null, "team_keys": null}
                    }
                }
            ])))
            .mount(&server)
            .await;

        let matches = client_for(&server, Some("secret"))
            .get_event_matches("2025mxle")
            .await
            .unwrap();

        assert_eq!(matches.len(), 2);
        assert!(matches["2025mxle_qm1"].is_played());
        assert_eq!(matches["2025mxle_qm1"].alliances.blue.score, 98);

        let upcoming = &matches["2025mxle_sf1m1"];
        assert!(!upcoming.is_played());
        assert_eq!(upcoming.alliances.red.score, bbe_core::UNPLAYED_SCORE);
        assert!(upcoming.alliances.blue.team_keys.is_empty());
    }

    #[tokio::test]
    async fn test_keys_are_percent_encoded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/match/2025mxle%2Fqm1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(match_json("2025mxle/qm1", "blue", 80, 120)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server, Some("secret"))
            .get_match("2025mxle/qm1")
            .await
            .unwrap();
        assert_eq!(result.key, "2025mxle/qm1");
    }

    #[test]
    fn test_base_path_is_kept() {
        let client = TbaClient::with_config(
            "https://www.thebluealliance.com/api/v3/",
            Some("secret".to_string()),
            DEFAULT_RESULTS_TIMEOUT,
        )
        .unwrap();

        let url = client.url(&["event", "2025mxle", "matches", "simple"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.thebluealliance.com/api/v3/event/2025mxle/matches/simple"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let result = TbaClient::with_config("not a url", None, DEFAULT_RESULTS_TIMEOUT);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[tokio::test]
    async fn test_list_events() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/events/2025/simple"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "key": "2025mxle",
                "name": "Regional Laguna",
                "event_code": "mxle",
                "event_type": 0,
                "city": "Torreon",
                "state_prov": "COA",
                "country": "Mexico",
                "start_date": "2025-03-05",
                "end_date": "2025-03-08"
            }])))
            .mount(&server)
            .await;

        let events = client_for(&server, Some("secret")).list_events(2025).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_code, "mxle");
    }
}
