//! Matchpoint gRPC client
//!
//! Each call is a single unary attempt bounded by the client deadline.

use crate::proto::{
    EventPredictionRequest, EventPredictionResponse, MatchPredictionRequest,
    MatchPredictionResponse, SimulationRequest, SimulationResultMessage, GET_MATCH_PREDICTION,
    PREDICT_ALL_EVENT_MATCHES, SIMULATE_PLAYOFFS,
};
use bbe_core::{AllianceOutlook, EngineError, EngineResult, MatchPrediction, SimulationMetadata};
use std::time::Duration;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::{debug, instrument};

/// Default deadline for every Matchpoint call
pub const DEFAULT_PREDICTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Matchpoint prediction engine client
///
/// Wraps a lazily connected channel. Cloning is cheap and every clone shares
/// the same underlying connection.
#[derive(Clone)]
pub struct MatchpointClient {
    grpc: Grpc<Channel>,
    address: String,
    timeout: Duration,
}

impl MatchpointClient {
    /// Create a client for the engine at `address` (e.g. `http://localhost:50051`)
    ///
    /// No connection is attempted until the first call.
    pub fn connect_lazy(address: &str, timeout: Duration) -> EngineResult<Self> {
        let endpoint = Endpoint::from_shared(address.to_string())
            .map_err(|e| EngineError::config(format!("Invalid Matchpoint address {}: {}", address, e)))?
            .connect_timeout(timeout);

        Ok(Self {
            grpc: Grpc::new(endpoint.connect_lazy()),
            address: address.to_string(),
            timeout,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Predict a single match
    #[instrument(skip(self))]
    pub async fn get_prediction(&self, match_key: &str) -> EngineResult<MatchPrediction> {
        let response: MatchPredictionResponse = self
            .unary(
                GET_MATCH_PREDICTION,
                MatchPredictionRequest {
                    match_key: match_key.to_string(),
                },
            )
            .await?;

        response.into_prediction()
    }

    /// Predict every match of an event, in the order the engine returns them
    #[instrument(skip(self))]
    pub async fn get_event_predictions(&self, event_key: &str) -> EngineResult<Vec<MatchPrediction>> {
        let response: EventPredictionResponse = self
            .unary(
                PREDICT_ALL_EVENT_MATCHES,
                EventPredictionRequest {
                    event_key: event_key.to_string(),
                },
            )
            .await?;

        debug!(
            "Matchpoint returned {} predictions for {}",
            response.predictions.len(),
            event_key
        );

        response
            .predictions
            .into_iter()
            .map(MatchPredictionResponse::into_prediction)
            .collect()
    }

    /// Run a Monte-Carlo playoff simulation
    #[instrument(skip(self))]
    pub async fn simulate_playoffs(
        &self,
        event_key: &str,
        simulation_count: u32,
    ) -> EngineResult<(SimulationMetadata, Vec<AllianceOutlook>)> {
        let response: SimulationResultMessage = self
            .unary(
                SIMULATE_PLAYOFFS,
                SimulationRequest {
                    event_key: event_key.to_string(),
                    n_sims: simulation_count,
                },
            )
            .await?;

        response.into_parts()
    }

    /// Issue one unary call under the client deadline
    async fn unary<Req, Resp>(&self, path: &'static str, message: Req) -> EngineResult<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let mut grpc = self.grpc.clone();
        let timeout = self.timeout;

        let call = async move {
            grpc.ready()
                .await
                .map_err(|e| Status::unavailable(format!("Matchpoint channel not ready: {}", e)))?;

            let mut request = tonic::Request::new(message);
            request.set_timeout(timeout);

            let codec = tonic_prost::ProstCodec::<Req, Resp>::default();
            grpc.unary(request, PathAndQuery::from_static(path), codec).await
        };

        debug!("Calling Matchpoint {} at {}", path, self.address);

        match tokio::time::timeout(timeout, call).await {
            Err(_) => Err(EngineError::timeout(format!(
                "Matchpoint call {} exceeded {:?}",
                path, timeout
            ))),
            Ok(Err(status)) => Err(status_to_error(path, status)),
            Ok(Ok(response)) => Ok(response.into_inner()),
        }
    }
}

/// Map a gRPC status onto the gateway taxonomy
fn status_to_error(path: &str, status: Status) -> EngineError {
    match status.code() {
        Code::DeadlineExceeded => {
            EngineError::timeout(format!("Matchpoint call {} timed out: {}", path, status.message()))
        }
        code => EngineError::unavailable(format!(
            "Matchpoint call {} failed ({:?}): {}",
            path,
            code,
            status.message()
        )),
    }
}
