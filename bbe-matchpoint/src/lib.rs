//! Matchpoint integration for the Blue Banner Engine
//!
//! This crate provides a client for the Matchpoint prediction engine,
//! which computes match predictions and playoff simulations behind a
//! gRPC interface.

pub mod client;
pub mod proto;

pub use client::{MatchpointClient, DEFAULT_PREDICTION_TIMEOUT};
