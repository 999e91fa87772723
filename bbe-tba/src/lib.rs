//! The Blue Alliance integration for the Blue Banner Engine
//!
//! This crate provides a client for the TBA v3 REST API, used to look up
//! actual match results, event metadata and season event listings.

pub mod client;

pub use client::{TbaClient, DEFAULT_RESULTS_TIMEOUT, TBA_API_BASE};
