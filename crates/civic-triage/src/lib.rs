//! Decision engine for triaging citizen-submitted complaints.
//!
//! The [`analysis`] module hosts the deterministic engines for priority
//! scoring, trend detection, summary synthesis, and recommendation
//! generation, plus the service facade and HTTP router that expose them.
//! Classification of the raw complaint text is an external collaborator
//! reached through the [`analysis::Classifier`] seam; nothing in this crate
//! trains, loads, or persists a model.

pub mod analysis;
pub mod config;
pub mod error;
pub mod telemetry;
