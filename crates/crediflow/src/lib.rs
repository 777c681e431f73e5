//! Crediflow computes a composite trust score for subjects who lack a
//! conventional credit history, working from two CSV ledgers: bank
//! transactions and daily income. The [`scoring`] module holds the whole
//! pipeline (dataset resolution, feature extraction, the weighted model,
//! and narrative rendering); [`config`], [`telemetry`], and [`error`]
//! carry the service plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
