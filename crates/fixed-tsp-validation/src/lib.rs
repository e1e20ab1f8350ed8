#![deny(clippy::all)]
//! Randomised cross-check of the fixed-endpoint TSP solvers.
//!
//! Every generated instance is solved with every [`Strategy`]; the exhaustive
//! answer is the reference and any other strategy returning a different route
//! or distance is reported as a disagreement.
//!
//! [`Strategy`]: fixed_tsp_brute_force::Strategy

pub mod config;
pub mod error;
pub mod instance;
pub mod sweep;

pub use config::{SweepConfig, MAX_DISTANCE, MAX_INTERMEDIATES};
pub use error::SweepError;
pub use instance::Instance;
pub use sweep::{run_sweep, Disagreement, StrategyRun, SweepRecord, SweepSummary};
