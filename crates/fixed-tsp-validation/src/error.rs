use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("invalid sweep configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write sweep record: {0}")]
    Write(#[source] io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{strategy} returned no route for instance {instance}")]
    NoRoute { instance: usize, strategy: String },

    #[error("{strategy} disagrees with exhaustive search on instance {instance}")]
    Disagreement { instance: usize, strategy: String },
}
