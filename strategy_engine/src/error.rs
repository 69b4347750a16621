use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the strategy engine.
///
/// An infeasible stop-count is not an error: the generator simply leaves
/// that plan out of its result.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A compound that is not part of the enumerated set, or that the loaded
    /// knowledge base has no profile for. Not recoverable per request.
    #[error("unknown compound: {0}")]
    UnknownCompound(String),

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("failed to read engine config at {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse engine config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StrategyError>;
