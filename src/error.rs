use thiserror::Error;

use crate::tools::Tool;

/// Invariant violations raised while building or mutating elements.
///
/// These never come from user input in a correct build: the toolbar only
/// offers known tools and the selection tool never reaches the factory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    /// A tool name that does not map to any [`Tool`]
    #[error("Type not recognised: {0}")]
    UnknownTool(String),

    /// The tool exists but does not create elements
    #[error("Tool {0:?} cannot create elements")]
    NotADrawingTool(Tool),
}

/// Errors raised by environment-driven configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue {
        var: &'static str,
        value: String,
    },
}

/// Failures of the remote solve round trip.
///
/// None of these are retried; the caller logs them and clears its busy flag.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("Failed to encode canvas snapshot: {0}")]
    Encode(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClientBuild(String),

    #[error("Solve request failed: {0}")]
    Request(String),

    #[error("Solve endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse solve response: {0}")]
    Parse(String),

    #[error("Solve request was dropped before it finished")]
    Cancelled,
}
