//! Error types for LinkForge

use thiserror::Error;

use crate::arena::ArenaError;

/// Main error type for sentence preparation.
///
/// Cost-cutoff and out-of-range pruning are not errors; they only shrink
/// the output. Every variant here means the sentence was abandoned and no
/// partial disjunct list is visible to the parser.
#[derive(Debug, Error)]
pub enum LinkForgeError {
    /// The dictionary handed over an expression that violates the
    /// expression contract.
    #[error("Malformed expression for word {word} ({string}): {source}")]
    MalformedExpression {
        word: usize,
        string: String,
        #[source]
        source: ExpressionError,
    },

    /// A sentence pool reached its configured record limit.
    #[error(transparent)]
    ArenaExhausted(#[from] ArenaError),

    /// A resource termination fired between words.
    #[error("Resources exhausted after word {word}: {reason}")]
    ResourcesExhausted { word: usize, reason: String },

    /// Invalid parse options reached the pipeline.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Contract violations inside a single expression tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("cost {0} is negative or not finite")]
    InvalidCost(f64),

    #[error("connector {label} has a zero length limit")]
    ZeroLengthLimit { label: String },

    #[error("connector label symbol #{0} is not interned")]
    UnknownLabel(u32),
}

/// Result type alias for LinkForge operations
pub type Result<T> = std::result::Result<T, LinkForgeError>;
