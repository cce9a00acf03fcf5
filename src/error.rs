//! Error types for the RLC analysis crate.
//!
//! The analysis engine itself never fails: every singular input is clamped
//! or replaced by a limiting expression. [`RlcError`] only covers the outer
//! surfaces where text and files are ingested or results are written out.

use thiserror::Error;

/// Result type alias using [`RlcError`].
pub type Result<T> = std::result::Result<T, RlcError>;

/// Unified error type for all fallible `rlc_core` operations.
#[derive(Error, Debug)]
pub enum RlcError {
    // ============ Description Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A required element (R, L or C) was never declared
    #[error("Circuit description has no {kind} (declare one, e.g. '{kind}1 <value>')")]
    MissingComponent { kind: char },

    /// The same element kind was declared twice
    #[error("Duplicate component '{name}': the circuit holds exactly one R, L and C")]
    DuplicateComponent { name: String },

    // ============ Parameter Errors ============
    /// Parameter rejected at the configuration boundary
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // ============ I/O Errors ============
    /// Error reading a description or snapshot file
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot error: {0}")]
    SnapshotError(#[from] serde_json::Error),

    /// Error writing tabular output
    #[error("Output error: {0}")]
    OutputError(#[from] std::io::Error),
}

impl RlcError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}
