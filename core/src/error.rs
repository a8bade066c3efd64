//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The descriptor text is not well-formed markup.
    #[from(ignore)]
    #[display("Parse Error: {_0}")]
    Parse(String),

    /// A node the transformation depends on is missing.
    #[from(ignore)]
    #[display("Structural Error: missing <{node}> in {context}")]
    Structural {
        /// Name of the missing element.
        node: String,
        /// Human readable location of the scope that required it.
        context: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Builds a parse error from anything printable (reader errors, positions).
    pub(crate) fn parse(err: impl std::fmt::Display) -> Self {
        AppError::Parse(err.to_string())
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
