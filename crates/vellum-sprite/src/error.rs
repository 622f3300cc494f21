//! Diagnostics for lifecycle misuse.
//!
//! None of these propagate out of the batch API. They are logged and kept as
//! the batch's most recent diagnostic so tools and tests can inspect them.

use std::fmt;

/// Whether a frame session is accepting sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Closed,
    Open,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Closed => write!(f, "closed"),
            SessionState::Open => write!(f, "open"),
        }
    }
}

/// A recoverable misuse of the sprite batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteBatchError {
    /// An operation was called in the wrong session state.
    InvalidState {
        /// The operation that was called.
        operation: &'static str,
        /// The state the operation requires.
        expected: SessionState,
        /// The state the batch was in.
        actual: SessionState,
    },

    /// The frame already holds the maximum number of sprites.
    FrameFull {
        /// The per-frame sprite limit.
        limit: usize,
    },
}

impl fmt::Display for SpriteBatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteBatchError::InvalidState {
                operation,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "SpriteBatch::{operation} called while the session is {actual} (expected {expected})"
                )
            }
            SpriteBatchError::FrameFull { limit } => {
                write!(f, "Frame already holds the maximum of {limit} sprites")
            }
        }
    }
}

impl std::error::Error for SpriteBatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_message() {
        let err = SpriteBatchError::InvalidState {
            operation: "end",
            expected: SessionState::Open,
            actual: SessionState::Closed,
        };
        assert_eq!(
            err.to_string(),
            "SpriteBatch::end called while the session is closed (expected open)"
        );
    }
}
