//! Error types for clockwork-core.

use thiserror::Error;

/// Result type for board, level and session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building boards, loading levels or configuring a session.
///
/// Normal outcomes of a connectivity pass (no neighbour, no match) are never errors,
/// and a rotation request on a hex that is still turning is simply ignored.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration id outside the eight connector layouts.
    #[error("invalid hex configuration {0}: expected 1..=8")]
    InvalidConfiguration(u8),

    /// Two hexes were placed on the same coordinate.
    #[error("duplicate placement at row {row}, col {col}")]
    DuplicatePlacement { row: i32, col: i32 },

    /// The seed or goal role names a coordinate with no hex on it.
    #[error("{role} hex at row {row}, col {col} is not on the board")]
    RoleNotOnBoard {
        role: &'static str,
        row: i32,
        col: i32,
    },

    /// A level with no placements.
    #[error("level has no placements")]
    EmptyBoard,

    /// A board operation addressed an empty coordinate.
    #[error("no hex at row {row}, col {col}")]
    UnknownHex { row: i32, col: i32 },

    /// A malformed line in the `row, col, configuration` placement format.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Level pack or config JSON could not be decoded.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// Game configuration values that cannot drive a session.
    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    /// The session was asked for a level the pack does not contain.
    #[error("level {0} is out of range")]
    LevelOutOfRange(usize),
}
