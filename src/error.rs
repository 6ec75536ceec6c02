//! Error types for the kibitz crate

use thiserror::Error;

/// Main error type for the kibitz crate
///
/// "No recommended move" is never an error; every strategy reports it as
/// `None`. These variants cover malformed boards and illegal operations only.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell ({row}, {col}) is outside a board of size {size}")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("board string '{context}' has no rows")]
    EmptyBoard { context: String },

    #[error("row {row} has {got} cells, expected {expected} in '{context}'")]
    InvalidRowLength {
        row: usize,
        got: usize,
        expected: usize,
        context: String,
    },

    #[error("invalid character '{character}' at row {row}, column {col} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        row: usize,
        col: usize,
        context: String,
    },

    #[error("invalid strategy '{input}'. Expected one of: {expected}")]
    ParseStrategy { input: String, expected: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
