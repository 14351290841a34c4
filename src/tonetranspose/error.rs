use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransposeError {
    #[error("value for pitch number not valid: {0}")]
    InvalidPitchNumber(i32),

    #[error("note name does not exist: {0}")]
    InvalidNoteName(String),

    /// Lookup into the 12 transpositions with an index outside 1..=12
    #[error("no transposition at position {0}")]
    InvalidPitchIndex(i32),

    #[error("could not parse input: {0}")]
    Parse(String),
}
