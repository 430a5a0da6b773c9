use thiserror::Error;

/// Low-level codec and randomness errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid hex character {character:?} at position {position}")]
    InvalidHexCharacter { character: char, position: usize },

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
