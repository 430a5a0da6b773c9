use thiserror::Error;

/// Failures while deriving addresses or encoding and signing legacy transactions.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// An integer field does not fit in a uint256.
    #[error("{field} is {len} bytes, exceeds 32-byte integer")]
    IntegerTooLarge { field: &'static str, len: usize },

    #[error("signing error: {0}")]
    SigningError(String),
}
