use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Carries the name of the field that failed to decode.
    #[error("The hex string provided for {0} is invalid")]
    InvalidHexString(String),

    #[error("Invalid entropy: {0}")]
    InvalidEntropy(String),

    #[error("A wallet has not been loaded yet; create or import one first")]
    NoWalletLoaded,

    #[error("Unsupported coin: {0}")]
    UnsupportedCoin(String),

    #[error("Missing {0} in signing input")]
    MissingParameter(String),

    #[error("{0} must be a string")]
    InvalidParameterType(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

impl WalletError {
    /// Stable code the host bridge uses when rejecting a promise.
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::InvalidMnemonic(_) => "ERROR_INVALID_MNEMONIC",
            WalletError::InvalidHexString(_) => "ERROR_INVALID_HEXSTRING",
            WalletError::InvalidEntropy(_) => "ERROR_INVALID_ENTROPY",
            WalletError::NoWalletLoaded => "ERROR_NO_WALLET_LOADED",
            WalletError::UnsupportedCoin(_) => "ERROR_UNSUPPORTED_COIN",
            WalletError::MissingParameter(_) | WalletError::InvalidParameterType(_) => {
                "ERROR_INVALID_SIGNING_PARAM"
            }
            WalletError::KeyDerivationFailed(_) => "ERROR_KEY_DERIVATION_FAILED",
            WalletError::SigningFailed(_) => "ERROR_SIGNING_FAILED",
        }
    }
}

impl From<chain_eth::error::EthError> for WalletError {
    fn from(e: chain_eth::error::EthError) -> Self {
        WalletError::SigningFailed(format!("ETH: {e}"))
    }
}
