//! Per-coin address derivation and transaction signing.
//!
//! The session parses a [`Coin`] from the caller's identifier, then
//! dispatches through [`handler_for`]. Supporting a new coin means adding a
//! `Coin` variant and a [`CoinHandler`] implementation here.

pub mod ethereum;

use crate::assembler::SigningRequest;
use crate::error::WalletError;
use crate::hd_wallet::PrivateKey;
use crate::types::Coin;

/// Raw output of a coin's signing primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningResult {
    pub r: Vec<u8>,
    pub s: Vec<u8>,
    pub v: Vec<u8>,
    /// Serialized signed transaction, ready to broadcast.
    pub encoded: Vec<u8>,
    pub tx_hash: Vec<u8>,
}

pub trait CoinHandler: Send + Sync {
    fn coin(&self) -> Coin;

    /// Address controlled by `key`, in the coin's display format.
    fn derive_address(&self, key: &PrivateKey) -> Result<String, WalletError>;

    /// Signs a fully assembled request.
    fn sign(&self, request: &SigningRequest) -> Result<SigningResult, WalletError>;
}

static ETHEREUM: ethereum::EthereumHandler = ethereum::EthereumHandler;

/// The signing and address capability for `coin`.
pub fn handler_for(coin: Coin) -> &'static dyn CoinHandler {
    match coin {
        Coin::Ethereum => &ETHEREUM,
    }
}
