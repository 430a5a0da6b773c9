use std::fmt;
use std::str::FromStr;

use crate::error::WalletError;

/// Coins the bridge can derive addresses for and sign with.
///
/// Adding a coin means adding a variant here and a handler in
/// [`crate::coins`]; the signing request assembler does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coin {
    Ethereum,
}

impl Coin {
    pub const ALL: [Coin; 1] = [Coin::Ethereum];

    /// Identifier the host app uses for this coin.
    pub fn identifier(&self) -> &'static str {
        match self {
            Coin::Ethereum => "ethereum",
        }
    }

    /// SLIP-44 coin type
    pub fn coin_type(&self) -> u32 {
        match self {
            Coin::Ethereum => 60,
        }
    }

    /// BIP-44 path of the coin's default key: `m/44'/coin_type'/0'/0/0`.
    pub fn default_derivation_path(&self) -> String {
        format!("m/44'/{}'/0'/0/0", self.coin_type())
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Coin {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coin::ALL
            .into_iter()
            .find(|coin| coin.identifier() == s)
            .ok_or_else(|| WalletError::UnsupportedCoin(s.to_string()))
    }
}

/// Mnemonic and seed of a freshly created or imported wallet.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletInfo {
    pub mnemonic: String,
    /// 64-byte BIP-39 seed, lowercase hex (128 characters).
    pub seed: String,
}

impl fmt::Debug for WalletInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletInfo")
            .field("mnemonic", &"[REDACTED]")
            .field("seed", &"[REDACTED]")
            .finish()
    }
}

/// Address derived for a coin. `private_key` (lowercase hex) is only
/// populated when the caller asked for an explicit derivation path.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedAccount {
    pub address: String,
    pub private_key: Option<String>,
}

impl fmt::Debug for DerivedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedAccount")
            .field("address", &self.address)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Signature components and the encoded signed transaction, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub r: String,
    pub s: String,
    pub v: String,
    pub encoded: String,
    /// Keccak-256 of `encoded`, i.e. the on-chain transaction hash.
    pub tx_hash: String,
}
