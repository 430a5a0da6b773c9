use std::fmt;

use bip32::{DerivationPath, XPrv};
use bip39::Mnemonic;
use crypto_utils::zeroizing::{SecretArray, SecretString};
use zeroize::Zeroize;

use crate::error::WalletError;
use crate::mnemonic;
use crate::types::Coin;

/// A secp256k1 private key, wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(SecretArray<32>);

impl PrivateKey {
    /// Wraps raw scalar bytes; validity is checked when the key is used.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(SecretArray::new(bytes))
    }

    /// Borrow the raw key bytes.
    pub fn bytes(&self) -> &[u8; 32] {
        self.0.expose()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// Source of private keys for signing and address derivation.
///
/// [`HdWallet`] is the production implementation; the assembler only sees
/// this trait so it never depends on how keys are stored.
pub trait KeySource {
    /// Key at the coin's standard BIP-44 path.
    fn default_key_for_coin(&self, coin: Coin) -> Result<PrivateKey, WalletError>;

    /// Key at an explicit BIP-32 path such as `m/44'/60'/0'/0/1`.
    fn key_at_path(&self, path: &str) -> Result<PrivateKey, WalletError>;
}

/// A BIP-39 / BIP-32 hierarchical deterministic wallet.
///
/// Holds the normalized mnemonic and the 64-byte seed derived from it with
/// the caller's passphrase. Both are zeroized when the wallet is dropped.
pub struct HdWallet {
    mnemonic: SecretString,
    seed: SecretArray<64>,
}

impl HdWallet {
    /// Generate a wallet from fresh entropy of `strength_bits` bits.
    pub fn generate(strength_bits: u32, passphrase: &str) -> Result<Self, WalletError> {
        let mnemonic = mnemonic::generate_mnemonic(strength_bits)?;
        Ok(Self::from_parsed(mnemonic, passphrase))
    }

    /// Import a wallet from a mnemonic phrase. The checksum is validated
    /// before anything is derived.
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self, WalletError> {
        let mnemonic = mnemonic::parse_mnemonic(phrase)?;
        Ok(Self::from_parsed(mnemonic, passphrase))
    }

    /// Import a wallet from raw BIP-39 entropy.
    pub fn from_entropy(entropy: &[u8], passphrase: &str) -> Result<Self, WalletError> {
        if entropy.is_empty() {
            return Err(WalletError::InvalidEntropy("entropy is empty".into()));
        }
        let mnemonic = mnemonic::mnemonic_from_entropy(entropy)?;
        Ok(Self::from_parsed(mnemonic, passphrase))
    }

    fn from_parsed(mnemonic: Mnemonic, passphrase: &str) -> Self {
        let mut seed = mnemonic.to_seed(passphrase);
        let wallet = Self {
            mnemonic: SecretString::new(mnemonic.to_string()),
            seed: SecretArray::new(seed),
        };
        seed.zeroize();
        wallet
    }

    /// Normalized mnemonic phrase.
    pub fn mnemonic(&self) -> &str {
        self.mnemonic.expose()
    }

    /// 64-byte BIP-39 seed (mnemonic + passphrase).
    pub fn seed(&self) -> &[u8; 64] {
        self.seed.expose()
    }
}

impl KeySource for HdWallet {
    fn default_key_for_coin(&self, coin: Coin) -> Result<PrivateKey, WalletError> {
        derive_private_key(self.seed.expose(), &coin.default_derivation_path())
    }

    fn key_at_path(&self, path: &str) -> Result<PrivateKey, WalletError> {
        derive_private_key(self.seed.expose(), path)
    }
}

impl fmt::Debug for HdWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HdWallet([REDACTED])")
    }
}

/// Derive a secp256k1 private key from a seed using BIP-32.
fn derive_private_key(seed: &[u8], path: &str) -> Result<PrivateKey, WalletError> {
    let parsed: DerivationPath = path.parse().map_err(|e: bip32::Error| {
        WalletError::KeyDerivationFailed(format!("invalid derivation path {path:?}: {e}"))
    })?;

    let xprv = XPrv::derive_from_path(seed, &parsed)
        .map_err(|e| WalletError::KeyDerivationFailed(e.to_string()))?;

    let mut key_bytes: [u8; 32] = xprv.to_bytes().into();
    let key = PrivateKey::new(key_bytes);
    key_bytes.zeroize();
    Ok(key)
}
