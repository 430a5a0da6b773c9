//! Wallet bridge for the mobile app: HD wallet lifecycle, per-coin address
//! derivation and transaction signing, exported to Kotlin and Swift through
//! UniFFI.
//!
//! The host holds a [`WalletSession`]; everything secret stays inside it.

pub mod assembler;
pub mod coins;
pub mod config;
pub mod derivation_path;
pub mod error;
pub mod hd_wallet;
pub mod mnemonic;
pub mod params;
pub mod session;
pub mod types;

pub use config::SigningDefaults;
pub use error::WalletError;
pub use session::WalletSession;
pub use types::{Coin, DerivedAccount, SignedTransaction, WalletInfo};

uniffi::include_scaffolding!("wallet_core");

// ─── UniFFI-exported functions ───────────────────────────────────────
// UniFFI passes owned strings across the boundary.

/// Identifiers accepted wherever a coin is named.
pub fn supported_coins() -> Vec<String> {
    Coin::ALL.iter().map(|coin| coin.identifier().to_string()).collect()
}

/// Whether `phrase` is an English BIP-39 mnemonic with a valid checksum.
pub fn validate_mnemonic(phrase: String) -> bool {
    mnemonic::validate_mnemonic(&phrase)
}

/// Normalizes hardened markers in `path` the way signing and derivation do.
pub fn escape_derivation_path(path: String) -> String {
    derivation_path::escape_derivation_path(&path)
}
