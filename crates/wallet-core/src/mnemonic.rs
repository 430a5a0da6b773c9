use bip39::{Language, Mnemonic};
use crypto_utils::random::random_secret;

use crate::error::WalletError;

/// Converts a BIP-39 strength in bits into an entropy length in bytes.
///
/// Valid strengths are 128, 160, 192, 224 and 256 bits (12 to 24 words).
pub fn entropy_len_for_strength(strength_bits: u32) -> Result<usize, WalletError> {
    if !(128..=256).contains(&strength_bits) || strength_bits % 32 != 0 {
        return Err(WalletError::InvalidEntropy(format!(
            "strength must be 128..=256 bits in steps of 32, got {strength_bits}"
        )));
    }
    Ok((strength_bits / 8) as usize)
}

/// Generate a new English mnemonic from OS randomness.
pub fn generate_mnemonic(strength_bits: u32) -> Result<Mnemonic, WalletError> {
    let entropy = random_secret(entropy_len_for_strength(strength_bits)?);
    mnemonic_from_entropy(entropy.expose())
}

/// Build a mnemonic from raw entropy (16, 20, 24, 28 or 32 bytes).
pub fn mnemonic_from_entropy(entropy: &[u8]) -> Result<Mnemonic, WalletError> {
    Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| WalletError::InvalidEntropy(e.to_string()))
}

/// Parse and checksum-validate a mnemonic phrase.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, WalletError> {
    Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))
}

/// Whether `phrase` parses with a valid checksum.
pub fn validate_mnemonic(phrase: &str) -> bool {
    parse_mnemonic(phrase).is_ok()
}
