use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};
use zeroize::Zeroize;

use crate::error::EthError;

/// Derives the EIP-55 checksummed address controlled by a secp256k1 private key.
pub fn private_key_to_address(private_key: &[u8; 32]) -> Result<String, EthError> {
    let mut key_bytes = *private_key;
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| EthError::InvalidPrivateKey(e.to_string()));
    key_bytes.zeroize();
    let signing_key = signing_key?;

    let point = signing_key.verifying_key().to_encoded_point(false);
    let uncompressed: [u8; 65] = point
        .as_bytes()
        .try_into()
        .map_err(|_| EthError::InvalidPublicKey("unexpected uncompressed key length".into()))?;

    pubkey_to_eth_address(&uncompressed)
}

/// Derives the EIP-55 checksummed address for an uncompressed public key
/// (65 bytes, `0x04 || x || y`).
///
/// The address is the last 20 bytes of Keccak-256 over `x || y`.
pub fn pubkey_to_eth_address(uncompressed_pubkey: &[u8; 65]) -> Result<String, EthError> {
    if uncompressed_pubkey[0] != 0x04 {
        return Err(EthError::InvalidPublicKey(
            "uncompressed key must start with 0x04".into(),
        ));
    }

    let hash = Keccak256::digest(&uncompressed_pubkey[1..]);
    let mut raw = [0u8; 20];
    raw.copy_from_slice(&hash[12..]);

    Ok(to_checksum(&raw))
}

/// Parses a `0x`-prefixed, 40-digit address into its raw 20 bytes.
///
/// Checksum case is not verified here; use [`validate_address`] for that.
pub fn parse_address(address: &str) -> Result<[u8; 20], EthError> {
    let digits = strip_0x(address)?;

    if digits.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            digits.len()
        )));
    }

    let mut raw = [0u8; 20];
    hex::decode_to_slice(digits, &mut raw)
        .map_err(|e| EthError::InvalidAddress(format!("invalid hex: {e}")))?;
    Ok(raw)
}

/// Validates an address string.
///
/// Malformed input is an error. Well-formed all-lowercase or all-uppercase
/// addresses are accepted; mixed case must match the EIP-55 checksum, and a
/// mismatch returns `Ok(false)`.
pub fn validate_address(address: &str) -> Result<bool, EthError> {
    let raw = parse_address(address)?;
    let digits = &address[2..];

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return Ok(true);
    }

    Ok(to_checksum(&raw)[2..] == *digits)
}

/// Re-encodes an address string with EIP-55 mixed-case checksum.
pub fn checksum_address(address: &str) -> Result<String, EthError> {
    parse_address(address).map(|raw| to_checksum(&raw))
}

fn strip_0x(address: &str) -> Result<&str, EthError> {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| EthError::InvalidAddress("address must start with 0x".into()))
}

/// EIP-55: uppercase each letter whose nibble in keccak(lowercase hex) is >= 8.
fn to_checksum(raw: &[u8; 20]) -> String {
    let lower = hex::encode(raw);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
