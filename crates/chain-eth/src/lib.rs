//! Ethereum signing primitive for the wallet bridge.
//!
//! This crate provides:
//! - Ethereum address derivation from secp256k1 keys (with EIP-55 checksums)
//! - Legacy (EIP-155 replay-protected) transaction encoding and signing
//!
//! Integer transaction fields are accepted as big-endian byte strings, the
//! representation the bridge hands over after decoding caller hex.

pub mod address;
pub mod error;
pub mod transaction;
