//! # crypto-utils
//!
//! Secure random generation, memory hygiene for secret material, and the
//! hex codec shared by every bridge entry point.

pub mod error;
pub mod hex_codec;
pub mod random;
pub mod zeroizing;

pub use error::CryptoError;
