//! Hex codec used at every boundary where callers hand us hex strings.
//!
//! Decoding is lenient about presentation (optional `0x` prefix, odd digit
//! count) and strict about content: any non-hex character is an error, never
//! skipped or truncated.

use std::borrow::Cow;

use crate::error::CryptoError;

/// Decodes a hex string into bytes.
///
/// - An optional `0x` / `0X` prefix is stripped.
/// - An odd number of digits is left-padded with a single `0`
///   (`"5"` decodes to `[0x05]`).
/// - The empty string (or a bare prefix) decodes to no bytes.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, CryptoError> {
    let (prefix_len, digits) = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(rest) => (2, rest),
        None => (0, input),
    };

    let padded: Cow<'_, str> = if digits.len() % 2 == 1 {
        Cow::Owned(format!("0{digits}"))
    } else {
        Cow::Borrowed(digits)
    };
    let pad = padded.len() - digits.len();

    hex::decode(padded.as_ref()).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => CryptoError::InvalidHexCharacter {
            character: c,
            position: index - pad + prefix_len,
        },
        // Unreachable after padding, but report it as a length problem.
        _ => CryptoError::InvalidLength {
            expected: padded.len() + 1,
            actual: padded.len(),
        },
    })
}

/// Encodes bytes as lowercase hex without a prefix.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
