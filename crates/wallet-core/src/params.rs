//! The signing parameter bag as the host app sends it.
//!
//! The bridge hands over a JSON object. Every recognized key must hold a
//! string when present; `null` counts as absent and unknown keys are ignored.

use crypto_utils::hex_codec::decode_hex;
use serde_json::{Map, Value};

use crate::error::WalletError;

/// Widest integer a transaction field may carry (uint256).
pub const MAX_FIELD_BYTES: usize = 32;

/// Keys of the parameter bag, also used as field names in errors.
pub mod keys {
    pub const CHAIN_ID: &str = "chainId";
    /// Spelling older JavaScript clients send.
    pub const CHAIN_ID_LEGACY: &str = "chainID";
    pub const GAS_PRICE: &str = "gasPrice";
    pub const GAS_LIMIT: &str = "gasLimit";
    pub const NONCE: &str = "nonce";
    pub const TO_ADDRESS: &str = "toAddress";
    pub const AMOUNT: &str = "amount";
    pub const PRIVATE_KEY_DERIVATION_PATH: &str = "privateKeyDerivationPath";
}

/// Caller input for a signing request. Every field is optional here;
/// the assembler decides which ones are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SigningParameters {
    pub chain_id: Option<String>,
    pub gas_price: Option<String>,
    pub gas_limit: Option<String>,
    pub nonce: Option<String>,
    pub to_address: Option<String>,
    pub amount: Option<String>,
    pub private_key_derivation_path: Option<String>,
}

impl SigningParameters {
    /// Parses the bag the host sends as a JSON object.
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|_| WalletError::InvalidParameterType("params".into()))?;
        Self::from_value(&value)
    }

    /// Reads the bag from an already parsed JSON value, which must be an object.
    pub fn from_value(value: &Value) -> Result<Self, WalletError> {
        let bag = value
            .as_object()
            .ok_or_else(|| WalletError::InvalidParameterType("params".into()))?;

        Ok(Self {
            chain_id: string_field(bag, keys::CHAIN_ID, &[keys::CHAIN_ID_LEGACY])?,
            gas_price: string_field(bag, keys::GAS_PRICE, &[])?,
            gas_limit: string_field(bag, keys::GAS_LIMIT, &[])?,
            nonce: string_field(bag, keys::NONCE, &[])?,
            to_address: string_field(bag, keys::TO_ADDRESS, &[])?,
            amount: string_field(bag, keys::AMOUNT, &[])?,
            private_key_derivation_path: string_field(
                bag,
                keys::PRIVATE_KEY_DERIVATION_PATH,
                &[],
            )?,
        })
    }
}

/// Decodes one hex-bearing field, tagging any failure with the field's name.
///
/// Anything that is not hex, or wider than [`MAX_FIELD_BYTES`], is an
/// `InvalidHexString(field)`.
pub fn decode_field(field: &str, value: &str) -> Result<Vec<u8>, WalletError> {
    let bytes = decode_hex(value).map_err(|e| {
        log::warn!("rejected {field}: {e}");
        WalletError::InvalidHexString(field.into())
    })?;

    if bytes.len() > MAX_FIELD_BYTES {
        log::warn!("rejected {field}: {} bytes exceeds uint256", bytes.len());
        return Err(WalletError::InvalidHexString(field.into()));
    }
    Ok(bytes)
}

/// Reads `field` (or the first present alias) as a string.
fn string_field(
    bag: &Map<String, Value>,
    field: &'static str,
    aliases: &[&str],
) -> Result<Option<String>, WalletError> {
    let found = std::iter::once(field)
        .chain(aliases.iter().copied())
        .find_map(|key| bag.get(key).filter(|v| !v.is_null()));

    match found {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(WalletError::InvalidParameterType(field.into())),
    }
}
