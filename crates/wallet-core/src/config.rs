use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::params::{decode_field, keys};

/// Values used for signing fields the caller leaves out, as hex strings.
///
/// Deserializes from camelCase JSON; missing keys keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SigningDefaults {
    pub chain_id: String,
    pub gas_price: String,
    pub gas_limit: String,
    pub nonce: String,
}

impl Default for SigningDefaults {
    fn default() -> Self {
        Self {
            // Ethereum mainnet
            chain_id: "01".into(),
            // 3,600,000,000 wei
            gas_price: "d693a400".into(),
            // 21,000, a plain value transfer
            gas_limit: "5208".into(),
            nonce: "00".into(),
        }
    }
}

impl SigningDefaults {
    /// Checks every default against the same rules the assembler applies
    /// to caller input: valid hex, at most 32 bytes.
    pub fn validate(&self) -> Result<(), WalletError> {
        for (field, value) in [
            (keys::CHAIN_ID, &self.chain_id),
            (keys::GAS_PRICE, &self.gas_price),
            (keys::GAS_LIMIT, &self.gas_limit),
            (keys::NONCE, &self.nonce),
        ] {
            decode_field(field, value)?;
        }
        Ok(())
    }
}
