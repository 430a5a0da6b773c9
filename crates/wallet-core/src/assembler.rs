//! Signing request assembly: defaults, validation, key resolution and hex
//! decoding, turning a caller's [`SigningParameters`] into a complete
//! [`SigningRequest`].

use crate::config::SigningDefaults;
use crate::derivation_path::escape_derivation_path;
use crate::error::WalletError;
use crate::hd_wallet::{KeySource, PrivateKey};
use crate::params::{decode_field, keys, SigningParameters};
use crate::types::Coin;

/// A fully resolved signing request.
///
/// Only [`SigningRequestAssembler::assemble`] can build one, so every
/// instance has all fields present and decoded.
#[derive(Debug)]
pub struct SigningRequest {
    coin: Coin,
    chain_id: Vec<u8>,
    gas_price: Vec<u8>,
    gas_limit: Vec<u8>,
    nonce: Vec<u8>,
    amount: Vec<u8>,
    to_address: String,
    private_key: PrivateKey,
}

impl SigningRequest {
    /// Coin whose handler will sign this request.
    pub fn coin(&self) -> Coin {
        self.coin
    }

    /// Big-endian chain id.
    pub fn chain_id(&self) -> &[u8] {
        &self.chain_id
    }

    /// Big-endian gas price in wei.
    pub fn gas_price(&self) -> &[u8] {
        &self.gas_price
    }

    /// Big-endian gas limit.
    pub fn gas_limit(&self) -> &[u8] {
        &self.gas_limit
    }

    /// Big-endian sender nonce.
    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    /// Big-endian transfer value in wei.
    pub fn amount(&self) -> &[u8] {
        &self.amount
    }

    /// Recipient exactly as the caller sent it.
    pub fn to_address(&self) -> &str {
        &self.to_address
    }

    /// Key resolved from the wallet, never from caller input.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}

#[derive(Debug, Clone, Default)]
pub struct SigningRequestAssembler {
    defaults: SigningDefaults,
}

impl SigningRequestAssembler {
    /// Assembler that fills omitted fields from `defaults`.
    pub fn new(defaults: SigningDefaults) -> Self {
        Self { defaults }
    }

    /// Values used for omitted fields.
    pub fn defaults(&self) -> &SigningDefaults {
        &self.defaults
    }

    /// Validates `params`, fills in defaults, resolves the private key and
    /// decodes every hex field.
    ///
    /// Missing required fields and undecodable hex are reported before
    /// `key_source` is consulted, so a rejected request never touches key
    /// material.
    pub fn assemble<K>(
        &self,
        key_source: &K,
        coin: Coin,
        params: &SigningParameters,
    ) -> Result<SigningRequest, WalletError>
    where
        K: KeySource + ?Sized,
    {
        // Each override binds to its own field only.
        let chain_id = params.chain_id.as_deref().unwrap_or(&self.defaults.chain_id);
        let gas_price = params.gas_price.as_deref().unwrap_or(&self.defaults.gas_price);
        let gas_limit = params.gas_limit.as_deref().unwrap_or(&self.defaults.gas_limit);
        let nonce = params.nonce.as_deref().unwrap_or(&self.defaults.nonce);

        let to_address = params
            .to_address
            .as_deref()
            .ok_or_else(|| WalletError::MissingParameter(keys::TO_ADDRESS.into()))?;
        let amount = params
            .amount
            .as_deref()
            .ok_or_else(|| WalletError::MissingParameter(keys::AMOUNT.into()))?;

        let chain_id = decode_field(keys::CHAIN_ID, chain_id)?;
        let gas_price = decode_field(keys::GAS_PRICE, gas_price)?;
        let gas_limit = decode_field(keys::GAS_LIMIT, gas_limit)?;
        let nonce = decode_field(keys::NONCE, nonce)?;
        let amount = decode_field(keys::AMOUNT, amount)?;

        let private_key = match params.private_key_derivation_path.as_deref() {
            None => key_source.default_key_for_coin(coin)?,
            Some(path) => key_source.key_at_path(&escape_derivation_path(path))?,
        };

        log::debug!(
            "assembled {coin} signing request ({} key)",
            if params.private_key_derivation_path.is_some() {
                "path-derived"
            } else {
                "default"
            }
        );

        Ok(SigningRequest {
            coin,
            chain_id,
            gas_price,
            gas_limit,
            nonce,
            amount,
            to_address: to_address.to_string(),
            private_key,
        })
    }
}
