use chain_eth::address::private_key_to_address;
use chain_eth::transaction::{sign_transaction, LegacyTransaction};

use super::{CoinHandler, SigningResult};
use crate::assembler::SigningRequest;
use crate::error::WalletError;
use crate::hd_wallet::PrivateKey;
use crate::types::Coin;

/// Legacy EIP-155 value transfers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumHandler;

impl CoinHandler for EthereumHandler {
    fn coin(&self) -> Coin {
        Coin::Ethereum
    }

    fn derive_address(&self, key: &PrivateKey) -> Result<String, WalletError> {
        private_key_to_address(key.bytes())
            .map_err(|e| WalletError::KeyDerivationFailed(format!("ETH address: {e}")))
    }

    fn sign(&self, request: &SigningRequest) -> Result<SigningResult, WalletError> {
        let tx = LegacyTransaction {
            chain_id: request.chain_id().to_vec(),
            nonce: request.nonce().to_vec(),
            gas_price: request.gas_price().to_vec(),
            gas_limit: request.gas_limit().to_vec(),
            to: request.to_address().to_string(),
            value: request.amount().to_vec(),
            data: Vec::new(),
        };

        let signed = sign_transaction(&tx, request.private_key().bytes())?;

        Ok(SigningResult {
            r: signed.r.to_vec(),
            s: signed.s.to_vec(),
            v: signed.v,
            encoded: signed.encoded,
            tx_hash: signed.tx_hash.to_vec(),
        })
    }
}
