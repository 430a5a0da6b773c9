//! The object the host app holds for the lifetime of its wallet screen.
//!
//! A session owns at most one loaded [`HdWallet`]. Creating or importing a
//! wallet replaces it, [`WalletSession::cleanup`] drops it, and every other
//! operation fails with [`WalletError::NoWalletLoaded`] while the slot is
//! empty. Calls that fail never change the slot.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crypto_utils::hex_codec::{decode_hex, encode_hex};
use crypto_utils::zeroizing::SecretVec;

use crate::assembler::SigningRequestAssembler;
use crate::coins::{handler_for, SigningResult};
use crate::config::SigningDefaults;
use crate::derivation_path::escape_derivation_path;
use crate::error::WalletError;
use crate::hd_wallet::{HdWallet, KeySource};
use crate::params::SigningParameters;
use crate::types::{Coin, DerivedAccount, SignedTransaction, WalletInfo};

#[derive(Debug, Default)]
pub struct WalletSession {
    wallet: Mutex<Option<HdWallet>>,
    assembler: SigningRequestAssembler,
}

impl WalletSession {
    /// An empty session using the mainnet [`SigningDefaults`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that fills omitted signing fields from `defaults`.
    pub fn with_defaults(defaults: SigningDefaults) -> Result<Self, WalletError> {
        defaults.validate()?;
        Ok(Self {
            wallet: Mutex::new(None),
            assembler: SigningRequestAssembler::new(defaults),
        })
    }

    /// Defaults this session applies to omitted signing fields.
    pub fn signing_defaults(&self) -> SigningDefaults {
        self.assembler.defaults().clone()
    }

    /// Drops the loaded wallet, if any.
    pub fn cleanup(&self) {
        if self.slot().take().is_some() {
            log::info!("wallet unloaded");
        }
    }

    /// Whether a wallet is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.slot().is_some()
    }

    /// Generates a new wallet with `strength` bits of entropy and loads it.
    pub fn create_wallet(&self, strength: u32, passphrase: String) -> Result<WalletInfo, WalletError> {
        let wallet = HdWallet::generate(strength, &passphrase)
            .inspect_err(|e| log::warn!("create_wallet rejected: {}", e.code()))?;
        log::info!("created {strength}-bit wallet");
        Ok(self.load(wallet))
    }

    /// Imports and loads a wallet from a checksum-valid mnemonic.
    pub fn import_wallet_from_mnemonic(
        &self,
        mnemonic: String,
        passphrase: String,
    ) -> Result<WalletInfo, WalletError> {
        let wallet = HdWallet::from_mnemonic(&mnemonic, &passphrase)
            .inspect_err(|e| log::warn!("import_wallet_from_mnemonic rejected: {}", e.code()))?;
        log::info!("imported wallet from mnemonic");
        Ok(self.load(wallet))
    }

    /// Imports a wallet from BIP-39 entropy given as hex.
    pub fn import_wallet_from_hex_string(
        &self,
        hex_string: String,
        passphrase: String,
    ) -> Result<WalletInfo, WalletError> {
        let entropy = decode_hex(&hex_string)
            .map(SecretVec::new)
            .map_err(|_| WalletError::InvalidHexString("hexString".into()))
            .and_then(|entropy| {
                if entropy.is_empty() {
                    Err(WalletError::InvalidHexString("hexString".into()))
                } else {
                    Ok(entropy)
                }
            })
            .inspect_err(|e| log::warn!("import_wallet_from_hex_string rejected: {}", e.code()))?;

        let wallet = HdWallet::from_entropy(entropy.expose(), &passphrase)
            .inspect_err(|e| log::warn!("import_wallet_from_hex_string rejected: {}", e.code()))?;
        log::info!("imported wallet from {}-byte entropy", entropy.len());
        Ok(self.load(wallet))
    }

    /// Address of the coin's default key.
    pub fn get_address_for_coin(&self, coin: String) -> Result<String, WalletError> {
        self.with_wallet(|wallet| {
            let coin: Coin = coin.parse()?;
            let key = wallet.default_key_for_coin(coin)?;
            handler_for(coin).derive_address(&key)
        })
        .inspect_err(|e| log::warn!("get_address_for_coin rejected: {}", e.code()))
    }

    /// Address at `derivation_path`, together with its private key as hex.
    /// Without a path this is the default address and no key is returned.
    pub fn derive_address_for_coin(
        &self,
        coin: String,
        derivation_path: Option<String>,
    ) -> Result<DerivedAccount, WalletError> {
        self.with_wallet(|wallet| {
            let coin: Coin = coin.parse()?;
            let handler = handler_for(coin);

            match derivation_path {
                None => {
                    let key = wallet.default_key_for_coin(coin)?;
                    Ok(DerivedAccount {
                        address: handler.derive_address(&key)?,
                        private_key: None,
                    })
                }
                Some(path) => {
                    let key = wallet.key_at_path(&escape_derivation_path(&path))?;
                    log::debug!("derived {coin} account at explicit path");
                    Ok(DerivedAccount {
                        address: handler.derive_address(&key)?,
                        private_key: Some(encode_hex(key.bytes())),
                    })
                }
            }
        })
        .inspect_err(|e| log::warn!("derive_address_for_coin rejected: {}", e.code()))
    }

    /// Signs a transaction described by a JSON parameter bag.
    pub fn sign_transaction_for_coin(
        &self,
        coin: String,
        params_json: String,
    ) -> Result<SignedTransaction, WalletError> {
        self.with_wallet(|wallet| {
            let coin: Coin = coin.parse()?;
            let params = SigningParameters::from_json(&params_json)?;
            let result = self.sign_with(wallet, coin, &params)?;
            Ok(SignedTransaction {
                r: encode_hex(&result.r),
                s: encode_hex(&result.s),
                v: encode_hex(&result.v),
                encoded: encode_hex(&result.encoded),
                tx_hash: encode_hex(&result.tx_hash),
            })
        })
        .inspect_err(|e| log::warn!("sign_transaction_for_coin rejected: {}", e.code()))
    }

    /// Typed counterpart of [`Self::sign_transaction_for_coin`] for Rust callers.
    pub fn sign_transaction(
        &self,
        coin: Coin,
        params: &SigningParameters,
    ) -> Result<SigningResult, WalletError> {
        self.with_wallet(|wallet| self.sign_with(wallet, coin, params))
    }

    fn sign_with(
        &self,
        wallet: &HdWallet,
        coin: Coin,
        params: &SigningParameters,
    ) -> Result<SigningResult, WalletError> {
        let request = self.assembler.assemble(wallet, coin, params)?;
        let result = handler_for(coin).sign(&request)?;
        log::info!("signed {coin} transaction");
        Ok(result)
    }

    fn load(&self, wallet: HdWallet) -> WalletInfo {
        let info = WalletInfo {
            mnemonic: wallet.mnemonic().to_string(),
            seed: encode_hex(wallet.seed()),
        };
        *self.slot() = Some(wallet);
        info
    }

    fn with_wallet<T>(
        &self,
        f: impl FnOnce(&HdWallet) -> Result<T, WalletError>,
    ) -> Result<T, WalletError> {
        let slot = self.slot();
        let wallet = slot.as_ref().ok_or(WalletError::NoWalletLoaded)?;
        f(wallet)
    }

    // A panic while holding the lock cannot leave the slot half-written.
    fn slot(&self) -> MutexGuard<'_, Option<HdWallet>> {
        self.wallet.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn loaded() -> WalletSession {
        let session = WalletSession::new();
        session
            .import_wallet_from_mnemonic(TEST_MNEMONIC.into(), String::new())
            .unwrap();
        session
    }

    #[test]
    fn empty_session_rejects_wallet_operations() {
        let session = WalletSession::new();
        assert!(!session.is_loaded());
        assert_eq!(
            session.get_address_for_coin("ethereum".into()).unwrap_err(),
            WalletError::NoWalletLoaded
        );
        assert_eq!(
            session.derive_address_for_coin("ethereum".into(), None).unwrap_err(),
            WalletError::NoWalletLoaded
        );
        assert_eq!(
            session
                .sign_transaction_for_coin("ethereum".into(), "{}".into())
                .unwrap_err(),
            WalletError::NoWalletLoaded
        );
    }

    #[test]
    fn no_wallet_reported_before_unsupported_coin() {
        let session = WalletSession::new();
        assert_eq!(
            session.get_address_for_coin("bitcoin".into()).unwrap_err(),
            WalletError::NoWalletLoaded
        );
    }

    #[test]
    fn create_wallet_loads_it() {
        let session = WalletSession::new();
        let info = session.create_wallet(256, String::new()).unwrap();
        assert_eq!(info.mnemonic.split_whitespace().count(), 24);
        assert_eq!(info.seed.len(), 128);
        assert!(session.is_loaded());
    }

    #[test]
    fn invalid_strength_rejected() {
        let session = WalletSession::new();
        for strength in [0, 64, 100, 288] {
            assert!(matches!(
                session.create_wallet(strength, String::new()),
                Err(WalletError::InvalidEntropy(_))
            ));
        }
        assert!(!session.is_loaded());
    }

    #[test]
    fn mnemonic_import_returns_known_seed() {
        let session = WalletSession::new();
        let info = session
            .import_wallet_from_mnemonic(TEST_MNEMONIC.into(), String::new())
            .unwrap();
        assert_eq!(info.mnemonic, TEST_MNEMONIC);
        assert!(info.seed.starts_with("5eb00bbddcf069084889a8ab9155568165f5c453"));
    }

    #[test]
    fn hex_import_matches_mnemonic_import() {
        let session = WalletSession::new();
        let info = session
            .import_wallet_from_hex_string("0x00000000000000000000000000000000".into(), String::new())
            .unwrap();
        assert_eq!(info.mnemonic, TEST_MNEMONIC);
    }

    #[test]
    fn hex_import_errors() {
        let session = WalletSession::new();
        for input in ["", "0x", "zz", "not hex"] {
            assert_eq!(
                session
                    .import_wallet_from_hex_string(input.into(), String::new())
                    .unwrap_err(),
                WalletError::InvalidHexString("hexString".into()),
                "input {input:?}"
            );
        }
        // Decodes, but 5 bytes is not a BIP-39 entropy length.
        assert!(matches!(
            session.import_wallet_from_hex_string("0102030405".into(), String::new()),
            Err(WalletError::InvalidEntropy(_))
        ));
    }

    #[test]
    fn default_and_derived_addresses() {
        let session = loaded();
        let address = session.get_address_for_coin("ethereum".into()).unwrap();
        assert_eq!(address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");

        let default = session.derive_address_for_coin("ethereum".into(), None).unwrap();
        assert_eq!(default.address, address);
        assert_eq!(default.private_key, None);

        let explicit = session
            .derive_address_for_coin("ethereum".into(), Some("m/44\\'/60\\'/0\\'/0/0".into()))
            .unwrap();
        assert_eq!(explicit.address, address);
        assert_eq!(
            explicit.private_key.as_deref(),
            Some("1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727")
        );
    }

    #[test]
    fn bad_derivation_path_rejected() {
        let session = loaded();
        assert!(matches!(
            session.derive_address_for_coin("ethereum".into(), Some("m/x".into())),
            Err(WalletError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn signs_json_parameter_bag() {
        let session = loaded();
        let signed = session
            .sign_transaction_for_coin(
                "ethereum".into(),
                r#"{"toAddress": "0x3535353535353535353535353535353535353535", "amount": "2540be400"}"#
                    .into(),
            )
            .unwrap();
        assert_eq!(signed.r.len(), 64);
        assert_eq!(signed.s.len(), 64);
        assert!(signed.v == "25" || signed.v == "26", "v = {}", signed.v);
        assert_eq!(signed.tx_hash.len(), 64);
        assert!(!signed.encoded.starts_with("0x"));
    }

    #[test]
    fn mistyped_checksum_recipient_not_signed() {
        let session = loaded();
        let err = session
            .sign_transaction_for_coin(
                "ethereum".into(),
                r#"{"toAddress": "0x9858efFD232B4033E47d90003D41EC34EcaEda94", "amount": "01"}"#.into(),
            )
            .unwrap_err();
        assert_eq!(err.code(), "ERROR_SIGNING_FAILED");

        let lowercase = session.sign_transaction_for_coin(
            "ethereum".into(),
            r#"{"toAddress": "0x9858effd232b4033e47d90003d41ec34ecaeda94", "amount": "01"}"#.into(),
        );
        assert!(lowercase.is_ok());
    }

    #[test]
    fn unsupported_coin_ignores_parameters() {
        let session = loaded();
        assert_eq!(
            session
                .sign_transaction_for_coin("bitcoin".into(), "not even json".into())
                .unwrap_err(),
            WalletError::UnsupportedCoin("bitcoin".into())
        );
    }

    #[test]
    fn typed_signing_matches_json_signing() {
        let session = loaded();
        let params = SigningParameters {
            to_address: Some("0x3535353535353535353535353535353535353535".into()),
            amount: Some("01".into()),
            ..Default::default()
        };
        let typed = session.sign_transaction(Coin::Ethereum, &params).unwrap();
        let json = session
            .sign_transaction_for_coin(
                "ethereum".into(),
                r#"{"toAddress": "0x3535353535353535353535353535353535353535", "amount": "01"}"#.into(),
            )
            .unwrap();
        assert_eq!(encode_hex(&typed.encoded), json.encoded);
    }

    #[test]
    fn custom_defaults_change_signature() {
        let bag = r#"{"toAddress": "0x3535353535353535353535353535353535353535", "amount": "01"}"#;
        let mainnet = loaded();
        let custom = WalletSession::with_defaults(SigningDefaults {
            chain_id: "89".into(),
            ..Default::default()
        })
        .unwrap();
        custom
            .import_wallet_from_mnemonic(TEST_MNEMONIC.into(), String::new())
            .unwrap();

        let a = mainnet.sign_transaction_for_coin("ethereum".into(), bag.into()).unwrap();
        let b = custom.sign_transaction_for_coin("ethereum".into(), bag.into()).unwrap();
        assert_ne!(a.encoded, b.encoded);
        assert_eq!(custom.signing_defaults().chain_id, "89");
    }

    #[test]
    fn invalid_defaults_rejected() {
        let err = WalletSession::with_defaults(SigningDefaults {
            nonce: "zero".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, WalletError::InvalidHexString("nonce".into()));
    }

    #[test]
    fn oversized_default_rejected_at_construction() {
        let err = WalletSession::with_defaults(SigningDefaults {
            gas_price: "01".repeat(33),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, WalletError::InvalidHexString("gasPrice".into()));
    }

    #[test]
    fn failed_import_keeps_loaded_wallet() {
        let session = loaded();
        assert!(session
            .import_wallet_from_mnemonic("abandon abandon".into(), String::new())
            .is_err());
        assert_eq!(
            session.get_address_for_coin("ethereum".into()).unwrap(),
            "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
        );
    }

    #[test]
    fn cleanup_unloads() {
        let session = loaded();
        session.cleanup();
        assert!(!session.is_loaded());
        // Cleaning an empty session is a no-op.
        session.cleanup();
        assert_eq!(
            session.get_address_for_coin("ethereum".into()).unwrap_err(),
            WalletError::NoWalletLoaded
        );
    }
}
