//! End-to-end tests through the API the mobile bindings see:
//! session -> wallet -> address / signing request -> signed transaction.

use wallet_core::assembler::SigningRequestAssembler;
use wallet_core::hd_wallet::HdWallet;
use wallet_core::params::SigningParameters;
use wallet_core::*;

const TEST_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const RECIPIENT: &str = "0x3535353535353535353535353535353535353535";

fn loaded_session() -> WalletSession {
    let session = WalletSession::new();
    session
        .import_wallet_from_mnemonic(TEST_MNEMONIC.into(), String::new())
        .unwrap();
    session
}

#[test]
fn create_wallet_128_gives_12_words_and_64_byte_seed() {
    let session = WalletSession::new();
    let info = session.create_wallet(128, String::new()).unwrap();

    assert_eq!(info.mnemonic.split(' ').count(), 12);
    assert_eq!(info.seed.len(), 128);
    assert!(info.seed.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    assert!(validate_mnemonic(info.mnemonic));
}

#[test]
fn created_mnemonic_roundtrips_through_import() {
    let creator = WalletSession::new();
    let created = creator.create_wallet(192, "secret".into()).unwrap();

    let importer = WalletSession::new();
    let imported = importer
        .import_wallet_from_mnemonic(created.mnemonic.clone(), "secret".into())
        .unwrap();

    assert_eq!(imported.mnemonic, created.mnemonic);
    assert_eq!(imported.seed, created.seed);
    assert_eq!(
        creator.get_address_for_coin("ethereum".into()).unwrap(),
        importer.get_address_for_coin("ethereum".into()).unwrap()
    );
}

#[test]
fn known_mnemonic_gives_known_address() {
    let session = loaded_session();
    let address = session.get_address_for_coin("ethereum".into()).unwrap();
    assert_eq!(address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
}

#[test]
fn minimal_parameters_take_documented_defaults() {
    let wallet = HdWallet::from_mnemonic(TEST_MNEMONIC, "").unwrap();
    let params = SigningParameters::from_json(&format!(
        r#"{{"toAddress": "{RECIPIENT}", "amount": "2540be400"}}"#
    ))
    .unwrap();

    let request = SigningRequestAssembler::default()
        .assemble(&wallet, Coin::Ethereum, &params)
        .unwrap();

    assert_eq!(request.chain_id(), &[0x01]);
    assert_eq!(request.gas_price(), &[0xd6, 0x93, 0xa4, 0x00]);
    assert_eq!(request.gas_limit(), &[0x52, 0x08]);
    assert_eq!(request.nonce(), &[0x00]);
    assert_eq!(request.amount(), &[0x02, 0x54, 0x0b, 0xe4, 0x00]);
}

#[test]
fn signs_default_transfer_end_to_end() {
    let session = loaded_session();
    let signed = session
        .sign_transaction_for_coin(
            "ethereum".into(),
            format!(r#"{{"toAddress": "{RECIPIENT}", "amount": "2540be400"}}"#),
        )
        .unwrap();

    // list of about 0x68 bytes
    assert!(signed.encoded.starts_with("f86"), "encoded = {}", signed.encoded);
    assert!(signed.encoded.contains("3535353535353535353535353535353535353535"));
    assert!(signed.encoded.contains("8502540be400"));
    assert_eq!(signed.tx_hash.len(), 64);
}

#[test]
fn unsupported_coin_rejected_regardless_of_parameters() {
    let session = loaded_session();
    for params in [
        format!(r#"{{"toAddress": "{RECIPIENT}", "amount": "01"}}"#),
        "{}".to_string(),
        "[]".to_string(),
    ] {
        let err = session
            .sign_transaction_for_coin("bitcoin".into(), params)
            .unwrap_err();
        assert_eq!(err, WalletError::UnsupportedCoin("bitcoin".into()));
        assert_eq!(err.code(), "ERROR_UNSUPPORTED_COIN");
    }
}

#[test]
fn parameter_errors_surface_with_field_names() {
    let session = loaded_session();
    let cases = [
        (r#"{"amount": "01"}"#, WalletError::MissingParameter("toAddress".into())),
        (
            r#"{"toAddress": "0x35", "amount": "01", "gasLimit": "lots"}"#,
            WalletError::InvalidHexString("gasLimit".into()),
        ),
        (
            r#"{"toAddress": "0x35", "amount": "01", "privateKeyDerivationPath": 0}"#,
            WalletError::InvalidParameterType("privateKeyDerivationPath".into()),
        ),
    ];

    for (params, expected) in cases {
        let err = session
            .sign_transaction_for_coin("ethereum".into(), params.into())
            .unwrap_err();
        assert_eq!(err, expected, "params {params}");
    }
}

#[test]
fn signing_with_explicit_path_uses_that_key() {
    let session = loaded_session();
    let bag = |path: &str| {
        format!(
            r#"{{"toAddress": "{RECIPIENT}", "amount": "01", "privateKeyDerivationPath": "{path}"}}"#
        )
    };

    let default = session
        .sign_transaction_for_coin("ethereum".into(), format!(r#"{{"toAddress": "{RECIPIENT}", "amount": "01"}}"#))
        .unwrap();
    let same = session
        .sign_transaction_for_coin("ethereum".into(), bag("m/44'/60'/0'/0/0"))
        .unwrap();
    let other = session
        .sign_transaction_for_coin("ethereum".into(), bag("m/44'/60'/0'/0/1"))
        .unwrap();

    assert_eq!(default, same);
    assert_ne!(default.encoded, other.encoded);
}

#[test]
fn cleanup_then_everything_needs_a_wallet() {
    let session = loaded_session();
    session.cleanup();

    let err = session.get_address_for_coin("ethereum".into()).unwrap_err();
    assert_eq!(err, WalletError::NoWalletLoaded);
    assert_eq!(err.code(), "ERROR_NO_WALLET_LOADED");

    // Loading again works after cleanup.
    session.create_wallet(128, String::new()).unwrap();
    assert!(session.get_address_for_coin("ethereum".into()).is_ok());
}

#[test]
fn failed_calls_leave_wallet_unchanged() {
    let session = loaded_session();
    let before = session.get_address_for_coin("ethereum".into()).unwrap();

    assert!(session.create_wallet(100, String::new()).is_err());
    assert!(session
        .import_wallet_from_hex_string("xyz".into(), String::new())
        .is_err());
    assert!(session
        .sign_transaction_for_coin("ethereum".into(), "{}".into())
        .is_err());

    assert_eq!(session.get_address_for_coin("ethereum".into()).unwrap(), before);
}

#[test]
fn derived_account_exposes_key_only_for_explicit_path() {
    let session = loaded_session();
    let default = session.derive_address_for_coin("ethereum".into(), None).unwrap();
    assert!(default.private_key.is_none());

    let second = session
        .derive_address_for_coin("ethereum".into(), Some("m/44’/60’/0’/0/1".into()))
        .unwrap();
    assert_ne!(second.address, default.address);
    assert_eq!(second.private_key.map(|k| k.len()), Some(64));
}
