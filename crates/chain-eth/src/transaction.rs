use alloy_primitives::U256;
use alloy_rlp::{Encodable, RlpEncodable};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature, SigningKey};
use sha3::{Digest, Keccak256};
use zeroize::Zeroize;

use crate::address::{parse_address, validate_address};
use crate::error::EthError;

/// An unsigned legacy Ethereum transaction.
///
/// Integer fields are big-endian byte strings of at most 32 bytes; leading
/// zero bytes are allowed and stripped during encoding.
#[derive(Debug, Clone, Default)]
pub struct LegacyTransaction {
    pub chain_id: Vec<u8>,
    pub nonce: Vec<u8>,
    pub gas_price: Vec<u8>,
    pub gas_limit: Vec<u8>,
    /// Recipient address as a 0x-prefixed hex string.
    pub to: String,
    /// Transfer value in wei.
    pub value: Vec<u8>,
    /// Calldata (empty for plain transfers).
    pub data: Vec<u8>,
}

/// Signature components and the broadcastable encoding of a signed transaction.
#[derive(Debug, Clone)]
pub struct SignedLegacyTransaction {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// `v` as a minimal big-endian integer.
    pub v: Vec<u8>,
    /// RLP of `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]`.
    pub encoded: Vec<u8>,
    /// Keccak-256 of `encoded`.
    pub tx_hash: [u8; 32],
}

/// Encodes the payload whose Keccak-256 hash gets signed.
///
/// With a non-zero chain id this is the EIP-155 form
/// `rlp([nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0])`;
/// chain id zero yields the unprotected six-field list.
pub fn encode_unsigned(tx: &LegacyTransaction) -> Result<Vec<u8>, EthError> {
    let fields = TxFields::from_tx(tx)?;
    let mut out = Vec::new();

    if fields.chain_id.is_zero() {
        fields.unprotected().encode(&mut out);
    } else {
        fields.eip155().encode(&mut out);
    }
    Ok(out)
}

/// Signs a legacy transaction with a secp256k1 private key.
///
/// Signatures are RFC 6979 deterministic with low-S normalization, so the
/// same transaction and key always produce the same bytes.
pub fn sign_transaction(
    tx: &LegacyTransaction,
    private_key: &[u8; 32],
) -> Result<SignedLegacyTransaction, EthError> {
    let fields = TxFields::from_tx(tx)?;
    let chain_id = U256::try_from_be_slice(&fields.chain_id.0).ok_or(EthError::IntegerTooLarge {
        field: "chainId",
        len: fields.chain_id.0.len(),
    })?;

    let unsigned = encode_unsigned(tx)?;
    let msg_hash = Keccak256::digest(&unsigned);

    let mut key_bytes = *private_key;
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| EthError::InvalidPrivateKey(e.to_string()));
    key_bytes.zeroize();
    let signing_key = signing_key?;

    let (signature, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash(msg_hash.as_slice())
        .map_err(|e| EthError::SigningError(e.to_string()))?;

    let v = replay_protected_v(chain_id, recovery_id.is_y_odd())?;
    let v = RlpUint::new("v", &v.to_be_bytes::<32>())?;

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&signature.r().to_bytes());
    s.copy_from_slice(&signature.s().to_bytes());

    let signed = SignedTxFields {
        nonce: fields.nonce,
        gas_price: fields.gas_price,
        gas_limit: fields.gas_limit,
        to: fields.to,
        value: fields.value,
        data: fields.data,
        v: v.clone(),
        r: RlpUint::new("r", &r)?,
        s: RlpUint::new("s", &s)?,
    };

    let mut encoded = Vec::new();
    signed.encode(&mut encoded);

    let mut tx_hash = [0u8; 32];
    tx_hash.copy_from_slice(&Keccak256::digest(&encoded));

    Ok(SignedLegacyTransaction {
        r,
        s,
        v: v.0,
        encoded,
        tx_hash,
    })
}

/// EIP-155: `v = parity + 35 + 2 * chainId`, or `27 + parity` without a chain id.
fn replay_protected_v(chain_id: U256, y_odd: bool) -> Result<U256, EthError> {
    let parity = U256::from(u64::from(y_odd));
    if chain_id.is_zero() {
        return Ok(parity + U256::from(27u64));
    }

    chain_id
        .checked_mul(U256::from(2u64))
        .and_then(|doubled| doubled.checked_add(U256::from(35u64)))
        .and_then(|base| base.checked_add(parity))
        .ok_or_else(|| EthError::SigningError("chain id too large to encode v".into()))
}

// ---------------------------------------------------------------------------
// RLP-encodable structures
// ---------------------------------------------------------------------------

/// Validated transaction fields shared by the unsigned and signed encodings.
struct TxFields {
    chain_id: RlpUint,
    nonce: RlpUint,
    gas_price: RlpUint,
    gas_limit: RlpUint,
    to: RlpAddress,
    value: RlpUint,
    data: RlpBytes,
}

/// Parses the recipient, rejecting mixed-case input whose EIP-55 checksum
/// does not match. All-lowercase and all-uppercase forms carry no checksum.
fn parse_recipient(to: &str) -> Result<[u8; 20], EthError> {
    if !validate_address(to)? {
        return Err(EthError::InvalidAddress(format!(
            "{to} fails its EIP-55 checksum"
        )));
    }
    parse_address(to)
}

impl TxFields {
    fn from_tx(tx: &LegacyTransaction) -> Result<Self, EthError> {
        Ok(Self {
            chain_id: RlpUint::new("chainId", &tx.chain_id)?,
            nonce: RlpUint::new("nonce", &tx.nonce)?,
            gas_price: RlpUint::new("gasPrice", &tx.gas_price)?,
            gas_limit: RlpUint::new("gasLimit", &tx.gas_limit)?,
            to: RlpAddress(parse_recipient(&tx.to)?),
            value: RlpUint::new("value", &tx.value)?,
            data: RlpBytes(tx.data.clone()),
        })
    }

    fn unprotected(&self) -> UnprotectedTxFields {
        UnprotectedTxFields {
            nonce: self.nonce.clone(),
            gas_price: self.gas_price.clone(),
            gas_limit: self.gas_limit.clone(),
            to: self.to.clone(),
            value: self.value.clone(),
            data: self.data.clone(),
        }
    }

    fn eip155(&self) -> Eip155TxFields {
        Eip155TxFields {
            nonce: self.nonce.clone(),
            gas_price: self.gas_price.clone(),
            gas_limit: self.gas_limit.clone(),
            to: self.to.clone(),
            value: self.value.clone(),
            data: self.data.clone(),
            chain_id: self.chain_id.clone(),
            zero_r: RlpUint::default(),
            zero_s: RlpUint::default(),
        }
    }
}

#[derive(RlpEncodable)]
struct UnprotectedTxFields {
    nonce: RlpUint,
    gas_price: RlpUint,
    gas_limit: RlpUint,
    to: RlpAddress,
    value: RlpUint,
    data: RlpBytes,
}

#[derive(RlpEncodable)]
struct Eip155TxFields {
    nonce: RlpUint,
    gas_price: RlpUint,
    gas_limit: RlpUint,
    to: RlpAddress,
    value: RlpUint,
    data: RlpBytes,
    chain_id: RlpUint,
    zero_r: RlpUint,
    zero_s: RlpUint,
}

#[derive(RlpEncodable)]
struct SignedTxFields {
    nonce: RlpUint,
    gas_price: RlpUint,
    gas_limit: RlpUint,
    to: RlpAddress,
    value: RlpUint,
    data: RlpBytes,
    v: RlpUint,
    r: RlpUint,
    s: RlpUint,
}

/// A big-endian integer of at most 32 bytes, stored without leading zeros so
/// it encodes as a canonical RLP integer.
#[derive(Debug, Clone, Default)]
struct RlpUint(Vec<u8>);

impl RlpUint {
    fn new(field: &'static str, be_bytes: &[u8]) -> Result<Self, EthError> {
        if be_bytes.len() > 32 {
            return Err(EthError::IntegerTooLarge {
                field,
                len: be_bytes.len(),
            });
        }
        let start = be_bytes
            .iter()
            .position(|&b| b != 0)
            .unwrap_or(be_bytes.len());
        Ok(Self(be_bytes[start..].to_vec()))
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }
}

impl Encodable for RlpUint {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// A 20-byte address encoded as an RLP byte string.
#[derive(Debug, Clone)]
struct RlpAddress([u8; 20]);

impl Encodable for RlpAddress {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// Opaque calldata encoded as an RLP byte string.
#[derive(Debug, Clone)]
struct RlpBytes(Vec<u8>);

impl Encodable for RlpBytes {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}
