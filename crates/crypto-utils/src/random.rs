use rand::RngCore;
use rand_core::OsRng;

use crate::zeroizing::SecretVec;

/// Fills `buf` with cryptographically secure random bytes.
pub fn fill_random(buf: &mut [u8]) {
    OsRng.fill_bytes(buf);
}

/// Generates `len` secure random bytes wrapped so they are wiped on drop.
///
/// Used for wallet entropy, which must not outlive the mnemonic built from it.
pub fn random_secret(len: usize) -> SecretVec {
    let mut buf = vec![0u8; len];
    fill_random(&mut buf);
    SecretVec::new(buf)
}
