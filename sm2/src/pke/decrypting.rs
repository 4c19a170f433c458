//! Support for SM2 decryption.
//!
//! ## Algorithm
//!
//! ```text
//! B1: take C1 from C, error if C1 is not a point on the curve
//! B2: compute S = [h]C1, error if S is the point at infinity
//! B3: compute [dB]C1 = (x2, y2)
//! B4: compute t = KDF(x2 ‖ y2, klen), error if t is all zero
//! B5: take C2 from C and compute M' = C2 ⊕ t
//! B6: compute u = Hash(x2 ‖ M' ‖ y2), error if u ≠ C3
//! B7: output M'
//! ```

use super::{Ciphertext, Decryptor, EncryptingKey, EncryptionOptions};
use crate::{Error, FieldBytes, NonZeroScalar, ProjectivePoint, Result, Sm3, kdf::derive_key};
use alloc::{vec, vec::Vec};
use core::fmt::{self, Debug};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};

/// SM2 private key used for decrypting ciphertexts.
#[derive(Clone)]
pub struct DecryptingKey {
    secret_scalar: NonZeroScalar,
    encrypting_key: EncryptingKey,
}

impl DecryptingKey {
    /// Create a decrypting key from a non-zero scalar, with the default
    /// [`EncryptionOptions`].
    pub fn new(secret_scalar: NonZeroScalar) -> Result<Self> {
        let public_key = ProjectivePoint::mul_by_generator(&secret_scalar).to_affine();
        Ok(Self {
            secret_scalar,
            encrypting_key: EncryptingKey::new(public_key)?,
        })
    }

    /// Parse decrypting key from big endian-encoded bytes.
    pub fn from_bytes(bytes: &FieldBytes) -> Result<Self> {
        Self::new(NonZeroScalar::from_bytes(bytes)?)
    }

    /// Parse decrypting key from big endian-encoded byte slice containing a
    /// secret scalar value.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        Self::new(NonZeroScalar::from_slice(slice)?)
    }

    /// Parse decrypting key from a 64-digit hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::new(NonZeroScalar::from_hex(hex)?)
    }

    /// Generate a random decrypting key.
    pub fn random(rng: &mut impl CryptoRngCore) -> Result<Self> {
        Self::new(NonZeroScalar::try_random(rng)?)
    }

    /// Use `options` to decode ciphertexts, and for the ciphertexts produced
    /// by [`Self::encrypting_key`].
    #[must_use]
    pub fn with_options(self, options: EncryptionOptions) -> Self {
        Self {
            secret_scalar: self.secret_scalar,
            encrypting_key: self.encrypting_key.with_options(options),
        }
    }

    /// Ciphertext format expected by this key.
    pub fn options(&self) -> EncryptionOptions {
        self.encrypting_key.options()
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        self.secret_scalar.to_bytes()
    }

    /// Borrow the secret [`NonZeroScalar`] value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_nonzero_scalar(&self) -> &NonZeroScalar {
        &self.secret_scalar
    }

    /// Get the [`EncryptingKey`] which corresponds to this [`DecryptingKey`].
    pub fn encrypting_key(&self) -> &EncryptingKey {
        &self.encrypting_key
    }

    /// Decode a ciphertext according to this key's [`EncryptionOptions`]
    /// and decrypt it.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let ciphertext = Ciphertext::decode(ciphertext, self.options())?;
        decrypt(&self.secret_scalar, &ciphertext)
    }

    /// Decrypt an already decoded [`Ciphertext`].
    pub fn decrypt_ciphertext(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        decrypt(&self.secret_scalar, ciphertext)
    }

    /// Decrypt a hex-encoded ciphertext.
    pub fn decrypt_hex(&self, ciphertext: &str) -> Result<Vec<u8>> {
        self.decrypt(&hex::decode(ciphertext)?)
    }
}

/// Decrypt `ciphertext` with the secret scalar `d`.
///
/// An all-zero key stream yields [`Error::DecryptionFailed`] and a `C3`
/// mismatch yields [`Error::IntegrityCheckFailed`]; in both cases no
/// plaintext is released.
pub fn decrypt(secret_scalar: &NonZeroScalar, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
    // B1/B2: C1 is on the curve by construction; h = 1 so S = C1
    let c1 = ciphertext.c1();
    if c1.is_identity() {
        return Err(Error::InvalidCiphertext);
    }

    // B3: compute [dB]C1 = (x2, y2)
    let shared = (&c1.to_projective() * secret_scalar).to_affine();
    if shared.is_identity() {
        return Err(Error::InvalidCiphertext);
    }
    let x2 = shared.x().to_bytes();
    let y2 = shared.y().to_bytes();

    // B4: compute t = KDF(x2 ‖ y2, klen), error if t is all zero
    let mut plaintext = vec![0u8; ciphertext.c2().len()];
    derive_key(&[&x2, &y2], &mut plaintext).map_err(|err| match err {
        Error::KdfZeroOutput => Error::DecryptionFailed,
        other => other,
    })?;

    // B5: take C2 from C and compute M' = C2 ⊕ t
    for (m, c) in plaintext.iter_mut().zip(ciphertext.c2()) {
        *m ^= c;
    }

    // B6: compute u = Hash(x2 ‖ M' ‖ y2), error if u ≠ C3
    let u = Sm3::new().chain(x2).chain(&plaintext).chain(y2).finalize();
    if !bool::from(u[..].ct_eq(&ciphertext.c3()[..])) {
        return Err(Error::IntegrityCheckFailed);
    }

    // B7: output M'
    Ok(plaintext)
}

impl Decryptor for DecryptingKey {
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        DecryptingKey::decrypt(self, ciphertext)
    }
}

//
// Other trait impls
//

impl AsRef<EncryptingKey> for DecryptingKey {
    fn as_ref(&self) -> &EncryptingKey {
        &self.encrypting_key
    }
}

impl ConstantTimeEq for DecryptingKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_scalar.ct_eq(&other.secret_scalar)
    }
}

impl Debug for DecryptingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptingKey")
            .field("encrypting_key", &self.encrypting_key)
            .finish_non_exhaustive()
    }
}

/// Constant-time comparison
impl Eq for DecryptingKey {}
impl PartialEq for DecryptingKey {
    fn eq(&self, other: &DecryptingKey) -> bool {
        self.ct_eq(other).into()
    }
}

#[cfg(test)]
mod tests {
    use super::DecryptingKey;
    use crate::{
        Error,
        pke::{EncryptionOptions, Mode},
    };
    use hex_literal::hex;

    const PRIVATE_KEY: [u8; 32] =
        hex!("3DDD2A3679BF6F1DFC3B49D3E99114718E48EC170EB4E4D3A82052DAB19E8B50");
    const CIPHER: [u8; 106] = hex!("041ed68db303f5bc6bce516d5a62e1cd16781d3007df6864d970a56d46a6cecca0e0d33bfc71e78c440ae6afeef1a18cce473b3e27002189a058ddadc9182c80a3f13be66476ba6ef66d95a7fb11f30de441b3b66d566e48348bd830e584e7ec37f9b704ef32eba9055c");

    #[test]
    fn decrypts_known_ciphertext() {
        let dk = DecryptingKey::from_bytes(&PRIVATE_KEY).unwrap();
        assert_eq!(dk.decrypt(&CIPHER).unwrap(), b"plaintext");
        assert_eq!(dk.decrypt_hex(&hex::encode(CIPHER)).unwrap(), b"plaintext");
    }

    #[test]
    fn tampered_c3_fails_integrity_check() {
        let dk = DecryptingKey::from_bytes(&PRIVATE_KEY).unwrap();
        for i in [65, 80, 96] {
            let mut tampered = CIPHER;
            tampered[i] ^= 0x01;
            assert_eq!(dk.decrypt(&tampered), Err(Error::IntegrityCheckFailed));
        }
    }

    #[test]
    fn tampered_c2_fails_integrity_check() {
        let dk = DecryptingKey::from_bytes(&PRIVATE_KEY).unwrap();
        let mut tampered = CIPHER;
        tampered[100] ^= 0x80;
        assert_eq!(dk.decrypt(&tampered), Err(Error::IntegrityCheckFailed));
    }

    #[test]
    fn wrong_mode_fails() {
        let dk = DecryptingKey::from_bytes(&PRIVATE_KEY)
            .unwrap()
            .with_options(EncryptionOptions::plain(Mode::C1C2C3));
        assert_eq!(dk.decrypt(&CIPHER), Err(Error::IntegrityCheckFailed));
    }

    #[test]
    fn debug_hides_secret() {
        let dk = DecryptingKey::from_bytes(&PRIVATE_KEY).unwrap();
        let debug = alloc::format!("{:?}", dk);
        assert!(debug.starts_with("DecryptingKey { encrypting_key: "));
        assert!(!debug.contains("NonZeroScalar"));
    }
}
