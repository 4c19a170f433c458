//! Support for SM2 encryption.
//!
//! ## Algorithm
//!
//! ```text
//! A1: generate a random number k in [1, n-1]
//! A2: compute C1 = [k]G = (x1, y1)
//! A3: compute S = [h]PB, error if S is the point at infinity
//! A4: compute [k]PB = (x2, y2)
//! A5: compute t = KDF(x2 ‖ y2, klen), return to A1 if t is all zero
//! A6: compute C2 = M ⊕ t
//! A7: compute C3 = Hash(x2 ‖ M ‖ y2)
//! A8: output C = C1 ‖ C3 ‖ C2
//! ```

use super::{Ciphertext, EncryptionOptions, Encryptor};
use crate::{
    AffinePoint, Error, MAX_RETRY, NonZeroScalar, ProjectivePoint, Result, Sm3, kdf::derive_key,
};
use alloc::{string::String, vec, vec::Vec};
use rand_core::CryptoRngCore;

/// SM2 public key used for encrypting messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptingKey {
    public_key: AffinePoint,
    options: EncryptionOptions,
}

impl EncryptingKey {
    /// Initialize [`EncryptingKey`] from a public key with the default
    /// [`EncryptionOptions`] (`C1 ‖ C3 ‖ C2`, plain encoding).
    ///
    /// Returns [`Error::InvalidPublicKey`] if the given affine point is the
    /// additive identity (a.k.a. point at infinity).
    pub fn new(public_key: AffinePoint) -> Result<Self> {
        if public_key.is_identity() {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self {
            public_key,
            options: EncryptionOptions::default(),
        })
    }

    /// Initialize [`EncryptingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        Self::new(AffinePoint::from_sec1_bytes(bytes)?)
    }

    /// Initialize [`EncryptingKey`] from a hex-encoded uncompressed point.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_sec1_bytes(&hex::decode(hex)?)
    }

    /// Use `options` for the ciphertexts this key produces.
    #[must_use]
    pub fn with_options(mut self, options: EncryptionOptions) -> Self {
        self.options = options;
        self
    }

    /// Ciphertext format produced by this key.
    pub fn options(&self) -> EncryptionOptions {
        self.options
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.public_key
    }

    /// Serialize as an uncompressed SEC1 point.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        self.public_key.to_sec1_bytes()
    }

    /// Encrypt `msg` and encode the ciphertext according to this key's
    /// [`EncryptionOptions`].
    pub fn encrypt_with_rng(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<Vec<u8>> {
        encrypt(rng, &self.public_key, msg)?.encode(self.options)
    }

    /// Encrypt `msg` and return the unencoded [`Ciphertext`].
    pub fn encrypt_to_ciphertext(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> Result<Ciphertext> {
        encrypt(rng, &self.public_key, msg)
    }

    /// Encrypt `msg` and return the encoded ciphertext as lowercase hex.
    pub fn encrypt_hex(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<String> {
        self.encrypt_with_rng(rng, msg).map(hex::encode)
    }
}

/// Encrypt `msg` to `public_key`.
///
/// A draw of `k` whose key stream is all zero is discarded; after
/// [`MAX_RETRY`] draws, or if the RNG fails, this returns
/// [`Error::EncryptionFailed`]. An empty message yields an empty `C2`.
pub fn encrypt(
    rng: &mut impl CryptoRngCore,
    public_key: &AffinePoint,
    msg: &[u8],
) -> Result<Ciphertext> {
    // A3: compute S = [h]PB, error if S is the point at infinity (h = 1)
    if public_key.is_identity() {
        return Err(Error::InvalidPublicKey);
    }

    let public_key = public_key.to_projective();
    let mut c2 = vec![0u8; msg.len()];

    for _ in 0..MAX_RETRY {
        // A1: generate a random number k in [1, n-1]
        let k = NonZeroScalar::try_random(rng).map_err(|_| Error::EncryptionFailed)?;

        // A2: compute C1 = [k]G = (x1, y1)
        let c1 = ProjectivePoint::mul_by_generator(&k).to_affine();

        // A4: compute [k]PB = (x2, y2)
        let shared = (&public_key * &k).to_affine();
        let x2 = shared.x().to_bytes();
        let y2 = shared.y().to_bytes();

        // A5: compute t = KDF(x2 ‖ y2, klen), return to A1 if t is all zero
        match derive_key(&[&x2, &y2], &mut c2) {
            Err(Error::KdfZeroOutput) => continue,
            result => result?,
        }

        // A6: compute C2 = M ⊕ t
        for (c, m) in c2.iter_mut().zip(msg) {
            *c ^= m;
        }

        // A7: compute C3 = Hash(x2 ‖ M ‖ y2)
        let c3 = Sm3::new().chain(x2).chain(msg).chain(y2).finalize();

        return Ciphertext::new(c1, c2, c3);
    }

    Err(Error::EncryptionFailed)
}

impl Encryptor for EncryptingKey {
    fn encrypt_with_rng(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<Vec<u8>> {
        EncryptingKey::encrypt_with_rng(self, rng, msg)
    }
}
