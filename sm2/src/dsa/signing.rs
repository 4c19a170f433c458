//! Support for SM2DSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! A1: M' = ZA || M
//! A2: e = SM3(M')
//! A3: k <- [1, n-1]
//! A4: (x1, y1) = k·G
//! A5: r = (e + x1) mod n; retry when r = 0 or r + k = n
//! A6: s = (1 + dA)^-1 · (k - r·dA) mod n; retry when s = 0
//! A7: output (r, s)
//! ```

use super::{Signature, VerifyingKey};
use crate::{
    Error, FieldBytes, Hash, MAX_RETRY, NonZeroScalar, ProjectivePoint, Result, Scalar,
    distid::DistId,
};
use core::fmt::{self, Debug};
use rand_core::CryptoRngCore;
use signature::{KeypairRef, RandomizedSigner, hazmat::RandomizedPrehashSigner};
use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "getrandom")]
use {
    rand_core::OsRng,
    signature::{Signer, hazmat::PrehashSigner},
};

/// SM2DSA secret key used for signing messages and producing signatures.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for signing:
///
/// - [`RandomizedSigner`]: sign a message with a caller supplied RNG
/// - [`Signer`]: sign a message using the operating system RNG
///   (`getrandom` feature)
/// - [`PrehashSigner`]: sign the low-level raw output bytes of a message digest
///
/// The secret scalar `d` must lie in `[1, n-2]`: `n-1` is rejected because
/// `1 + d` has no inverse modulo `n`.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret key.
    secret_scalar: NonZeroScalar,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create a signing key from a signer's distinguishing identifier and a
    /// non-zero scalar.
    pub fn new(distid: &DistId, secret_scalar: NonZeroScalar) -> Result<Self> {
        if (&*secret_scalar + &Scalar::one()).is_zero() {
            return Err(Error::InvalidCurveInput);
        }

        let public_key = ProjectivePoint::mul_by_generator(&secret_scalar).to_affine();
        let verifying_key = VerifyingKey::new(distid, public_key)?;
        Ok(Self {
            secret_scalar,
            verifying_key,
        })
    }

    /// Parse signing key from big endian-encoded bytes.
    pub fn from_bytes(distid: &DistId, bytes: &FieldBytes) -> Result<Self> {
        Self::new(distid, NonZeroScalar::from_bytes(bytes)?)
    }

    /// Parse signing key from big endian-encoded byte slice containing a secret
    /// scalar value.
    pub fn from_slice(distid: &DistId, slice: &[u8]) -> Result<Self> {
        Self::new(distid, NonZeroScalar::from_slice(slice)?)
    }

    /// Parse signing key from a 64-digit hex string.
    pub fn from_hex(distid: &DistId, hex: &str) -> Result<Self> {
        Self::new(distid, NonZeroScalar::from_hex(hex)?)
    }

    /// Generate a random signing key.
    pub fn random(distid: &DistId, rng: &mut impl CryptoRngCore) -> Result<Self> {
        for _ in 0..MAX_RETRY {
            match Self::new(distid, NonZeroScalar::try_random(rng)?) {
                Err(Error::InvalidCurveInput) => continue,
                result => return result,
            }
        }

        Err(Error::RandomSourceExhausted)
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

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &DistId {
        self.verifying_key.distid()
    }
}

/// Sign the digest `e = SM3(ZA ‖ M)` with the secret scalar `d`.
///
/// Candidate nonces that yield `r = 0`, `r + k = n` or `s = 0` are discarded
/// and redrawn; after [`MAX_RETRY`] draws this fails with
/// [`Error::RandomSourceExhausted`]. A secret of `n-1` fails with
/// [`Error::InvalidCurveInput`].
pub fn sign_prehash(
    rng: &mut impl CryptoRngCore,
    secret_scalar: &NonZeroScalar,
    prehash: &Hash,
) -> Result<Signature> {
    let d_plus_1_inv = (&**secret_scalar + &Scalar::one())
        .invert()
        .ok_or(Error::InvalidCurveInput)?;

    // A2
    let e = Scalar::reduce_bytes(prehash);

    for _ in 0..MAX_RETRY {
        // A3
        let k = NonZeroScalar::try_random(rng)?;

        // A4
        let point = ProjectivePoint::mul_by_generator(&k).to_affine();

        // A5
        let r = &e + &Scalar::reduce_bytes(&point.x().to_bytes());
        if r.is_zero() || (&r + &*k).is_zero() {
            continue;
        }

        // A6
        let s = &d_plus_1_inv * &(&*k - &(&r * &**secret_scalar));
        if s.is_zero() {
            continue;
        }

        // A7
        return Ok(Signature::from_scalars(&r, &s));
    }

    Err(Error::RandomSourceExhausted)
}

fn prehash_bytes(prehash: &[u8]) -> signature::Result<&Hash> {
    prehash.try_into().map_err(|_| signature::Error::new())
}

//
// `*Signer` trait impls
//

#[cfg(feature = "getrandom")]
impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        self.sign_prehash_with_rng(&mut OsRng, prehash)
    }
}

impl RandomizedPrehashSigner<Signature> for SigningKey {
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> signature::Result<Signature> {
        Ok(sign_prehash(
            rng,
            &self.secret_scalar,
            prehash_bytes(prehash)?,
        )?)
    }
}

impl RandomizedSigner<Signature> for SigningKey {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        // A1: set M~=ZA || M
        let hash = self.verifying_key.hash_msg(msg);
        self.sign_prehash_with_rng(rng, &hash)
    }
}

#[cfg(feature = "getrandom")]
impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        self.try_sign_with_rng(&mut OsRng, msg)
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_scalar.ct_eq(&other.secret_scalar)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

/// Constant-time comparison
impl Eq for SigningKey {}
impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}
