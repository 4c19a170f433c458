//! Support for verifying SM2DSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! B1: verify whether r' in [1,n-1], verification failed if not
//! B2: verify whether s' in [1,n-1], verification failed if not
//! B3: set M'~=ZA || M'
//! B4: calculate e'=Hv(M'~)
//! B5: calculate t = (r' + s') modn, verification failed if t=0
//! B6: calculate the point (x1', y1')=[s']G + [t]PA
//! B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
//! ```

use super::Signature;
use crate::{
    AffinePoint, Hash, ProjectivePoint, Result, Scalar,
    distid::{DistId, compute_za, hash_message},
};
use alloc::{string::String, vec::Vec};
use signature::{Verifier, hazmat::PrehashVerifier};

/// SM2DSA public key used for verifying signatures are valid for a given
/// message.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for verifying:
///
/// - [`Verifier`]: verify a message against a provided key and signature
/// - [`PrehashVerifier`]: verify the low-level raw output bytes of a message digest
///
/// [`VerifyingKey::verify_bool`] is a shorthand reporting a plain `bool`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    /// Signer's public key.
    public_key: AffinePoint,

    /// Signer's user information hash `Z`.
    identity_hash: Hash,

    /// Distinguishing identifier used to compute `Z`.
    distid: String,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from a signer's distinguishing identifier
    /// and public key.
    ///
    /// Fails when the point is the identity or the identifier is too long.
    pub fn new(distid: &DistId, public_key: AffinePoint) -> Result<Self> {
        let identity_hash = compute_za(distid.as_bytes(), &public_key)?;

        Ok(Self {
            identity_hash,
            public_key,
            distid: distid.into(),
        })
    }

    /// Initialize [`VerifyingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(distid: &DistId, bytes: &[u8]) -> Result<Self> {
        Self::new(distid, AffinePoint::from_sec1_bytes(bytes)?)
    }

    /// Initialize [`VerifyingKey`] from a hex-encoded uncompressed point.
    pub fn from_hex(distid: &DistId, hex: &str) -> Result<Self> {
        Self::from_sec1_bytes(distid, &hex::decode(hex)?)
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.public_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &DistId {
        self.distid.as_str()
    }

    /// The user information hash `ZA` bound to this key.
    pub fn identity_hash(&self) -> &Hash {
        &self.identity_hash
    }

    /// Serialize as an uncompressed SEC1 point.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        self.public_key.to_sec1_bytes()
    }

    /// Verify `signature` over `msg`, reporting the outcome as a `bool`.
    pub fn verify_bool(&self, msg: &[u8], signature: &Signature) -> bool {
        verify_prehash(&self.public_key, &self.hash_msg(msg), signature)
    }

    /// Compute message hash `e = SM3(ZA ‖ M)`.
    pub(crate) fn hash_msg(&self, msg: &[u8]) -> Hash {
        hash_message(&self.identity_hash, msg)
    }
}

/// Verify a signature over the digest `e = SM3(ZA ‖ M)`.
///
/// Out-of-range `r` or `s`, `t = 0`, a public key at infinity and a sum
/// point at infinity all verify as `false`.
pub fn verify_prehash(public_key: &AffinePoint, prehash: &Hash, signature: &Signature) -> bool {
    // B1: verify whether r' in [1,n-1], verification failed if not
    let Ok(r) = Scalar::from_bytes(signature.r_bytes()) else {
        return false;
    };

    // B2: verify whether s' in [1,n-1], verification failed if not
    let Ok(s) = Scalar::from_bytes(signature.s_bytes()) else {
        return false;
    };

    if r.is_zero() || s.is_zero() || public_key.is_identity() {
        return false;
    }

    // B4: calculate e'=Hv(M'~)
    let e = Scalar::reduce_bytes(prehash);

    // B5: calculate t = (r' + s') modn, verification failed if t=0
    let t = &r + &s;
    if t.is_zero() {
        return false;
    }

    // B6: calculate the point (x1', y1')=[s']G + [t]PA
    let point = ProjectivePoint::lincomb(
        &s,
        &ProjectivePoint::generator(),
        &t,
        &public_key.to_projective(),
    )
    .to_affine();

    if point.is_identity() {
        return false;
    }

    // B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
    r == &e + &Scalar::reduce_bytes(&point.x().to_bytes())
}

//
// `*Verifier` trait impls
//

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        let prehash = <&Hash>::try_from(prehash).map_err(|_| signature::Error::new())?;

        if verify_prehash(&self.public_key, prehash, signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        // B3: set M'~=ZA || M'
        let hash = self.hash_msg(msg);
        self.verify_prehash(&hash, signature)
    }
}

//
// Other trait impls
//

impl AsRef<AffinePoint> for VerifyingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

impl From<VerifyingKey> for AffinePoint {
    fn from(verifying_key: VerifyingKey) -> AffinePoint {
        verifying_key.public_key
    }
}

impl From<&VerifyingKey> for AffinePoint {
    fn from(verifying_key: &VerifyingKey) -> AffinePoint {
        verifying_key.public_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{VerifyingKey, verify_prehash};
    use crate::{AffinePoint, DEFAULT_DISTID, Error, dsa::Signature};
    use hex_literal::hex;

    const N: [u8; 32] = hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123");

    #[test]
    fn rejects_identity_key() {
        assert_eq!(
            VerifyingKey::new(DEFAULT_DISTID, AffinePoint::identity()),
            Err(Error::InvalidCurveInput)
        );
        assert_eq!(
            VerifyingKey::from_sec1_bytes(DEFAULT_DISTID, &[0x00]),
            Err(Error::InvalidCurveInput)
        );
        assert_eq!(
            VerifyingKey::from_hex(DEFAULT_DISTID, "04zz"),
            Err(Error::InvalidHex)
        );
    }

    #[test]
    fn out_of_range_components_are_false() {
        let g = AffinePoint::generator();
        let e = [0u8; 32];
        for (r, s) in [([0u8; 32], [1u8; 32]), ([1u8; 32], [0u8; 32]), (N, [1u8; 32]), ([1u8; 32], N)] {
            let sig = Signature::from_components(r, s);
            assert!(!verify_prehash(&g, &e, &sig));
        }
        let sig = Signature::from_components([1u8; 32], [1u8; 32]);
        assert!(!verify_prehash(&AffinePoint::identity(), &e, &sig));
    }

    #[test]
    fn zero_t_is_false() {
        // r + s = n
        let mut r = [0u8; 32];
        r[31] = 1;
        let mut s = N;
        s[31] -= 1;
        let sig = Signature::from_components(r, s);
        assert!(!verify_prehash(&AffinePoint::generator(), &[0u8; 32], &sig));
    }
}
