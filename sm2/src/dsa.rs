//! SM2 Digital Signature Algorithm (SM2DSA) as defined in GB/T 32918.2-2016.
//!
//! ## Usage
//!
//! Needs the `dsa` and `getrandom` crate features.
//!
#![cfg_attr(all(feature = "std", feature = "getrandom"), doc = "```")]
#![cfg_attr(not(all(feature = "std", feature = "getrandom")), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use gm_sm2::rand_core::OsRng;
//! use gm_sm2::dsa::{Signature, SigningKey, signature::Signer};
//!
//! let sk = SigningKey::random(gm_sm2::DEFAULT_DISTID, &mut OsRng)?;
//! let public = sk.verifying_key().to_sec1_bytes();
//! let sig: Signature = sk.sign(b"hello");
//!
//! use gm_sm2::dsa::{VerifyingKey, signature::Verifier};
//!
//! let vk = VerifyingKey::from_sec1_bytes(gm_sm2::DEFAULT_DISTID, &public)?;
//! vk.verify(b"hello", &sig)?;
//! assert!(vk.verify_bool(b"hello", &sig));
//! # Ok(())
//! # }
//! ```

mod der;
mod signing;
mod verifying;

pub use signature;

pub use self::{
    signing::{SigningKey, sign_prehash},
    verifying::{VerifyingKey, verify_prehash},
};
pub use crate::distid::{compute_za, hash_message};

use crate::{Error, FIELD_SIZE, FieldBytes, Result, Scalar};
use alloc::{string::String, vec::Vec};
use core::fmt::{self, Debug};
use signature::SignatureEncoding;

/// SM2DSA signature serialized as bytes: `r ‖ s`.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// SM2DSA signature.
///
/// Holds the raw 32-byte big-endian `r` and `s` values. Parsing only checks
/// the encoding; whether `r` and `s` lie in `[1, n-1]` is decided by the
/// verifier, which rejects out-of-range values.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    r: FieldBytes,
    s: FieldBytes,
}

impl Signature {
    /// Size of an encoded SM2DSA signature in bytes.
    pub const BYTE_SIZE: usize = 2 * FIELD_SIZE;

    /// Parse an SM2DSA signature from a byte array.
    pub fn from_bytes(bytes: &SignatureBytes) -> Self {
        let (r_bytes, s_bytes) = bytes.split_at(FIELD_SIZE);
        let mut r = FieldBytes::default();
        let mut s = FieldBytes::default();
        r.copy_from_slice(r_bytes);
        s.copy_from_slice(s_bytes);
        Self { r, s }
    }

    /// Parse an SM2DSA signature from a byte slice of exactly
    /// [`Self::BYTE_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SignatureBytes::try_from(bytes)
            .map(|bytes| Self::from_bytes(&bytes))
            .map_err(|_| Error::InvalidSignatureFormat)
    }

    /// Parse a hex-encoded `r ‖ s` signature.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        hex::decode_to_slice(hex, &mut bytes).map_err(|_| Error::InvalidSignatureFormat)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Create a [`Signature`] from the serialized `r` and `s` values.
    pub fn from_components(r: FieldBytes, s: FieldBytes) -> Self {
        Self { r, s }
    }

    pub(crate) fn from_scalars(r: &Scalar, s: &Scalar) -> Self {
        Self::from_components(r.to_bytes(), s.to_bytes())
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(FIELD_SIZE);
        r_bytes.copy_from_slice(&self.r);
        s_bytes.copy_from_slice(&self.s);
        ret
    }

    /// Lowercase hex encoding of `r ‖ s`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Bytes for the `r` component of a signature.
    pub fn r_bytes(&self) -> &FieldBytes {
        &self.r
    }

    /// Bytes for the `s` component of a signature.
    pub fn s_bytes(&self) -> &FieldBytes {
        &self.s
    }

    /// Convert this signature into a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gm_sm2::dsa::Signature(")?;

        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<SignatureBytes> for Signature {
    fn from(bytes: SignatureBytes) -> Signature {
        Signature::from_bytes(&bytes)
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
    }
}
