//! Scalar arithmetic modulo the group order
//! `n = 0xfffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123`.

use super::group_order;
use crate::{Error, FieldBytes, MAX_RETRY, Result};
use core::ops::Deref;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};

/// Integer modulo the group order, always reduced: `0 ≤ v < n`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Scalar(BigUint);

impl_modular_ops!(Scalar, group_order, "scalar field");

impl Scalar {
    /// Interpret 32 big-endian bytes as an integer and reduce it modulo `n`.
    ///
    /// Used to map a message digest `e` or a field coordinate `x1` into the
    /// scalar field.
    pub fn reduce_bytes(bytes: &FieldBytes) -> Self {
        Self::from_uint_reduced(BigUint::from_bytes_be(bytes))
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes()[..].ct_eq(&other.to_bytes()[..])
    }
}

/// Non-zero scalar: `0 < v < n`.
///
/// Private keys and per-message nonces are non-zero scalars.
#[derive(Clone, PartialEq, Eq)]
pub struct NonZeroScalar(Scalar);

impl NonZeroScalar {
    /// Wrap a scalar, failing when it is zero.
    pub fn new(scalar: Scalar) -> Result<Self> {
        if scalar.is_zero() {
            Err(Error::InvalidCurveInput)
        } else {
            Ok(Self(scalar))
        }
    }

    /// Decode 32 big-endian bytes, failing unless the value lies in
    /// `[1, n-1]`. Out-of-range values are rejected, never reduced.
    pub fn from_bytes(bytes: &FieldBytes) -> Result<Self> {
        Self::new(Scalar::from_bytes(bytes)?)
    }

    /// Decode a 32-byte big-endian slice, see [`Self::from_bytes`].
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        Self::new(Scalar::from_slice(slice)?)
    }

    /// Decode a hex string of 64 digits, see [`Self::from_bytes`].
    pub fn from_hex(hex: &str) -> Result<Self> {
        let mut bytes = FieldBytes::default();
        hex::decode_to_slice(hex, &mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Draw a uniformly random scalar in `[1, n-1]` by rejection sampling.
    ///
    /// Gives up with [`Error::RandomSourceExhausted`] after
    /// [`MAX_RETRY`] rejected draws or when the RNG reports an error.
    pub fn try_random(rng: &mut impl CryptoRngCore) -> Result<Self> {
        let mut bytes = FieldBytes::default();

        for _ in 0..MAX_RETRY {
            rng.try_fill_bytes(&mut bytes)?;
            if let Ok(scalar) = Self::from_bytes(&bytes) {
                return Ok(scalar);
            }
        }

        Err(Error::RandomSourceExhausted)
    }
}

impl Deref for NonZeroScalar {
    type Target = Scalar;

    fn deref(&self) -> &Scalar {
        &self.0
    }
}

impl AsRef<Scalar> for NonZeroScalar {
    fn as_ref(&self) -> &Scalar {
        &self.0
    }
}

impl From<NonZeroScalar> for Scalar {
    fn from(scalar: NonZeroScalar) -> Scalar {
        scalar.0
    }
}

impl TryFrom<Scalar> for NonZeroScalar {
    type Error = Error;

    fn try_from(scalar: Scalar) -> Result<Self> {
        Self::new(scalar)
    }
}

impl ConstantTimeEq for NonZeroScalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl core::fmt::Debug for NonZeroScalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NonZeroScalar").finish_non_exhaustive()
    }
}
