//! Affine curve points.

use super::{ProjectivePoint, field::FieldElement, params, scalar::Scalar};
use crate::{Error, FIELD_SIZE, FieldBytes, Result};
use alloc::vec::Vec;
use core::ops::{Mul, Neg};

/// SEC1 tag of an uncompressed point.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Length of an uncompressed SEC1 point: `04 ‖ x ‖ y`.
pub const UNCOMPRESSED_POINT_SIZE: usize = 1 + 2 * FIELD_SIZE;

/// Point on the SM2 curve in affine coordinates, or the point at infinity.
///
/// Every public constructor checks the curve equation
/// `y² = x³ + a·x + b (mod p)`, so a value of this type is always a valid
/// group element.
#[derive(Clone, PartialEq, Eq)]
pub struct AffinePoint {
    x: FieldElement,
    y: FieldElement,
    infinity: bool,
}

impl AffinePoint {
    /// The point at infinity.
    pub fn identity() -> Self {
        Self {
            x: FieldElement::zero(),
            y: FieldElement::zero(),
            infinity: true,
        }
    }

    /// Base point `G`.
    pub fn generator() -> Self {
        params().generator.clone()
    }

    /// Create a point from field coordinates, checking the curve equation.
    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self> {
        let point = Self::from_trusted_coordinates(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::InvalidCurveInput)
        }
    }

    /// Create a point from 32-byte big-endian coordinates.
    ///
    /// Fails with [`Error::InvalidCurveInput`] when a coordinate is not
    /// below `p` or the point is not on the curve.
    pub fn from_coordinates(x: &FieldBytes, y: &FieldBytes) -> Result<Self> {
        Self::new(FieldElement::from_bytes(x)?, FieldElement::from_bytes(y)?)
    }

    /// Decode an uncompressed SEC1 point `04 ‖ x ‖ y`.
    pub fn from_uncompressed(bytes: &[u8]) -> Result<Self> {
        match bytes.split_first() {
            Some((&UNCOMPRESSED_TAG, coords)) if coords.len() == 2 * FIELD_SIZE => {
                let (x, y) = coords.split_at(FIELD_SIZE);
                Self::new(FieldElement::from_slice(x)?, FieldElement::from_slice(y)?)
            }
            _ => Err(Error::InvalidCurveInput),
        }
    }

    /// Decode a SEC1 point: either the single byte `00` for the identity or
    /// an uncompressed point. Compressed points are not supported.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [0x00] => Ok(Self::identity()),
            _ => Self::from_uncompressed(bytes),
        }
    }

    /// Encode as an uncompressed SEC1 point.
    ///
    /// The identity has no uncompressed form and yields
    /// [`Error::InvalidCurveInput`].
    pub fn to_uncompressed(&self) -> Result<[u8; UNCOMPRESSED_POINT_SIZE]> {
        if self.infinity {
            return Err(Error::InvalidCurveInput);
        }

        let mut out = [0u8; UNCOMPRESSED_POINT_SIZE];
        out[0] = UNCOMPRESSED_TAG;
        out[1..=FIELD_SIZE].copy_from_slice(&self.x.to_bytes());
        out[1 + FIELD_SIZE..].copy_from_slice(&self.y.to_bytes());
        Ok(out)
    }

    /// Encode as SEC1 bytes, `00` for the identity.
    pub fn to_sec1_bytes(&self) -> Vec<u8> {
        match self.to_uncompressed() {
            Ok(bytes) => bytes.to_vec(),
            Err(_) => alloc::vec![0x00],
        }
    }

    /// Affine `x` coordinate (zero for the identity).
    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    /// Affine `y` coordinate (zero for the identity).
    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Does this point satisfy the curve equation? The identity does.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }

        let params = params();
        let rhs = &(&(&self.x.square() * &self.x) + &(&params.a * &self.x)) + &params.b;
        self.y.square() == rhs
    }

    /// Convert to Jacobian coordinates.
    pub fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint::from(self)
    }

    /// Build a point whose coordinates are known to satisfy the curve
    /// equation.
    pub(crate) fn from_trusted_coordinates(x: FieldElement, y: FieldElement) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::identity()
    }
}

impl core::fmt::Debug for AffinePoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.infinity {
            f.write_str("AffinePoint(identity)")
        } else {
            f.debug_struct("AffinePoint")
                .field("x", &self.x)
                .field("y", &self.y)
                .finish()
        }
    }
}

impl From<ProjectivePoint> for AffinePoint {
    fn from(point: ProjectivePoint) -> AffinePoint {
        point.to_affine()
    }
}

impl From<&ProjectivePoint> for AffinePoint {
    fn from(point: &ProjectivePoint) -> AffinePoint {
        point.to_affine()
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        AffinePoint {
            x: self.x.clone(),
            y: -&self.y,
            infinity: self.infinity,
        }
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        -&self
    }
}

impl Mul<&Scalar> for &AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: &Scalar) -> ProjectivePoint {
        self.to_projective().mul_uint(scalar.as_uint())
    }
}
