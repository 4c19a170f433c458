//! Jacobian projective curve points.
//!
//! `(X : Y : Z)` represents the affine point `(X/Z², Y/Z³)`; `Z = 0` is the
//! point at infinity. Formulas are the `a = -3` ones from the Explicit-Formulas
//! Database: `dbl-2001-b`, `add-2007-bl` and `madd-2007-bl`.

use super::{
    AffinePoint, field::FieldElement, generator_table, scalar::NonZeroScalar, scalar::Scalar,
};
use core::ops::{Add, Mul, Neg, Sub};
use num_bigint::BigUint;

/// Number of bits consumed per window by scalar multiplication.
const WINDOW_BITS: usize = 4;

/// Point on the SM2 curve in Jacobian coordinates.
#[derive(Clone, Debug)]
pub struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl ProjectivePoint {
    /// The point at infinity, `(1 : 1 : 0)`.
    pub fn identity() -> Self {
        Self {
            x: FieldElement::one(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    /// Base point `G`.
    pub fn generator() -> Self {
        Self::from(&AffinePoint::generator())
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> AffinePoint {
        let Some(z_inv) = self.z.invert() else {
            return AffinePoint::identity();
        };

        let z_inv2 = z_inv.square();
        let z_inv3 = &z_inv2 * &z_inv;
        AffinePoint::from_trusted_coordinates(&self.x * &z_inv2, &self.y * &z_inv3)
    }

    /// Compute `2·self`.
    #[must_use]
    pub fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }

        let delta = self.z.square();
        let gamma = self.y.square();
        let beta = &self.x * &gamma;

        // alpha = 3·(X - delta)·(X + delta)
        let alpha = &(&self.x - &delta) * &(&self.x + &delta);
        let alpha = &alpha.double() + &alpha;

        let beta4 = beta.double().double();
        let x3 = &alpha.square() - &beta4.double();
        let z3 = &(&(&self.y + &self.z).square() - &gamma) - &delta;
        let gamma_sq8 = gamma.square().double().double().double();
        let y3 = &(&alpha * &(&beta4 - &x3)) - &gamma_sq8;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Compute `self + other`.
    #[must_use]
    pub fn add(&self, other: &ProjectivePoint) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = &self.x * &z2z2;
        let u2 = &other.x * &z1z1;
        let s1 = &(&self.y * &other.z) * &z2z2;
        let s2 = &(&other.y * &self.z) * &z1z1;

        if u1 == u2 {
            return if s1 == s2 {
                self.double()
            } else {
                Self::identity()
            };
        }

        let h = &u2 - &u1;
        let i = h.double().square();
        let j = &h * &i;
        let r = (&s2 - &s1).double();
        let v = &u1 * &i;

        let x3 = &(&r.square() - &j) - &v.double();
        let y3 = &(&r * &(&v - &x3)) - &(&s1 * &j).double();
        let z3 = &(&(&(&self.z + &other.z).square() - &z1z1) - &z2z2) * &h;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Compute `self + other` where `other` is affine (`Z2 = 1`).
    #[must_use]
    pub fn add_mixed(&self, other: &AffinePoint) -> Self {
        if other.is_identity() {
            return self.clone();
        }
        if self.is_identity() {
            return Self::from(other);
        }

        let z1z1 = self.z.square();
        let u2 = other.x() * &z1z1;
        let s2 = &(other.y() * &self.z) * &z1z1;

        if u2 == self.x {
            return if s2 == self.y {
                self.double()
            } else {
                Self::identity()
            };
        }

        let h = &u2 - &self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = &h * &i;
        let r = (&s2 - &self.y).double();
        let v = &self.x * &i;

        let x3 = &(&r.square() - &j) - &v.double();
        let y3 = &(&r * &(&v - &x3)) - &(&self.y * &j).double();
        let z3 = &(&(&self.z + &h).square() - &z1z1) - &hh;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Multiply by a non-negative integer of any size.
    ///
    /// The integer is not reduced first, so `n·P` is the identity and
    /// `(n + 1)·P = P` for the group order `n`.
    #[must_use]
    pub fn mul_uint(&self, k: &BigUint) -> Self {
        Self::mul_with_table(&self.window_table(), k)
    }

    /// Compute `k·G` using the precomputed generator table.
    pub fn mul_by_generator(k: &Scalar) -> Self {
        Self::mul_with_table(generator_table(), k.as_uint())
    }

    /// Compute `s·p + t·q` with interleaved double-and-add (Shamir's trick).
    pub fn lincomb(s: &Scalar, p: &ProjectivePoint, t: &Scalar, q: &ProjectivePoint) -> Self {
        let pq = p.add(q);
        let mut acc = Self::identity();

        for (s_byte, t_byte) in s.to_bytes().into_iter().zip(t.to_bytes()) {
            for shift in (0..8).rev() {
                acc = acc.double();
                match ((s_byte >> shift) & 1, (t_byte >> shift) & 1) {
                    (1, 1) => acc = acc.add(&pq),
                    (1, _) => acc = acc.add(p),
                    (_, 1) => acc = acc.add(q),
                    _ => {}
                }
            }
        }

        acc
    }

    /// `[0·self, 1·self, …, 15·self]`
    pub(crate) fn window_table(&self) -> [ProjectivePoint; 1 << WINDOW_BITS] {
        let mut table: [ProjectivePoint; 1 << WINDOW_BITS] =
            core::array::from_fn(|_| Self::identity());

        for i in 1..table.len() {
            table[i] = table[i - 1].add(self);
        }

        table
    }

    /// Left-to-right fixed-window multiplication, most significant nibble
    /// first.
    fn mul_with_table(table: &[ProjectivePoint; 1 << WINDOW_BITS], k: &BigUint) -> Self {
        let mut acc = Self::identity();

        for byte in k.to_bytes_be() {
            for nibble in [byte >> 4, byte & 0x0f] {
                for _ in 0..WINDOW_BITS {
                    acc = acc.double();
                }
                if nibble != 0 {
                    acc = acc.add(&table[usize::from(nibble)]);
                }
            }
        }

        acc
    }
}

impl Default for ProjectivePoint {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(point: &AffinePoint) -> ProjectivePoint {
        if point.is_identity() {
            Self::identity()
        } else {
            Self {
                x: point.x().clone(),
                y: point.y().clone(),
                z: FieldElement::one(),
            }
        }
    }
}

impl From<AffinePoint> for ProjectivePoint {
    fn from(point: AffinePoint) -> ProjectivePoint {
        Self::from(&point)
    }
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => true,
            (false, false) => {
                let z1z1 = self.z.square();
                let z2z2 = other.z.square();
                &self.x * &z2z2 == &other.x * &z1z1
                    && &self.y * &(&z2z2 * &other.z) == &other.y * &(&z1z1 * &self.z)
            }
            _ => false,
        }
    }
}

impl Eq for ProjectivePoint {}

impl Add<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(self, other)
    }
}

impl Add<&AffinePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        self.add_mixed(other)
    }
}

impl Neg for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x.clone(),
            y: -&self.y,
            z: self.z.clone(),
        }
    }
}

impl Neg for ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        -&self
    }
}

impl Sub<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(self, &-other)
    }
}

impl Mul<&Scalar> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: &Scalar) -> ProjectivePoint {
        self.mul_uint(scalar.as_uint())
    }
}

impl Mul<&NonZeroScalar> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: &NonZeroScalar) -> ProjectivePoint {
        self.mul_uint(scalar.as_uint())
    }
}
