//! Modular arithmetic over an arbitrary odd modulus.
//!
//! These are the primitives behind [`FieldElement`](super::field::FieldElement)
//! (modulo `p`) and [`Scalar`](super::scalar::Scalar) (modulo `n`). Inputs are
//! expected to be already reduced; outputs always are.

use crate::{FIELD_SIZE, FieldBytes};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// `(a + b) mod m`
pub fn add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let sum = a + b;
    if &sum >= m { sum - m } else { sum }
}

/// `(a - b) mod m`
pub fn sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    if a >= b { a - b } else { m - (b - a) }
}

/// `(a · b) mod m`
pub fn mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `-a mod m`
pub fn neg(a: &BigUint, m: &BigUint) -> BigUint {
    if a.is_zero() { BigUint::zero() } else { m - a }
}

/// `a^e mod m`
pub fn pow(a: &BigUint, e: &BigUint, m: &BigUint) -> BigUint {
    a.modpow(e, m)
}

/// Multiplicative inverse of `a` modulo `m` by the extended Euclidean
/// algorithm.
///
/// Returns `None` when `gcd(a, m) ≠ 1`, in particular for `a ≡ 0`.
pub fn inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let modulus = BigInt::from(m.clone());
    let (mut r0, mut r1) = (modulus.clone(), BigInt::from(a % m));
    let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());

    while !r1.is_zero() {
        let q = &r0 / &r1;
        let r2 = &r0 - &q * &r1;
        r0 = core::mem::replace(&mut r1, r2);
        let t2 = &t0 - &q * &t1;
        t0 = core::mem::replace(&mut t1, t2);
    }

    if !r0.is_one() {
        return None;
    }

    ((t0 % &modulus + &modulus) % &modulus).to_biguint()
}

/// Serialize a value `< 2^256` as 32 big-endian bytes.
pub fn to_fixed_bytes(value: &BigUint) -> FieldBytes {
    let bytes = value.to_bytes_be();
    let skip = bytes.len().saturating_sub(FIELD_SIZE);
    let mut out = [0u8; FIELD_SIZE];
    out[FIELD_SIZE - (bytes.len() - skip)..].copy_from_slice(&bytes[skip..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn m() -> BigUint {
        crate::arithmetic::group_order().clone()
    }

    #[test]
    fn inverse_of_zero_is_none() {
        assert_eq!(inverse(&BigUint::zero(), &m()), None);
    }

    #[test]
    fn inverse_of_one() {
        assert_eq!(inverse(&BigUint::one(), &m()), Some(BigUint::one()));
    }

    #[test]
    fn inverse_of_non_coprime_is_none() {
        let m = BigUint::from(15u32);
        assert_eq!(inverse(&BigUint::from(6u32), &m), None);
        assert_eq!(inverse(&BigUint::from(7u32), &m), Some(BigUint::from(13u32)));
    }

    #[test]
    fn sub_wraps() {
        let m = m();
        let r = sub(&BigUint::one(), &BigUint::from(2u32), &m);
        assert_eq!(r, &m - 1u32);
    }

    #[test]
    fn fixed_bytes_pads_on_the_left() {
        let bytes = to_fixed_bytes(&BigUint::from(0x0102u32));
        assert_eq!(bytes[..30], [0u8; 30]);
        assert_eq!(bytes[30..], [1, 2]);
        assert_eq!(to_fixed_bytes(&BigUint::zero()), [0u8; 32]);
    }

    proptest! {
        #[test]
        fn inverse_matches_fermat(bytes in any::<[u8; 32]>()) {
            let m = m();
            let a = BigUint::from_bytes_be(&bytes) % &m;
            prop_assume!(!a.is_zero());
            let inv = inverse(&a, &m).unwrap();
            prop_assert_eq!(mul(&a, &inv, &m), BigUint::one());
            prop_assert_eq!(&inv, &pow(&a, &(&m - 2u32), &m));
        }

        #[test]
        fn add_sub_neg_agree(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            let m = m();
            let a = BigUint::from_bytes_be(&a) % &m;
            let b = BigUint::from_bytes_be(&b) % &m;
            prop_assert_eq!(sub(&add(&a, &b, &m), &b, &m), a.clone());
            prop_assert_eq!(add(&a, &neg(&b, &m), &m), sub(&a, &b, &m));
            prop_assert_eq!(BigUint::from_bytes_be(&to_fixed_bytes(&a)), a);
        }
    }
}
