//! Field arithmetic modulo `p = 0xfffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff`.

use super::field_modulus;
use num_bigint::BigUint;

/// Element of the SM2 base field, always reduced: `0 ≤ v < p`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement(BigUint);

impl_modular_ops!(FieldElement, field_modulus, "base field");

impl FieldElement {
    /// Wrap a value known to be below `p`, used for the curve constants.
    pub(crate) fn from_uint_unchecked(value: BigUint) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldElement;
    use crate::{Error, arithmetic::field_modulus};
    use hex_literal::hex;
    use num_bigint::BigUint;
    use proptest::prelude::*;

    #[test]
    fn from_bytes_rejects_modulus() {
        let p = hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF");
        assert_eq!(FieldElement::from_bytes(&p), Err(Error::InvalidCurveInput));

        let mut p_minus_1 = p;
        p_minus_1[31] -= 1;
        let fe = FieldElement::from_bytes(&p_minus_1).unwrap();
        assert_eq!(fe, -FieldElement::one());
    }

    #[test]
    fn from_slice_checks_length() {
        assert_eq!(
            FieldElement::from_slice(&[1u8; 31]),
            Err(Error::InvalidCurveInput)
        );
        assert!(FieldElement::from_slice(&[1u8; 32]).is_ok());
    }

    #[test]
    fn zero_has_no_inverse() {
        assert!(FieldElement::zero().invert().is_none());
        assert_eq!(FieldElement::one().invert(), Some(FieldElement::one()));
    }

    #[test]
    fn debug_is_hex() {
        let s = alloc::format!("{:?}", FieldElement::one());
        assert!(s.starts_with("FieldElement(0x0000"));
        assert!(s.ends_with("01)"));
    }

    prop_compose! {
        fn field_element()(bytes in any::<[u8; 32]>()) -> FieldElement {
            FieldElement::from_uint_reduced(BigUint::from_bytes_be(&bytes))
        }
    }

    proptest! {
        #[test]
        fn invert_is_multiplicative_inverse(a in field_element()) {
            prop_assume!(!a.is_zero());
            let inv = a.invert().unwrap();
            prop_assert_eq!(&a * &inv, FieldElement::one());
        }

        #[test]
        fn square_and_double(a in field_element()) {
            prop_assert_eq!(a.square(), &a * &a);
            prop_assert_eq!(a.double(), &a + &a);
            prop_assert_eq!(a.pow(&BigUint::from(2u32)), a.square());
        }

        #[test]
        fn reduced_below_modulus(a in field_element(), b in field_element()) {
            prop_assert!((&a * &b).as_uint() < field_modulus());
            prop_assert!((&a - &b).as_uint() < field_modulus());
            prop_assert_eq!(&(&a - &b) + &b, a);
        }
    }
}
