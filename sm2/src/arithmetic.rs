//! Pure Rust implementation of group operations on the SM2 elliptic curve.
//!
//! Curve parameters are the recommended `sm2p256v1` parameters from
//! GB/T 32918.5-2017 (GM/T 0003.5-2012):
//!
//! ```text
//! p  = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFF
//! a  = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFC
//! b  = 28E9FA9E 9D9F5E34 4D5A9E4B CF6509A7 F39789F5 15AB8F92 DDBCBD41 4D940E93
//! n  = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF 7203DF6B 21C6052B 53BBF409 39D54123
//! Gx = 32C4AE2C 1F198119 5F990446 6A39C994 8FE30BBF F2660BE1 715A4589 334C74C7
//! Gy = BC3736A2 F4F6779C 59BDCEE3 6B692153 D0A9877C C62A4740 02DF32E5 2139F0A0
//! ```
//!
//! The parameters are materialized once per process, on first use, and are
//! read-only afterwards.

#[macro_use]
mod macros;

mod affine;
pub mod field;
pub mod modular;
mod projective;
pub mod scalar;

pub use self::{
    affine::{AffinePoint, UNCOMPRESSED_POINT_SIZE},
    projective::ProjectivePoint,
};

use self::field::FieldElement;
use alloc::boxed::Box;
use num_bigint::BigUint;
use once_cell::race::OnceBox;

const P_WORDS: [u32; 8] = [
    0xFFFF_FFFE, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0x0000_0000, 0xFFFF_FFFF,
    0xFFFF_FFFF,
];

const A_WORDS: [u32; 8] = [
    0xFFFF_FFFE, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0x0000_0000, 0xFFFF_FFFF,
    0xFFFF_FFFC,
];

const B_WORDS: [u32; 8] = [
    0x28E9_FA9E, 0x9D9F_5E34, 0x4D5A_9E4B, 0xCF65_09A7, 0xF397_89F5, 0x15AB_8F92, 0xDDBC_BD41,
    0x4D94_0E93,
];

const N_WORDS: [u32; 8] = [
    0xFFFF_FFFE, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF, 0x7203_DF6B, 0x21C6_052B, 0x53BB_F409,
    0x39D5_4123,
];

const GX_WORDS: [u32; 8] = [
    0x32C4_AE2C, 0x1F19_8119, 0x5F99_0446, 0x6A39_C994, 0x8FE3_0BBF, 0xF266_0BE1, 0x715A_4589,
    0x334C_74C7,
];

const GY_WORDS: [u32; 8] = [
    0xBC37_36A2, 0xF4F6_779C, 0x59BD_CEE3, 0x6B69_2153, 0xD0A9_877C, 0xC62A_4740, 0x02DF_32E5,
    0x2139_F0A0,
];

/// Domain parameters of `sm2p256v1`.
#[derive(Debug)]
pub(crate) struct CurveParams {
    /// Field modulus.
    pub(crate) p: BigUint,
    /// Group order.
    pub(crate) n: BigUint,
    /// Curve coefficient `a = p - 3`.
    pub(crate) a: FieldElement,
    /// Curve coefficient `b`.
    pub(crate) b: FieldElement,
    /// Base point `G`.
    pub(crate) generator: AffinePoint,
}

static PARAMS: OnceBox<CurveParams> = OnceBox::new();

/// Window table `[0·G, 1·G, …, 15·G]` used by fixed-base multiplication.
static GENERATOR_TABLE: OnceBox<[ProjectivePoint; 16]> = OnceBox::new();

/// Curve parameters, built on first use.
pub(crate) fn params() -> &'static CurveParams {
    PARAMS.get_or_init(|| {
        Box::new(CurveParams {
            p: from_be_words(&P_WORDS),
            n: from_be_words(&N_WORDS),
            a: FieldElement::from_uint_unchecked(from_be_words(&A_WORDS)),
            b: FieldElement::from_uint_unchecked(from_be_words(&B_WORDS)),
            generator: AffinePoint::from_trusted_coordinates(
                FieldElement::from_uint_unchecked(from_be_words(&GX_WORDS)),
                FieldElement::from_uint_unchecked(from_be_words(&GY_WORDS)),
            ),
        })
    })
}

/// Fixed-base window table for the generator.
pub(crate) fn generator_table() -> &'static [ProjectivePoint; 16] {
    GENERATOR_TABLE.get_or_init(|| Box::new(ProjectivePoint::generator().window_table()))
}

/// Field modulus `p`.
pub fn field_modulus() -> &'static BigUint {
    &params().p
}

/// Group order `n`.
pub fn group_order() -> &'static BigUint {
    &params().n
}

/// Convert big-endian 32-bit words into an integer.
fn from_be_words(words: &[u32; 8]) -> BigUint {
    let mut digits = *words;
    digits.reverse();
    BigUint::from_slice(&digits)
}
