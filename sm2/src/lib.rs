#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod arithmetic;
pub mod kdf;

#[cfg(feature = "dsa")]
pub mod dsa;

#[cfg(feature = "pke")]
pub mod pke;

#[cfg(feature = "dsa")]
mod distid;
mod error;

pub use crate::{
    arithmetic::{
        AffinePoint, ProjectivePoint, UNCOMPRESSED_POINT_SIZE,
        field::FieldElement,
        scalar::{NonZeroScalar, Scalar},
    },
    error::{Error, Result},
};
pub use gm_sm3::{self, Sm3};
pub use num_bigint::BigUint;
pub use rand_core;

/// Size of a serialized field element or scalar in bytes.
pub const FIELD_SIZE: usize = 32;

/// Serialized field element or scalar: 32 big-endian bytes.
pub type FieldBytes = [u8; FIELD_SIZE];

/// SM3 digest.
pub type Hash = [u8; gm_sm3::OUTPUT_SIZE];

/// Upper bound on the number of random draws made by any randomized
/// operation (scalar sampling, signing, encryption) before giving up.
pub const MAX_RETRY: usize = 100;

/// Default distinguishing identifier (`ID_A`) from GM/T 0009-2012.
pub const DEFAULT_DISTID: &str = "1234567812345678";

/// Object identifier of the `sm2p256v1` curve.
pub const SM2_CURVE_OID: &str = "1.2.156.10197.1.301";

/// Object identifier of the `SM3withSM2` signature algorithm.
pub const SM3_WITH_SM2_OID: &str = "1.2.156.10197.1.501";
