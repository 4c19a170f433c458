//! SM2 Encryption Algorithm as defined in GB/T 32918.4-2016.
//!
//! ## Usage
//!
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! # fn main() -> gm_sm2::Result<()> {
//! use gm_sm2::pke::{DecryptingKey, Encoding, EncryptionOptions, Mode};
//! use rand_core::OsRng; // requires 'getrandom` feature
//!
//! // Encrypting
//! let decrypting_key = DecryptingKey::random(&mut OsRng)?; // serialize with `::to_bytes()`
//! let encrypting_key = decrypting_key.encrypting_key();
//! let plaintext = b"plaintext";
//! let ciphertext = encrypting_key.encrypt_with_rng(&mut OsRng, plaintext)?;
//!
//! // Decrypting
//! assert_eq!(decrypting_key.decrypt(&ciphertext)?, plaintext);
//!
//! // Legacy component order, ASN.1 encoded
//! let options = EncryptionOptions { mode: Mode::C1C2C3, encoding: Encoding::Asn1 };
//! let decrypting_key = decrypting_key.with_options(options);
//! let ciphertext = decrypting_key.encrypting_key().encrypt_with_rng(&mut OsRng, plaintext)?;
//! assert_eq!(decrypting_key.decrypt(&ciphertext)?, plaintext);
//! # Ok(())
//! # }
//! ```

mod ciphertext;
mod decrypting;
mod encrypting;

pub use self::{
    ciphertext::Ciphertext,
    decrypting::{DecryptingKey, decrypt},
    encrypting::{EncryptingKey, encrypt},
};

use crate::Result;
use alloc::vec::Vec;
use rand_core::CryptoRngCore;

#[cfg(feature = "getrandom")]
use rand_core::OsRng;

/// Order of the ciphertext components in the plain encoding.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// `C1 ‖ C2 ‖ C3`, the order of early drafts of the standard.
    C1C2C3,
    /// `C1 ‖ C3 ‖ C2`, the order of GM/T 0003-2012.
    #[default]
    C1C3C2,
}

/// Serialization of a ciphertext.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Encoding {
    /// `04 ‖ x1 ‖ y1` followed by `C2` and `C3` in [`Mode`] order.
    #[default]
    Plain,
    /// ASN.1 DER `SEQUENCE { x1 INTEGER, y1 INTEGER, C3 OCTET STRING,
    /// C2 OCTET STRING }`. The field order is fixed, [`Mode`] is ignored.
    Asn1,
}

/// Ciphertext format used by an [`EncryptingKey`] or [`DecryptingKey`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EncryptionOptions {
    /// Component order of the plain encoding.
    pub mode: Mode,
    /// Serialization.
    pub encoding: Encoding,
}

impl EncryptionOptions {
    /// Plain encoding with the given component order.
    pub const fn plain(mode: Mode) -> Self {
        Self {
            mode,
            encoding: Encoding::Plain,
        }
    }

    /// ASN.1 DER encoding.
    pub const fn asn1() -> Self {
        Self {
            mode: Mode::C1C3C2,
            encoding: Encoding::Asn1,
        }
    }
}

/// Encrypt messages to a public key.
pub trait Encryptor {
    /// Encrypt `msg`, drawing the ephemeral key from `rng`, and return the
    /// encoded ciphertext.
    fn encrypt_with_rng(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<Vec<u8>>;

    /// Encrypt `msg` using the operating system RNG.
    #[cfg(feature = "getrandom")]
    fn encrypt(&self, msg: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(&mut OsRng, msg)
    }
}

/// Decrypt ciphertexts with a private key.
pub trait Decryptor {
    /// Decode and decrypt an encoded ciphertext.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}
