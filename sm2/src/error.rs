//! Error types.

/// Result type with the `gm-sm2` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by SM2 operations.
///
/// A signature which fails to verify is not an error: verification reports
/// a plain `false` (or an opaque [`signature::Error`] through the trait
/// impls).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Point not on the curve, identity where a finite point is required,
    /// scalar outside `[1, n-1]` or a malformed coordinate encoding.
    #[error("invalid curve point or scalar")]
    InvalidCurveInput,

    /// Raw or DER signature bytes are malformed.
    #[error("malformed signature encoding")]
    InvalidSignatureFormat,

    /// The public key cannot be encrypted to.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Ciphertext is malformed or its `C1` point is invalid.
    #[error("malformed ciphertext")]
    InvalidCiphertext,

    /// The `C3` hash of a decrypted ciphertext did not match.
    #[error("ciphertext integrity check failed")]
    IntegrityCheckFailed,

    /// Decryption derived an all-zero key stream.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Encryption exhausted its retries.
    #[error("encryption failed")]
    EncryptionFailed,

    /// The random number generator failed or kept producing rejected values.
    #[error("random source exhausted")]
    RandomSourceExhausted,

    /// Distinguishing identifier is too long to be hashed into `ZA`.
    #[error("distinguishing identifier too long")]
    InvalidDistId,

    /// Key derivation produced an all-zero key stream.
    #[error("KDF produced an all-zero key stream")]
    KdfZeroOutput,

    /// Requested key stream exceeds the 32-bit counter range.
    #[error("KDF output length too large")]
    KdfOutputTooLong,

    /// Input was not valid hexadecimal.
    #[error("invalid hex encoding")]
    InvalidHex,
}

impl From<hex::FromHexError> for Error {
    fn from(_: hex::FromHexError) -> Error {
        Error::InvalidHex
    }
}

impl From<rand_core::Error> for Error {
    fn from(_: rand_core::Error) -> Error {
        Error::RandomSourceExhausted
    }
}

#[cfg(feature = "dsa")]
impl From<Error> for signature::Error {
    fn from(err: Error) -> signature::Error {
        #[cfg(feature = "std")]
        {
            signature::Error::from_source(err)
        }
        #[cfg(not(feature = "std"))]
        {
            let _ = err;
            signature::Error::new()
        }
    }
}
