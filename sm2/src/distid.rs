//! Distinguishing identifier support.

use crate::{AffinePoint, Error, Hash, Result, Sm3, arithmetic::params};

/// Type which represents distinguishing identifiers.
pub(crate) type DistId = str;

/// Compute the user information hash `ZA` (GB/T 32918.2-2016 § 5.5).
///
/// ```text
/// ZA = SM3(ENTLA ‖ IDA ‖ a ‖ b ‖ xG ‖ yG ‖ xA ‖ yA)
/// ```
///
/// `ENTLA` is the bit length of the identifier as a 16-bit big-endian
/// integer, so identifiers of `0x2000` bytes or more are rejected with
/// [`Error::InvalidDistId`]. A public key at infinity is rejected with
/// [`Error::InvalidCurveInput`].
pub fn compute_za(distid: &[u8], public_key: &AffinePoint) -> Result<Hash> {
    let entla: u16 = distid
        .len()
        .checked_mul(8)
        .and_then(|bits| bits.try_into().ok())
        .ok_or(Error::InvalidDistId)?;

    if public_key.is_identity() {
        return Err(Error::InvalidCurveInput);
    }

    let params = params();
    Ok(Sm3::new()
        .chain(entla.to_be_bytes())
        .chain(distid)
        .chain(params.a.to_bytes())
        .chain(params.b.to_bytes())
        .chain(params.generator.x().to_bytes())
        .chain(params.generator.y().to_bytes())
        .chain(public_key.x().to_bytes())
        .chain(public_key.y().to_bytes())
        .finalize())
}

/// Compute the message digest `e = SM3(ZA ‖ M)`.
pub fn hash_message(za: &Hash, msg: &[u8]) -> Hash {
    Sm3::new_with_prefix(za).chain(msg).finalize()
}
