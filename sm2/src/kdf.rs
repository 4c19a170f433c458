//! SM2 key derivation function (GB/T 32918.4-2016 § 5.4.3).
//!
//! ```text
//! ct = 0x00000001
//! for i in 1..=ceil(klen / v):
//!     Ha_i = SM3(Z ‖ ct)        (ct as 32-bit big endian)
//!     ct += 1
//! K = Ha_1 ‖ Ha_2 ‖ … truncated to klen bytes
//! ```

use crate::{Error, Result};
use alloc::vec;
use alloc::vec::Vec;
use gm_sm3::{OUTPUT_SIZE, Sm3};

/// Largest key stream the 32-bit counter can produce.
pub const MAX_OUTPUT_LEN: u64 = 0xFFFF_FFFF * OUTPUT_SIZE as u64;

/// Fill `out` with the key stream derived from the concatenation of
/// `z_parts`.
///
/// Fails with [`Error::KdfZeroOutput`] when a non-empty output is all
/// zeros and with [`Error::KdfOutputTooLong`] when `out` is longer than
/// [`MAX_OUTPUT_LEN`]. An empty `out` is left untouched and succeeds.
pub fn derive_key(z_parts: &[&[u8]], out: &mut [u8]) -> Result<()> {
    if out.len() as u64 > MAX_OUTPUT_LEN {
        return Err(Error::KdfOutputTooLong);
    }

    let mut prefix = Sm3::new();
    for part in z_parts {
        prefix.update(part);
    }

    let mut counter: u32 = 1;
    for chunk in out.chunks_mut(OUTPUT_SIZE) {
        let block = prefix.clone().chain(counter.to_be_bytes()).finalize();
        chunk.copy_from_slice(&block[..chunk.len()]);
        counter = counter.wrapping_add(1);
    }

    if !out.is_empty() && out.iter().fold(0, |acc, b| acc | b) == 0 {
        return Err(Error::KdfZeroOutput);
    }

    Ok(())
}

/// Derive a `klen`-byte key from `z`.
pub fn kdf(z: &[u8], klen: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; klen];
    derive_key(&[z], &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{derive_key, kdf};
    use gm_sm3::Sm3;
    use hex_literal::hex;

    #[test]
    fn known_answer() {
        assert_eq!(
            kdf(b"abc", 40).unwrap(),
            hex!(
                "fe1ea80dac6f100c33537bd24619ec7c72a1e8b1ffeaefb1eb52a37791fdaf61"
                "9db16c0ac7bebb47"
            )
        );
    }

    #[test]
    fn first_block_is_hash_of_z_and_counter() {
        let expected = Sm3::digest(b"abc\x00\x00\x00\x01");
        assert_eq!(kdf(b"abc", 32).unwrap(), expected);
        assert_eq!(kdf(b"abc", 5).unwrap(), expected[..5]);
    }

    #[test]
    fn parts_are_concatenated() {
        let mut split = [0u8; 70];
        derive_key(&[b"a", b"", b"bc"], &mut split).unwrap();
        assert_eq!(kdf(b"abc", 70).unwrap(), split);
    }

    #[test]
    fn empty_output() {
        assert!(kdf(b"abc", 0).unwrap().is_empty());
    }
}
