#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::panic,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

#[cfg(feature = "std")]
extern crate std;

mod compress;

pub use compress::{compress, BLOCK_SIZE, IV};

#[cfg(feature = "digest")]
pub use digest;

use core::fmt;

/// Size of an SM3 digest in bytes.
pub const OUTPUT_SIZE: usize = 32;

/// Offset of the 64-bit length field inside the final padded block.
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// Observable phase of an [`Sm3`] hash state.
///
/// The third phase of the hash, `Finalized`, has no value here: finalizing
/// consumes the state (or, for [`Sm3::finalize_reset`], starts over in
/// [`Phase::Empty`]).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// No input has been absorbed since construction or the last reset.
    Empty,
    /// Input has been absorbed and the digest has not been produced yet.
    Accumulating,
}

/// SM3 hash state.
///
/// Holds the 256-bit chaining value, the pending partial block and the
/// number of bytes absorbed so far. The state is owned by whoever is
/// hashing; it is `Clone` so that a common prefix can be hashed once and
/// forked.
#[derive(Clone)]
pub struct Sm3 {
    chaining: [u32; 8],
    buffer: [u8; BLOCK_SIZE],
    buffer_len: usize,
    processed: u64,
}

impl Sm3 {
    /// Create a hash state initialized with the SM3 IV.
    pub const fn new() -> Self {
        Self {
            chaining: IV,
            buffer: [0; BLOCK_SIZE],
            buffer_len: 0,
            processed: 0,
        }
    }

    /// Create a hash state which has already absorbed `prefix`.
    pub fn new_with_prefix(prefix: impl AsRef<[u8]>) -> Self {
        let mut hasher = Self::new();
        hasher.update(prefix.as_ref());
        hasher
    }

    /// Compute the digest of `data` in one shot.
    pub fn digest(data: impl AsRef<[u8]>) -> [u8; OUTPUT_SIZE] {
        Self::new_with_prefix(data).finalize()
    }

    /// Absorb `data` and return the state, for builder-style chaining.
    #[must_use]
    pub fn chain(mut self, data: impl AsRef<[u8]>) -> Self {
        self.update(data.as_ref());
        self
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> Phase {
        if self.processed == 0 {
            Phase::Empty
        } else {
            Phase::Accumulating
        }
    }

    /// Absorb more input. Any number of calls with arbitrary chunk
    /// boundaries hashes the same as one call over the concatenation.
    pub fn update(&mut self, data: &[u8]) {
        self.processed = self.processed.wrapping_add(data.len() as u64);
        let mut data = data;

        if self.buffer_len != 0 {
            let take = (BLOCK_SIZE - self.buffer_len).min(data.len());
            let (head, tail) = data.split_at(take);
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(head);
            self.buffer_len += take;
            data = tail;

            if self.buffer_len < BLOCK_SIZE {
                return;
            }

            compress(&mut self.chaining, &self.buffer);
            self.buffer_len = 0;
        }

        let blocks = data.chunks_exact(BLOCK_SIZE);
        let rest = blocks.remainder();

        for block in blocks {
            self.buffer.copy_from_slice(block);
            compress(&mut self.chaining, &self.buffer);
        }

        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    /// Pad, process the final block(s) and return the digest.
    pub fn finalize(mut self) -> [u8; OUTPUT_SIZE] {
        self.finalize_reset()
    }

    /// Return the digest and put the state back into [`Phase::Empty`].
    pub fn finalize_reset(&mut self) -> [u8; OUTPUT_SIZE] {
        let bit_len = self.processed.wrapping_mul(8);
        let mut block = self.buffer;
        let pos = self.buffer_len;

        block[pos] = 0x80;
        block[pos + 1..].fill(0);

        if pos >= LENGTH_OFFSET {
            compress(&mut self.chaining, &block);
            block = [0; BLOCK_SIZE];
        }

        block[LENGTH_OFFSET..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.chaining, &block);

        let mut out = [0u8; OUTPUT_SIZE];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.chaining) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        self.reset();
        out
    }

    /// Discard all absorbed input.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sm3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm3")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "std")]
impl std::io::Write for Sm3 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

//
// RustCrypto `digest` trait impls
//

#[cfg(feature = "digest")]
impl digest::HashMarker for Sm3 {}

#[cfg(feature = "digest")]
impl digest::OutputSizeUser for Sm3 {
    type OutputSize = digest::consts::U32;
}

#[cfg(feature = "digest")]
impl digest::core_api::BlockSizeUser for Sm3 {
    type BlockSize = digest::consts::U64;
}

#[cfg(feature = "digest")]
impl digest::Update for Sm3 {
    fn update(&mut self, data: &[u8]) {
        Sm3::update(self, data);
    }
}

#[cfg(feature = "digest")]
impl digest::FixedOutput for Sm3 {
    fn finalize_into(self, out: &mut digest::Output<Self>) {
        out.copy_from_slice(&Sm3::finalize(self));
    }
}

#[cfg(feature = "digest")]
impl digest::Reset for Sm3 {
    fn reset(&mut self) {
        Sm3::reset(self);
    }
}

#[cfg(feature = "digest")]
impl digest::FixedOutputReset for Sm3 {
    fn finalize_into_reset(&mut self, out: &mut digest::Output<Self>) {
        out.copy_from_slice(&Sm3::finalize_reset(self));
    }
}

#[cfg(test)]
mod tests {
    use super::{Phase, Sm3, BLOCK_SIZE};

    #[test]
    fn phase_transitions() {
        let mut hasher = Sm3::new();
        assert_eq!(hasher.phase(), Phase::Empty);

        hasher.update(b"abc");
        assert_eq!(hasher.phase(), Phase::Accumulating);

        hasher.reset();
        assert_eq!(hasher.phase(), Phase::Empty);

        hasher.update(b"abc");
        let _ = hasher.finalize_reset();
        assert_eq!(hasher.phase(), Phase::Empty);
    }

    #[test]
    fn reset_discards_input() {
        let mut hasher = Sm3::new();
        hasher.update(b"garbage that must not leak into the digest");
        hasher.reset();
        hasher.update(b"abc");
        assert_eq!(hasher.finalize(), Sm3::digest(b"abc"));
    }

    #[test]
    fn full_blocks_after_partial_block() {
        let data = [0x5au8; 4 * BLOCK_SIZE + 7];
        let mut bulk = Sm3::new();
        bulk.update(&data[..3]);
        bulk.update(&data[3..]);

        let mut bytewise = Sm3::new();
        for byte in &data {
            bytewise.update(core::slice::from_ref(byte));
        }
        assert_eq!(bulk.finalize(), bytewise.finalize());

        // "abcd" × 16 is exactly one block
        let mut block = [0u8; BLOCK_SIZE];
        for chunk in block.chunks_exact_mut(4) {
            chunk.copy_from_slice(b"abcd");
        }
        assert_eq!(
            Sm3::digest(block),
            hex_literal::hex!("debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732")
        );
    }

    #[test]
    fn padding_boundaries() {
        // 55 bytes fits the length in the same block, 56 spills into a second one
        for len in [0, 1, 55, 56, 63, 64, 65, 119, 120, 128] {
            let data = [0x61u8; 2 * BLOCK_SIZE + 1];
            let mut split = Sm3::new();
            for byte in &data[..len] {
                split.update(core::slice::from_ref(byte));
            }
            assert_eq!(split.finalize(), Sm3::digest(&data[..len]), "len = {len}");
        }
    }
}
