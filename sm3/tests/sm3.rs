//! SM3 known-answer and streaming tests.

use gm_sm3::{Phase, Sm3};
use hex_literal::hex;
use proptest::prelude::*;

/// GM/T 0004-2012 Appendix A.1
const ABC_DIGEST: [u8; 32] =
    hex!("66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0");

/// GM/T 0004-2012 Appendix A.2: "abcd" repeated 16 times
const ABCD16_DIGEST: [u8; 32] =
    hex!("debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732");

/// Reference implementation from RustCrypto/hashes.
fn reference(data: &[u8]) -> [u8; 32] {
    use sm3::Digest;
    let mut out = [0u8; 32];
    out.copy_from_slice(&sm3::Sm3::digest(data));
    out
}

#[test]
fn abc() {
    assert_eq!(Sm3::digest(b"abc"), ABC_DIGEST);
}

#[test]
fn abcd_x16() {
    assert_eq!(Sm3::digest(b"abcd".repeat(16)), ABCD16_DIGEST);
}

#[test]
fn empty_message_matches_reference() {
    assert_eq!(Sm3::digest(b""), reference(&[]));
}

#[test]
fn million_a_matches_reference() {
    let data = vec![b'a'; 1_000_000];
    let mut hasher = Sm3::new();
    for chunk in data.chunks(997) {
        hasher.update(chunk);
    }
    assert_eq!(hasher.finalize(), reference(&data));
}

#[test]
fn chain_and_prefix() {
    let chained = Sm3::new().chain(b"ab").chain(b"c").finalize();
    let prefixed = Sm3::new_with_prefix(b"a").chain(b"bc").finalize();
    assert_eq!(chained, ABC_DIGEST);
    assert_eq!(prefixed, ABC_DIGEST);
}

#[test]
fn finalize_reset_reuses_state() {
    let mut hasher = Sm3::new();
    hasher.update(b"abc");
    assert_eq!(hasher.finalize_reset(), ABC_DIGEST);
    assert_eq!(hasher.phase(), Phase::Empty);
    hasher.update(b"abcd".repeat(16).as_slice());
    assert_eq!(hasher.finalize_reset(), ABCD16_DIGEST);
}

#[test]
fn forked_prefix() {
    let mut prefix = Sm3::new();
    prefix.update(b"ab");
    let fork = prefix.clone();
    assert_eq!(prefix.chain(b"c").finalize(), ABC_DIGEST);
    assert_eq!(fork.chain(b"cd").finalize(), Sm3::digest(b"abcd"));
}

#[cfg(feature = "digest")]
#[test]
fn digest_trait() {
    use gm_sm3::digest::{Digest, FixedOutputReset};

    let out = <Sm3 as Digest>::digest(b"abc");
    assert_eq!(out.as_slice(), &ABC_DIGEST);

    let mut hasher = <Sm3 as Digest>::new();
    Digest::update(&mut hasher, b"abc");
    let out = hasher.finalize_fixed_reset();
    assert_eq!(out.as_slice(), &ABC_DIGEST);
    assert_eq!(hasher.phase(), Phase::Empty);
}

#[cfg(feature = "std")]
#[test]
fn io_write() {
    let mut hasher = Sm3::new();
    std::io::copy(&mut &b"abc"[..], &mut hasher).unwrap();
    assert_eq!(hasher.finalize(), ABC_DIGEST);
}

proptest! {
    #[test]
    fn matches_reference(data in any::<Vec<u8>>()) {
        prop_assert_eq!(Sm3::digest(&data), reference(&data));
    }

    #[test]
    fn split_updates_match_one_shot(
        data in proptest::collection::vec(any::<u8>(), 0..512),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
    ) {
        let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c % (data.len() + 1)).collect();
        cuts.sort_unstable();

        let mut hasher = Sm3::new();
        let mut start = 0;
        for cut in cuts {
            hasher.update(&data[start..cut]);
            start = cut;
        }
        hasher.update(&data[start..]);

        prop_assert_eq!(hasher.finalize(), Sm3::digest(&data));
    }
}
