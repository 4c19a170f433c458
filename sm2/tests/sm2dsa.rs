//! SM2DSA tests.

#![cfg(feature = "dsa")]

use gm_sm2::{
    DEFAULT_DISTID,
    dsa::{
        Signature, SigningKey, VerifyingKey, compute_za, hash_message,
        signature::{
            RandomizedSigner, Verifier,
            hazmat::{PrehashVerifier, RandomizedPrehashSigner},
        },
    },
};
use hex_literal::hex;
use proptest::prelude::*;
use rand_core::{CryptoRng, OsRng, RngCore};

const PUBLIC_KEY: [u8; 65] = hex!(
    "0408D77AE04C01CC4C1104360DD8AF6B6F7DF334283D7C1A6AFD5652407B87BEE5014E2A57C36C150D16324DC664E31E6432359609C4E79847A5B161C8C7364C8A"
);
const IDENTITY: &str = "example@rustcrypto.org";
const MSG: &[u8] = b"testing";

// Created using:
// $ openssl pkeyutl -sign -in - -inkey pkcs8-private-key.pem -out sig -digest sm3 -pkeyopt distid:example@rustcrypto.org
const SIG: [u8; 64] = hex!(
    "d1dcccedd9fb785e0f67c16b7c52901625c0b69de9bca2144acc7be713cad2fc" // r
    "f7d1eae6e3a157b36c65f672f738ca8b46298bf149a6510072c431b49cd88b1c" // s
);

const SIG_DER: [u8; 71] = hex!(
    "304502201d09df0f021b8c9aa7a437c713f11f9bc5ef49b5f053de912d6a3a8b68d49688022100c8acda282cb69bd4734b9c164925772f8f5cb23b273c222d69a4a49bb40a8701"
);

// GB/T 32918.5-2017 Appendix A
const GMT_SECRET_KEY: [u8; 32] =
    hex!("3945208F7B2144B13F36E38AC6D39F95889393692860B51A42FB81EF4DF7C5B8");
const GMT_NONCE: [u8; 32] =
    hex!("59276E27D506861A16680F3AD9C02DCCEF3CC1FA3CDBE4CE6D54B80DEAC1BC21");
const GMT_MSG: &[u8] = b"message digest";
const GMT_SIG: [u8; 64] = hex!(
    "F5A03B0648D2C4630EEAC513E1BB81A15944DA3827D5B74143AC7EACEEE720B3" // r
    "B1B6AA29DF212FD8763182BC0D421CA1BB9038FD1F7F42D4840B69C485BBC1AA" // s
);

/// RNG which replays the same 32 bytes on every request.
struct FixedRng([u8; 32]);

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        unimplemented!()
    }

    fn next_u64(&mut self) -> u64 {
        unimplemented!()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.copy_from_slice(&self.0[..dest.len()]);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for FixedRng {}

#[test]
fn verify_test_vector() {
    let vk = VerifyingKey::from_sec1_bytes(IDENTITY, &PUBLIC_KEY).unwrap();
    let sig = Signature::from_bytes(&SIG);
    assert!(vk.verify(MSG, &sig).is_ok());
    assert!(vk.verify_bool(MSG, &sig));
    assert!(!vk.verify_bool(b"testinG", &sig));
}

#[test]
fn wrong_identity_rejects() {
    let vk = VerifyingKey::from_sec1_bytes(DEFAULT_DISTID, &PUBLIC_KEY).unwrap();
    assert!(vk.verify(MSG, &Signature::from_bytes(&SIG)).is_err());
}

#[test]
fn sign_known_answer() {
    let sk = SigningKey::from_bytes(DEFAULT_DISTID, &GMT_SECRET_KEY).unwrap();
    assert_eq!(
        sk.verifying_key().to_sec1_bytes(),
        hex!(
            "04"
            "09F9DF311E5421A150DD7D161E4BC5C672179FAD1833FC076BB08FF356F35020"
            "CCEA490CE26775A52DC6EA718CC1AA600AED05FBF35E084A6632F6072DA9AD13"
        )
    );
    assert_eq!(
        sk.verifying_key().identity_hash(),
        &hex!("B2E14C5C79C6DF5B85F4FE7ED8DB7A262B9DA7E07CCB0EA9F4747B8CCDA8A4F3")
    );

    let sig = sk.sign_with_rng(&mut FixedRng(GMT_NONCE), GMT_MSG);
    assert_eq!(sig.to_bytes(), GMT_SIG);
    assert!(sk.verifying_key().verify(GMT_MSG, &sig).is_ok());
}

#[test]
fn prehash_known_answer() {
    let sk = SigningKey::from_bytes(DEFAULT_DISTID, &GMT_SECRET_KEY).unwrap();
    let za = compute_za(DEFAULT_DISTID.as_bytes(), sk.verifying_key().as_affine()).unwrap();
    let e = hash_message(&za, GMT_MSG);

    let sig = sk
        .sign_prehash_with_rng(&mut FixedRng(GMT_NONCE), &e)
        .unwrap();
    assert_eq!(sig.to_bytes(), GMT_SIG);
    assert!(sk.verifying_key().verify_prehash(&e, &sig).is_ok());

    // digests must be exactly 32 bytes
    assert!(sk.sign_prehash_with_rng(&mut OsRng, &e[..31]).is_err());
    assert!(sk.verifying_key().verify_prehash(&e[..31], &sig).is_err());
}

#[test]
fn signature_encoding() {
    let sig = Signature::from_der(&SIG_DER).expect("decoded Signature failed");
    assert_eq!(sig.r_bytes()[..], SIG_DER[4..36]);
    assert_eq!(sig.s_bytes()[..], SIG_DER[39..71]);
    assert_eq!(sig.to_der().unwrap(), SIG_DER);
}

fn signing_key() -> impl Strategy<Value = SigningKey> {
    any::<[u8; 32]>().prop_filter_map("secret scalar out of range", |bytes| {
        SigningKey::from_bytes(IDENTITY, &bytes).ok()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn sign_and_verify(sk in signing_key()) {
        let signature = sk.sign_with_rng(&mut OsRng, MSG);
        prop_assert!(sk.verifying_key().verify(MSG, &signature).is_ok());
    }

    #[test]
    fn sign_and_verify_der(sk in signing_key()) {
        let signature = sk.sign_with_rng(&mut OsRng, MSG);
        let signature_der = signature.to_der().unwrap();
        let signature = Signature::from_der(&signature_der).expect("decoded Signature failed");
        prop_assert!(sk.verifying_key().verify(MSG, &signature).is_ok());
    }

    #[test]
    fn reject_invalid_signature(sk in signing_key(), byte in 0usize..64, bit in 0usize..8) {
        let mut signature_bytes = sk.sign_with_rng(&mut OsRng, MSG).to_bytes();

        // tweak signature to make it invalid
        signature_bytes[byte] ^= 1 << bit;

        let signature = Signature::from_bytes(&signature_bytes);
        prop_assert!(sk.verifying_key().verify(MSG, &signature).is_err());
    }

    #[test]
    fn reject_tampered_message(sk in signing_key(), byte in 0usize..7, bit in 0usize..8) {
        let signature = sk.sign_with_rng(&mut OsRng, MSG);
        let mut msg = MSG.to_vec();
        msg[byte] ^= 1 << bit;
        prop_assert!(!sk.verifying_key().verify_bool(&msg, &signature));
    }
}
