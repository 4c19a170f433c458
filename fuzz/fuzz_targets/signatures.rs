#![no_main]
use gm_sm2::{
    DEFAULT_DISTID,
    dsa::{Signature, SigningKey, signature::RandomizedSigner, signature::Verifier},
};
use libfuzzer_sys::fuzz_target;
use rand_chacha::{ChaChaRng, rand_core::SeedableRng};

fuzz_target!(|data: &[u8]| {
    if data.len() < 96 {
        return;
    }

    let Ok(sk) = SigningKey::from_slice(DEFAULT_DISTID, &data[0..32]) else {
        return;
    };
    let vk = sk.verifying_key();
    let msg = &data[96..];

    // Arbitrary signatures must never panic, and must not verify
    let forged = Signature::from_slice(&data[32..96]).unwrap();
    let _ = vk.verify(msg, &forged);
    if let Ok(sig) = Signature::from_der(&data[32..]) {
        let _ = vk.verify(msg, &sig);
        let _ = sig.to_der();
    }

    // Signatures we produce must verify
    let mut rng = ChaChaRng::from_seed(data[32..64].try_into().unwrap());
    let sig = sk.sign_with_rng(&mut rng, msg);
    assert!(vk.verify(msg, &sig).is_ok());
    assert_eq!(Signature::from_der(&sig.to_der().unwrap()).unwrap(), sig);
});
