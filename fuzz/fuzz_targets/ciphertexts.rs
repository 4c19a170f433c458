#![no_main]
use gm_sm2::pke::{DecryptingKey, EncryptionOptions, Mode};
use libfuzzer_sys::fuzz_target;
use rand_chacha::{ChaChaRng, rand_core::SeedableRng};

fuzz_target!(|data: &[u8]| {
    if data.len() < 64 {
        return;
    }

    let Ok(dk) = DecryptingKey::from_slice(&data[0..32]) else {
        return;
    };
    let options = match data[32] % 3 {
        0 => EncryptionOptions::plain(Mode::C1C3C2),
        1 => EncryptionOptions::plain(Mode::C1C2C3),
        _ => EncryptionOptions::asn1(),
    };
    let dk = dk.with_options(options);
    let msg = &data[64..];

    // Arbitrary ciphertexts must be rejected without panicking
    let _ = dk.decrypt(msg);

    // Ciphertexts we produce must decrypt to the original message
    let mut rng = ChaChaRng::from_seed(data[32..64].try_into().unwrap());
    let ciphertext = dk.encrypting_key().encrypt_with_rng(&mut rng, msg).unwrap();
    assert_eq!(dk.decrypt(&ciphertext).unwrap(), msg);
});
