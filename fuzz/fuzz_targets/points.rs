#![no_main]
use gm_sm2::{AffinePoint, ProjectivePoint, Scalar};
use libfuzzer_sys::fuzz_target;

static mut I: u64 = 0;

fn test_group(p1: &ProjectivePoint, p2: &ProjectivePoint, s: &Scalar) {
    unsafe {
        I = I.wrapping_add(1);
        // Our goal is primarily to test decoding, so we skip 6 of every 7 group tests
        if I % 7 != 0 {
            return;
        }
    }

    let sum = p1 + p2;
    let scalar_mul = p1 * s;

    // Test that addition and doubling are consistent
    assert!(p1.double() == &(p1 + p1) - &ProjectivePoint::identity());

    // Test that negation works correctly
    assert!(&sum + &(-&sum) == ProjectivePoint::identity());

    // Test scalar multiplication distributive property
    assert!(&scalar_mul + &scalar_mul == p1 * &(s + s));

    // Test that the affine form round-trips through the uncompressed encoding
    let affine = sum.to_affine();
    if let Ok(bytes) = affine.to_uncompressed() {
        assert_eq!(AffinePoint::from_uncompressed(&bytes).unwrap(), affine);
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 160 {
        return;
    }

    let s = Scalar::reduce_bytes(&data[0..32].try_into().unwrap());
    let generated = ProjectivePoint::mul_by_generator(&s);

    let p1 = AffinePoint::from_uncompressed(&data[32..97])
        .map(|p| p.to_projective())
        .unwrap_or_else(|_| generated.clone());
    let p2 = AffinePoint::from_sec1_bytes(&data[97..97 + usize::from(data[1] & 0x3f)])
        .map(|p| p.to_projective())
        .unwrap_or_else(|_| ProjectivePoint::generator());

    test_group(&p1, &p2, &s);
    test_group(&generated, &p1, &s);
});
