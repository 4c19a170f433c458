//! SM3 compression function.
//!
//! ```text
//! ME:  W[0..16]  = B as sixteen big-endian words
//!      W[j]      = P1(W[j-16] ^ W[j-9] ^ (W[j-3] <<< 15)) ^ (W[j-13] <<< 7) ^ W[j-6]   16 <= j < 68
//!      W'[j]     = W[j] ^ W[j+4]                                                    0 <= j < 64
//! CF:  SS1 = ((A <<< 12) + E + (T[j] <<< (j mod 32))) <<< 7
//!      SS2 = SS1 ^ (A <<< 12)
//!      TT1 = FF[j](A, B, C) + D + SS2 + W'[j]
//!      TT2 = GG[j](E, F, G) + H + SS1 + W[j]
//!      D = C, C = B <<< 9, B = A, A = TT1, H = G, G = F <<< 19, F = E, E = P0(TT2)
//!      V(i+1) = ABCDEFGH ^ V(i)
//! ```

/// Size of an SM3 message block in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Initial chaining value.
pub const IV: [u32; 8] = [
    0x7380_166f,
    0x4914_b2b9,
    0x1724_42d7,
    0xda8a_0600,
    0xa96f_30bc,
    0x1631_38aa,
    0xe38d_ee4d,
    0xb0fb_0e4e,
];

/// Round constant for rounds `0..16`.
const T0: u32 = 0x79cc_4519;

/// Round constant for rounds `16..64`.
const T1: u32 = 0x7a87_9d8a;

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

#[inline(always)]
fn ff(j: usize, a: u32, b: u32, c: u32) -> u32 {
    if j < 16 {
        a ^ b ^ c
    } else {
        (a & b) | (a & c) | (b & c)
    }
}

#[inline(always)]
fn gg(j: usize, e: u32, f: u32, g: u32) -> u32 {
    if j < 16 {
        e ^ f ^ g
    } else {
        (e & f) | (!e & g)
    }
}

/// Message expansion: the 68 words `W` of a block.
fn expand(block: &[u8; BLOCK_SIZE]) -> [u32; 68] {
    let mut w = [0u32; 68];

    for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
            ^ w[j - 13].rotate_left(7)
            ^ w[j - 6];
    }

    w
}

/// Process one 512-bit block, updating the chaining value in place.
pub fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_SIZE]) {
    let w = expand(block);
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let t = if j < 16 { T0 } else { T1 };
        #[allow(clippy::cast_possible_truncation)]
        let t = t.rotate_left((j % 32) as u32);

        let a12 = a.rotate_left(12);
        let ss1 = a12.wrapping_add(e).wrapping_add(t).rotate_left(7);
        let ss2 = ss1 ^ a12;
        let tt1 = ff(j, a, b, c)
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(w[j] ^ w[j + 4]);
        let tt2 = gg(j, e, f, g)
            .wrapping_add(h)
            .wrapping_add(ss1)
            .wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    for (v, x) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *v ^= x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Padded single block for the message "abc".
    fn abc_block() -> [u8; BLOCK_SIZE] {
        let mut block = [0u8; BLOCK_SIZE];
        block[..3].copy_from_slice(b"abc");
        block[3] = 0x80;
        block[63] = 0x18;
        block
    }

    #[test]
    fn expansion_of_abc_block() {
        // Appendix A.1 of GM/T 0004-2012
        let w = expand(&abc_block());
        assert_eq!(w[0], 0x6162_6380);
        assert_eq!(w[15], 0x0000_0018);
        assert_eq!(w[16], 0x9092_e200);
        assert_eq!(w[67], 0xb99c_0545);
    }

    #[test]
    fn compress_abc_block() {
        let mut state = IV;
        compress(&mut state, &abc_block());
        assert_eq!(
            state,
            [
                0x66c7_f0f4,
                0x62ee_edd9,
                0xd1f2_d46b,
                0xdc10_e4e2,
                0x4167_c487,
                0x5cf2_f7a2,
                0x297d_a02b,
                0x8f4b_a8e0,
            ]
        );
    }
}
