//! `CityHash128` and `CityHash128WithSeed`.
//!
//! Inputs shorter than 128 bytes go through a Murmur-inspired finisher.
//! Longer inputs reuse the 64-bit engine's block step, two blocks per
//! iteration, keep all 56 bytes of state to the end, and then fold in up to
//! four 32-byte chunks from the end of the input.

use crate::city64::{hash_len_0_to_16, BlockState};
use crate::mix::{fetch64, hash_len_16, rotate64, shift_mix, weak_hash_len_32_with_seeds};
use crate::{Uint128, K0, K1};

/// Hash a byte string down to a 128-bit fingerprint.
///
/// The first 16 bytes, when present, become the seed for the rest of the
/// input; shorter inputs use a fixed default seed.
pub fn hash128(s: &[u8]) -> Uint128 {
    if s.len() >= 16 {
        hash128_with_seed(
            &s[16..],
            Uint128::new(fetch64(s, 0), fetch64(s, 8).wrapping_add(K0)),
        )
    } else {
        hash128_with_seed(s, Uint128::new(K0, K1))
    }
}

/// Hash a byte string and a 128-bit seed down to a 128-bit fingerprint.
pub fn hash128_with_seed(s: &[u8], seed: Uint128) -> Uint128 {
    let len = s.len();
    if len < 128 {
        return city_murmur(s, seed);
    }

    // We expect len >= 128 to be the common case.  Keep 56 bytes of state:
    // v, w, x, y, and z.
    let mut x = seed.low;
    let y = seed.high;
    let z = (len as u64).wrapping_mul(K1);
    let v0 = rotate64(y ^ K1, 49).wrapping_mul(K1).wrapping_add(fetch64(s, 0));
    let v1 = rotate64(v0, 42).wrapping_mul(K1).wrapping_add(fetch64(s, 8));
    let w0 = rotate64(y.wrapping_add(z), 35).wrapping_mul(K1).wrapping_add(x);
    let w1 = rotate64(x.wrapping_add(fetch64(s, 88)), 53).wrapping_mul(K1);
    let mut state = BlockState {
        v: (v0, v1),
        w: (w0, w1),
        x,
        y,
        z,
    };

    // Same inner step as the 64-bit engine, two blocks at a time.
    let mut offset = 0;
    let mut remaining = len;
    loop {
        state.absorb(s, offset);
        state.absorb(s, offset + 64);
        offset += 128;
        remaining -= 128;
        if remaining < 128 {
            break;
        }
    }

    let BlockState {
        mut v,
        mut w,
        x: sx,
        mut y,
        mut z,
    } = state;
    x = sx.wrapping_add(rotate64(v.0.wrapping_add(z), 49).wrapping_mul(K0));
    y = y.wrapping_mul(K0).wrapping_add(rotate64(w.1, 37));
    z = z.wrapping_mul(K0).wrapping_add(rotate64(w.0, 27));
    w.0 = w.0.wrapping_mul(9);
    v.0 = v.0.wrapping_mul(K0);

    // If 0 < remaining < 128, hash up to 4 chunks of 32 bytes each from the
    // end of s.  These may reach back into bytes the block loop consumed.
    let end = offset + remaining;
    let mut tail_done = 0;
    while tail_done < remaining {
        tail_done += 32;
        let chunk = end - tail_done;
        y = rotate64(x.wrapping_add(y), 42)
            .wrapping_mul(K0)
            .wrapping_add(v.1);
        w.0 = w.0.wrapping_add(fetch64(s, chunk + 16));
        x = x.wrapping_mul(K0).wrapping_add(w.0);
        z = z.wrapping_add(w.1).wrapping_add(fetch64(s, chunk));
        w.1 = w.1.wrapping_add(v.0);
        v = weak_hash_len_32_with_seeds(s, chunk, v.0.wrapping_add(z), v.1);
        v.0 = v.0.wrapping_mul(K0);
    }

    // At this point our 56 bytes of state should contain more than enough
    // information for a strong 128-bit hash.  We use two different
    // 56-byte-to-8-byte hashes to get a 16-byte final result.
    x = hash_len_16(x, v.0);
    y = hash_len_16(y.wrapping_add(z), w.0);
    Uint128::new(
        hash_len_16(x.wrapping_add(v.1), w.1).wrapping_add(y),
        hash_len_16(x.wrapping_add(w.1), y.wrapping_add(v.1)),
    )
}

/// A subroutine for `hash128_with_seed`.  Returns a decent 128-bit hash for
/// strings of any length representable in `isize`.  Based on City and Murmur.
fn city_murmur(s: &[u8], seed: Uint128) -> Uint128 {
    let len = s.len();
    let mut a = seed.low;
    let mut b = seed.high;
    let mut c;
    let mut d;

    if len <= 16 {
        a = shift_mix(a.wrapping_mul(K1)).wrapping_mul(K1);
        c = b.wrapping_mul(K1).wrapping_add(hash_len_0_to_16(s));
        d = shift_mix(a.wrapping_add(if len >= 8 { fetch64(s, 0) } else { c }));
    } else {
        c = hash_len_16(fetch64(s, len - 8).wrapping_add(K1), a);
        d = hash_len_16(
            b.wrapping_add(len as u64),
            c.wrapping_add(fetch64(s, len - 16)),
        );
        a = a.wrapping_add(d);

        // Consume 16 bytes at a time while more than 16 remain *before* the
        // step; the final step may end short of the last bytes, which were
        // folded into c and d above.
        let mut offset = 0;
        let mut remaining = len - 16;
        loop {
            a ^= shift_mix(fetch64(s, offset).wrapping_mul(K1)).wrapping_mul(K1);
            a = a.wrapping_mul(K1);
            b ^= a;
            c ^= shift_mix(fetch64(s, offset + 8).wrapping_mul(K1)).wrapping_mul(K1);
            c = c.wrapping_mul(K1);
            d ^= c;
            offset += 16;
            if remaining <= 16 {
                break;
            }
            remaining -= 16;
        }
    }

    a = hash_len_16(a, c);
    b = hash_len_16(d, b);
    Uint128::new(a ^ b, hash_len_16(b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i as u8).wrapping_mul(37).wrapping_add(11)).collect()
    }

    #[test]
    fn empty() {
        assert_eq!(
            hash128(b""),
            Uint128::new(0x3df09dfc64c09a2b, 0x3cb540c392e51e29)
        );
        assert_eq!(
            hash128_with_seed(b"", Uint128::new(1234567, K0)),
            Uint128::new(0x6b56343feac0663, 0x5b7bc50fd8e8ad92)
        );
    }

    #[test]
    fn boundary_lengths() {
        // 143 and 144 straddle the long path (128 bytes after the 16-byte seed).
        let data = bytes(300);
        let expected = [
            (0, 0x3df09dfc64c09a2b, 0x3cb540c392e51e29),
            (1, 0x64e8ca2955b21866, 0xed398eb935b49b2c),
            (4, 0x73bfa0d93d9411db, 0xd959d75b63e1b508),
            (5, 0xc9b9cf811dd71454, 0x09ccce20c51b9d5e),
            (8, 0x8ce41648341b172c, 0x1c5bc06db402fb5a),
            (9, 0xe66585249d84587f, 0xe321fc0a664d7d36),
            (12, 0x1ec5702cf2d9a900, 0x7cdbf5e9a8c953ea),
            (13, 0x73d34cf3065001ec, 0x79b87ffebb394faa),
            (16, 0x34d4ae0638282300, 0x91b04670d6225302),
            (17, 0xf8bcbd0253b85b0d, 0x3eb00f7281a42e44),
            (24, 0x300b3b78d24e0832, 0x3e03aad31de16162),
            (25, 0x5f68ef0a4ab8ecc0, 0x27631792793ab861),
            (32, 0x5aaac0724a5632d9, 0xbf96b629762a5a93),
            (33, 0xd54fe68a9b2f9d83, 0x094c44755151876f),
            (64, 0x20be358204807b81, 0xfc59d1fa5eaeb2a5),
            (65, 0x68b5d7284bf8915d, 0xfe12c1796752b57c),
            (128, 0xe0cebeaff650d47a, 0xd07dbdacfc403d25),
            (129, 0x12f04ed031852b45, 0xcc1c1cf3bd58282a),
            (143, 0x7c8f6b1409e1930e, 0xc09384be5f618aa3),
            (144, 0x90d5438fcc87aad9, 0xec5e3c396c3130e1),
            (200, 0xa80c7d445e4fd623, 0x1925a9f61fcb226f),
            (256, 0xabd60d567adcf90d, 0xcb5c1b37d61f9994),
            (300, 0x47b49a0d1c2b4c9e, 0x610fdfa35d14a91b),
        ];
        for (len, low, high) in expected {
            assert_eq!(hash128(&data[..len]), Uint128::new(low, high), "len {}", len);
        }
    }

    #[test]
    fn short_input_uses_default_seed() {
        let data = bytes(15);
        assert_eq!(hash128(&data), hash128_with_seed(&data, Uint128::new(K0, K1)));
    }

    #[test]
    fn leading_16_bytes_become_the_seed() {
        let data = bytes(200);
        for len in [16, 17, 100, 143, 144, 200] {
            let seed = Uint128::new(fetch64(&data, 0), fetch64(&data, 8).wrapping_add(K0));
            assert_eq!(
                hash128(&data[..len]),
                hash128_with_seed(&data[16..len], seed)
            );
        }
    }

    #[test]
    fn every_length_is_in_bounds() {
        let data = bytes(600);
        let seed = Uint128::new(1, 2);
        for len in 0..=600 {
            hash128(&data[..len]);
            hash128_with_seed(&data[..len], seed);
        }
    }

    #[test]
    fn seed_changes_output() {
        let data = bytes(300);
        for len in [0, 10, 127, 128, 300] {
            assert_ne!(
                hash128_with_seed(&data[..len], Uint128::new(1, 2)),
                hash128_with_seed(&data[..len], Uint128::new(1, 3))
            );
        }
    }
}
