//! `CityHash64` and its seeded variants.
//!
//! Inputs of up to 64 bytes are handled by one of three straight-line
//! formulas.  Longer inputs run the 64-byte block loop in [`BlockState`],
//! which the 128-bit engine shares.

use crate::mix::{
    fetch32, fetch64, hash_len_16, hash_len_16_mul, rotate64, shift_mix,
    weak_hash_len_32_with_seeds,
};
use crate::{K0, K1, K2};

/// Hash a byte string down to a 64-bit fingerprint.
pub fn hash64(s: &[u8]) -> u64 {
    let len = s.len();
    if len <= 64 {
        return if len <= 32 {
            if len <= 16 {
                hash_len_0_to_16(s)
            } else {
                hash_len_17_to_32(s)
            }
        } else {
            hash_len_33_to_64(s)
        };
    }

    // For strings over 64 bytes we loop.  Internal state consists of
    // 56 bytes: v, w, x, y, and z.  The state is seeded from the last 64
    // bytes, so the block loop never needs a partial final block.
    let mut state = BlockState::from_tail(s);

    // Operate on 64-byte chunks from the front.
    let blocks = (len - 1) / 64;
    for block in 0..blocks {
        state.absorb(s, block * 64);
    }

    let BlockState { v, w, x, y, z } = state;
    hash_len_16(
        hash_len_16(v.0, w.0)
            .wrapping_add(shift_mix(y).wrapping_mul(K1))
            .wrapping_add(z),
        hash_len_16(v.1, w.1).wrapping_add(x),
    )
}

/// Hash a byte string and a seed down to 64 bits.
pub fn hash64_with_seed(s: &[u8], seed: u64) -> u64 {
    hash64_with_seeds(s, K2, seed)
}

/// Hash a byte string and two seeds down to 64 bits.
pub fn hash64_with_seeds(s: &[u8], seed0: u64, seed1: u64) -> u64 {
    hash_len_16(hash64(s).wrapping_sub(seed0), seed1)
}

pub(crate) fn hash_len_0_to_16(s: &[u8]) -> u64 {
    let len = s.len();
    if len >= 8 {
        let mul = K2.wrapping_add((len as u64) * 2);
        let a = fetch64(s, 0).wrapping_add(K2);
        let b = fetch64(s, len - 8);
        let c = rotate64(b, 37).wrapping_mul(mul).wrapping_add(a);
        let d = rotate64(a, 25).wrapping_add(b).wrapping_mul(mul);
        return hash_len_16_mul(c, d, mul);
    }
    if len >= 4 {
        let mul = K2.wrapping_add((len as u64) * 2);
        let a = fetch32(s, 0) as u64;
        return hash_len_16_mul(
            (len as u64).wrapping_add(a << 3),
            fetch32(s, len - 4) as u64,
            mul,
        );
    }
    if len > 0 {
        let a = s[0] as u32;
        let b = s[len >> 1] as u32;
        let c = s[len - 1] as u32;
        let y = a.wrapping_add(b << 8);
        let z = (len as u32).wrapping_add(c << 2);
        return shift_mix((y as u64).wrapping_mul(K2) ^ (z as u64).wrapping_mul(K0))
            .wrapping_mul(K2);
    }
    K2
}

// This probably works well for 16-byte strings as well, but it may be overkill
// in that case.
fn hash_len_17_to_32(s: &[u8]) -> u64 {
    let len = s.len();
    let mul = K2.wrapping_add((len as u64) * 2);
    let a = fetch64(s, 0).wrapping_mul(K1);
    let b = fetch64(s, 8);
    let c = fetch64(s, len - 8).wrapping_mul(mul);
    let d = fetch64(s, len - 16).wrapping_mul(K2);
    hash_len_16_mul(
        rotate64(a.wrapping_add(b), 43)
            .wrapping_add(rotate64(c, 30))
            .wrapping_add(d),
        a.wrapping_add(rotate64(b.wrapping_add(K2), 18))
            .wrapping_add(c),
        mul,
    )
}

fn hash_len_33_to_64(s: &[u8]) -> u64 {
    let len = s.len();
    let mul = K2.wrapping_add((len as u64) * 2);
    let mut a = fetch64(s, 0).wrapping_mul(K2);
    let mut b = fetch64(s, 8);
    let c = fetch64(s, len - 24);
    let d = fetch64(s, len - 32);
    let e = fetch64(s, 16).wrapping_mul(K2);
    let f = fetch64(s, 24).wrapping_mul(9);
    let g = fetch64(s, len - 8);
    let h = fetch64(s, len - 16).wrapping_mul(mul);
    let u = rotate64(a.wrapping_add(g), 43)
        .wrapping_add(rotate64(b, 30).wrapping_add(c).wrapping_mul(9));
    let v = (a.wrapping_add(g) ^ d).wrapping_add(f).wrapping_add(1);
    let w = u
        .wrapping_add(v)
        .wrapping_mul(mul)
        .swap_bytes()
        .wrapping_add(h);
    let x = rotate64(e.wrapping_add(f), 42).wrapping_add(c);
    let y = v
        .wrapping_add(w)
        .wrapping_mul(mul)
        .swap_bytes()
        .wrapping_add(g)
        .wrapping_mul(mul);
    let z = e.wrapping_add(f).wrapping_add(c);
    a = x
        .wrapping_add(z)
        .wrapping_mul(mul)
        .wrapping_add(y)
        .swap_bytes()
        .wrapping_add(b);
    b = shift_mix(
        z.wrapping_add(a)
            .wrapping_mul(mul)
            .wrapping_add(d)
            .wrapping_add(h),
    )
    .wrapping_mul(mul);
    b.wrapping_add(x)
}

/// Rolling state of the long-input block loop.
///
/// Recomputed from scratch on every call and dropped at its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockState {
    pub v: (u64, u64),
    pub w: (u64, u64),
    pub x: u64,
    pub y: u64,
    pub z: u64,
}

impl BlockState {
    /// The 64-bit engine's initial state, taken from the last 64 bytes of
    /// `s` (and its first word).  Requires `s.len() > 64`.
    fn from_tail(s: &[u8]) -> Self {
        let len = s.len();
        debug_assert!(len > 64);

        let x = fetch64(s, len - 40);
        let y = fetch64(s, len - 16).wrapping_add(fetch64(s, len - 56));
        let z = hash_len_16(
            fetch64(s, len - 48).wrapping_add(len as u64),
            fetch64(s, len - 24),
        );
        let v = weak_hash_len_32_with_seeds(s, len - 64, len as u64, z);
        let w = weak_hash_len_32_with_seeds(s, len - 32, y.wrapping_add(K1), x);
        let x = x.wrapping_mul(K1).wrapping_add(fetch64(s, 0));

        Self { v, w, x, y, z }
    }

    /// Folds the 64-byte block at `s[offset..(offset + 64)]` into the state.
    #[inline]
    pub fn absorb(&mut self, s: &[u8], offset: usize) {
        debug_assert!(offset + 64 <= s.len());

        let Self { v, w, x, y, z } = self;
        *x = rotate64(
            x.wrapping_add(*y)
                .wrapping_add(v.0)
                .wrapping_add(fetch64(s, offset + 8)),
            37,
        )
        .wrapping_mul(K1);
        *y = rotate64(
            y.wrapping_add(v.1).wrapping_add(fetch64(s, offset + 48)),
            42,
        )
        .wrapping_mul(K1);
        *x ^= w.1;
        *y = y
            .wrapping_add(v.0)
            .wrapping_add(fetch64(s, offset + 40));
        *z = rotate64(z.wrapping_add(w.0), 33).wrapping_mul(K1);
        *v = weak_hash_len_32_with_seeds(s, offset, v.1.wrapping_mul(K1), x.wrapping_add(w.0));
        *w = weak_hash_len_32_with_seeds(
            s,
            offset + 32,
            z.wrapping_add(w.1),
            y.wrapping_add(fetch64(s, offset + 16)),
        );
        std::mem::swap(z, x);
    }
}
