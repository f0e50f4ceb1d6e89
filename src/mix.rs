//! The small mixing steps every CityHash engine is built from.
//!
//! All arithmetic is modulo 2^32 or 2^64, and all multi-byte loads are
//! little-endian regardless of the host, so a given byte string hashes the
//! same everywhere.

use crate::{Uint128, C1, C2, K_MUL};

/// Rotates `val` right by `shift` bits.  A shift of zero returns `val`
/// unchanged.
#[inline(always)]
pub fn rotate32(val: u32, shift: u32) -> u32 {
    val.rotate_right(shift)
}

/// Rotates `val` right by `shift` bits.  A shift of zero returns `val`
/// unchanged.
#[inline(always)]
pub fn rotate64(val: u64, shift: u32) -> u64 {
    val.rotate_right(shift)
}

/// Loads the little-endian `u32` at byte offset `i`.
#[inline(always)]
pub fn fetch32(bytes: &[u8], i: usize) -> u32 {
    debug_assert!(i + 4 <= bytes.len());
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[i..(i + 4)]);
    u32::from_le_bytes(word)
}

/// Loads the little-endian `u64` at byte offset `i`.
#[inline(always)]
pub fn fetch64(bytes: &[u8], i: usize) -> u64 {
    debug_assert!(i + 8 <= bytes.len());
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[i..(i + 8)]);
    u64::from_le_bytes(word)
}

#[inline(always)]
pub fn shift_mix(val: u64) -> u64 {
    val ^ (val >> 47)
}

/// Hash 128 input bits down to 64 bits of output.
///
/// This is intended to be a reasonably good hash function, and is the
/// combiner behind almost every multi-word step in the 64- and 128-bit
/// engines.
#[inline]
pub fn hash128_to_64(x: Uint128) -> u64 {
    hash_len_16_mul(x.low, x.high, K_MUL)
}

#[inline]
pub fn hash_len_16(u: u64, v: u64) -> u64 {
    hash_len_16_mul(u, v, K_MUL)
}

/// `hash_len_16` with a caller-chosen multiplier.
#[inline]
pub fn hash_len_16_mul(u: u64, v: u64, mul: u64) -> u64 {
    let mut a = (u ^ v).wrapping_mul(mul);
    a ^= a >> 47;
    let mut b = (v ^ a).wrapping_mul(mul);
    b ^= b >> 47;
    b.wrapping_mul(mul)
}

/// Murmur3's 32-bit finalizer.
#[inline]
pub fn fmix(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// One Murmur3-style absorb of `a` into `h`.
#[inline]
pub fn mur(mut a: u32, mut h: u32) -> u32 {
    a = a.wrapping_mul(C1);
    a = rotate32(a, 17);
    a = a.wrapping_mul(C2);
    h ^= a;
    h = rotate32(h, 19);
    h.wrapping_mul(5).wrapping_add(0xe6546b64)
}

/// Returns a 16-byte hash for 32 bytes of input words `w, x, y, z` and the
/// seeds `a` and `b`.  Quick and dirty: callers mix the result further.
#[inline]
pub fn weak_hash_len_32_with_seeds_words(
    w: u64,
    x: u64,
    y: u64,
    z: u64,
    mut a: u64,
    mut b: u64,
) -> (u64, u64) {
    a = a.wrapping_add(w);
    b = rotate64(b.wrapping_add(a).wrapping_add(z), 21);
    let c = a;
    a = a.wrapping_add(x);
    a = a.wrapping_add(y);
    b = b.wrapping_add(rotate64(a, 44));
    (a.wrapping_add(z), b.wrapping_add(c))
}

/// Return a 16-byte hash for `bytes[offset..(offset + 32)]`, `a`, and `b`.
#[inline]
pub fn weak_hash_len_32_with_seeds(bytes: &[u8], offset: usize, a: u64, b: u64) -> (u64, u64) {
    weak_hash_len_32_with_seeds_words(
        fetch64(bytes, offset),
        fetch64(bytes, offset + 8),
        fetch64(bytes, offset + 16),
        fetch64(bytes, offset + 24),
        a,
        b,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rotation_is_identity() {
        assert_eq!(rotate32(0xdeadbeef, 0), 0xdeadbeef);
        assert_eq!(rotate64(0x0123456789abcdef, 0), 0x0123456789abcdef);
    }

    #[test]
    fn rotation_is_rightward() {
        assert_eq!(rotate32(1, 1), 0x80000000);
        assert_eq!(rotate64(0x10, 4), 1);
        assert_eq!(rotate64(1, 63), 2);
    }

    #[test]
    fn loads_are_little_endian() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
        assert_eq!(fetch32(&bytes, 0), 0x04030201);
        assert_eq!(fetch32(&bytes, 5), 0x09080706);
        assert_eq!(fetch64(&bytes, 0), 0x0807060504030201);
        assert_eq!(fetch64(&bytes, 1), 0x0908070605040302);
    }

    #[test]
    fn shift_mix_folds_high_bits() {
        assert_eq!(shift_mix(0), 0);
        assert_eq!(shift_mix(1 << 47), (1 << 47) | 1);
        assert_eq!(shift_mix(u64::MAX), u64::MAX ^ ((1 << 17) - 1));
    }

    #[test]
    fn hash_len_16_is_the_128_to_64_reduction() {
        let (u, v) = (0x0123456789abcdef, 0xfedcba9876543210);
        assert_eq!(hash_len_16(u, v), hash128_to_64(Uint128::new(u, v)));
        assert_eq!(hash_len_16(u, v), hash_len_16_mul(u, v, K_MUL));
        assert_ne!(hash_len_16(u, v), hash_len_16(v, u));
    }

    #[test]
    fn hash_len_16_mul_step_by_step() {
        let (u, v, mul) = (3u64, 5u64, 7u64);
        let mut a = (u ^ v) * mul;
        a ^= a >> 47;
        let mut b = (v ^ a) * mul;
        b ^= b >> 47;
        assert_eq!(hash_len_16_mul(u, v, mul), b * mul);
    }

    #[test]
    fn fmix_zero_is_zero() {
        assert_eq!(fmix(0), 0);
        assert_ne!(fmix(1), 1);
    }

    #[test]
    fn weak_hash_reads_four_words() {
        let mut bytes = [0u8; 40];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        assert_eq!(
            weak_hash_len_32_with_seeds(&bytes, 8, 11, 13),
            weak_hash_len_32_with_seeds_words(
                fetch64(&bytes, 8),
                fetch64(&bytes, 16),
                fetch64(&bytes, 24),
                fetch64(&bytes, 32),
                11,
                13,
            )
        );
    }
}
