//! `CityHash32`.

use crate::mix::{fetch32, fmix, mur, rotate32};
use crate::{C1, C2};

/// Hash a byte string down to a 32-bit fingerprint.
pub fn hash32(s: &[u8]) -> u32 {
    let len = s.len();
    if len <= 24 {
        return if len <= 12 {
            if len <= 4 {
                hash32_len_0_to_4(s)
            } else {
                hash32_len_5_to_12(s)
            }
        } else {
            hash32_len_13_to_24(s)
        };
    }

    // len > 24
    let mut h = len as u32;
    let mut g = C1.wrapping_mul(len as u32);
    let mut f = g;
    let a0 = scramble(fetch32(s, len - 4));
    let a1 = scramble(fetch32(s, len - 8));
    let a2 = scramble(fetch32(s, len - 16));
    let a3 = scramble(fetch32(s, len - 12));
    let a4 = scramble(fetch32(s, len - 20));
    h ^= a0;
    h = step(h, 19);
    h ^= a2;
    h = step(h, 19);
    g ^= a1;
    g = step(g, 19);
    g ^= a3;
    g = step(g, 19);
    f = f.wrapping_add(a4);
    f = step(f, 19);

    // Each 20-byte block from the front; the last (len - 20) bytes were
    // already folded in above, so blocks may overlap them.
    let iters = (len - 1) / 20;
    for block in 0..iters {
        let i = block * 20;
        let a0 = scramble(fetch32(s, i));
        let a1 = fetch32(s, i + 4);
        let a2 = scramble(fetch32(s, i + 8));
        let a3 = scramble(fetch32(s, i + 12));
        let a4 = fetch32(s, i + 16);
        h ^= a0;
        h = step(h, 18);
        f = f.wrapping_add(a1);
        f = rotate32(f, 19);
        f = f.wrapping_mul(C1);
        g = g.wrapping_add(a2);
        g = step(g, 18);
        h ^= a3.wrapping_add(a1);
        h = step(h, 19);
        g ^= a4;
        g = g.swap_bytes().wrapping_mul(5);
        h = h.wrapping_add(a4.wrapping_mul(5));
        h = h.swap_bytes();
        f = f.wrapping_add(a0);

        // Permute (f, h, g) -> (g, f, h).
        (f, h, g) = (g, f, h);
    }

    g = rotate32(g, 11).wrapping_mul(C1);
    g = rotate32(g, 17).wrapping_mul(C1);
    f = rotate32(f, 11).wrapping_mul(C1);
    f = rotate32(f, 17).wrapping_mul(C1);
    h = step(h.wrapping_add(g), 19);
    h = rotate32(h, 17).wrapping_mul(C1);
    h = step(h.wrapping_add(f), 19);
    h = rotate32(h, 17).wrapping_mul(C1);
    h
}

fn hash32_len_0_to_4(s: &[u8]) -> u32 {
    let mut b: u32 = 0;
    let mut c: u32 = 9;
    for &byte in s {
        // Bytes are treated as signed, exactly as the reference does.
        let v = byte as i8 as u32;
        b = b.wrapping_mul(C1).wrapping_add(v);
        c ^= b;
    }
    fmix(mur(b, mur(s.len() as u32, c)))
}

fn hash32_len_5_to_12(s: &[u8]) -> u32 {
    let len = s.len();
    let mut a = len as u32;
    let mut b = (len as u32).wrapping_mul(5);
    let mut c: u32 = 9;
    let d = b;
    a = a.wrapping_add(fetch32(s, 0));
    b = b.wrapping_add(fetch32(s, len - 4));
    c = c.wrapping_add(fetch32(s, (len >> 1) & 4));
    fmix(mur(c, mur(b, mur(a, d))))
}

fn hash32_len_13_to_24(s: &[u8]) -> u32 {
    let len = s.len();
    let a = fetch32(s, (len >> 1) - 4);
    let b = fetch32(s, 4);
    let c = fetch32(s, len - 8);
    let d = fetch32(s, len >> 1);
    let e = fetch32(s, 0);
    let f = fetch32(s, len - 4);
    let h = len as u32;

    fmix(mur(f, mur(e, mur(d, mur(c, mur(b, mur(a, h)))))))
}

#[inline(always)]
fn scramble(k: u32) -> u32 {
    rotate32(k.wrapping_mul(C1), 17).wrapping_mul(C2)
}

#[inline(always)]
fn step(h: u32, r: u32) -> u32 {
    rotate32(h, r).wrapping_mul(5).wrapping_add(0xe6546b64)
}
