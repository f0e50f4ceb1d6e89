//! CityHash v1.1: fast, non-cryptographic 32-, 64- and 128-bit fingerprints
//! of byte strings.
//!
//! Output is identical on every platform (all loads are little-endian) and
//! matches the published CityHash v1.1 test vectors bit for bit.  None of
//! these functions are suitable where an attacker controls the input and
//! collisions matter.
//!
//! Alongside the hash functions themselves the crate carries the tooling used
//! to study their mixing quality: a registry of the hash variants in
//! [`hashers`], avalanche/BIC statistics in [`stats`], and the input bit
//! patterns those statistics are gathered over in [`inputs`].

pub mod city128;
pub mod city32;
pub mod city64;
pub mod hashers;
pub mod inputs;
pub mod mix;
pub mod stats;
pub mod uint128;

pub use city128::{hash128, hash128_with_seed};
pub use city32::hash32;
pub use city64::{hash64, hash64_with_seed, hash64_with_seeds};
pub use mix::hash128_to_64;
pub use uint128::Uint128;

// Some primes between 2^63 and 2^64 for various uses.
pub const K0: u64 = 0xc3a5c85c97cb3127;
pub const K1: u64 = 0xb492b66fbe98f273;
pub const K2: u64 = 0x9ae16a3b2f90404f;

/// Multiplier of the 128-to-64-bit reduction (`hash128_to_64`).
pub const K_MUL: u64 = 0x9ddfea08eb382d69;

// Magic numbers for the 32-bit hashing, borrowed from Murmur3.
pub const C1: u32 = 0xcc9e2d51;
pub const C2: u32 = 0x1b873593;
