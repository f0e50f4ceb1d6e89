//! Every public hash variant behind one signature, for the statistics
//! tooling.
//!
//! Each entry hashes its whole input and writes the digest little-endian
//! into the output buffer, which must be exactly `digest_size` bytes.
//! Seeded variants use the same fixed seeds as the reference test table.

use crate::{
    hash128, hash128_with_seed, hash32, hash64, hash64_with_seed, hash64_with_seeds, Uint128, K0,
};

pub const SEED0: u64 = 1234567;
pub const SEED1: u64 = K0;

pub struct Hasher<'a> {
    pub name: &'a str,
    pub hash: &'a dyn Fn(&[u8], &mut [u8]),
    pub digest_size: usize, // In bytes.
}

pub const HASHERS: &[Hasher] = &[
    Hasher {
        name: "CityHash32",
        hash: &city_hash32,
        digest_size: 32 / 8,
    },
    Hasher {
        name: "CityHash64",
        hash: &city_hash64,
        digest_size: 64 / 8,
    },
    Hasher {
        name: "CityHash64WithSeed",
        hash: &city_hash64_with_seed,
        digest_size: 64 / 8,
    },
    Hasher {
        name: "CityHash64WithSeeds",
        hash: &city_hash64_with_seeds,
        digest_size: 64 / 8,
    },
    Hasher {
        name: "CityHash128",
        hash: &city_hash128,
        digest_size: 128 / 8,
    },
    Hasher {
        name: "CityHash128WithSeed",
        hash: &city_hash128_with_seed,
        digest_size: 128 / 8,
    },
];

fn city_hash32(bytes: &[u8], out: &mut [u8]) {
    out.copy_from_slice(&hash32(bytes).to_le_bytes());
}

fn city_hash64(bytes: &[u8], out: &mut [u8]) {
    out.copy_from_slice(&hash64(bytes).to_le_bytes());
}

fn city_hash64_with_seed(bytes: &[u8], out: &mut [u8]) {
    out.copy_from_slice(&hash64_with_seed(bytes, SEED0).to_le_bytes());
}

fn city_hash64_with_seeds(bytes: &[u8], out: &mut [u8]) {
    out.copy_from_slice(&hash64_with_seeds(bytes, SEED0, SEED1).to_le_bytes());
}

fn city_hash128(bytes: &[u8], out: &mut [u8]) {
    out.copy_from_slice(&hash128(bytes).to_le_bytes());
}

fn city_hash128_with_seed(bytes: &[u8], out: &mut [u8]) {
    out.copy_from_slice(&hash128_with_seed(bytes, Uint128::new(SEED0, SEED1)).to_le_bytes());
}

/// Finds hashers whose lower-cased name contains any of `filters`, or all of
/// them when `filters` is empty.
pub fn matching<'a, S: AsRef<str>>(
    filters: &'a [S],
) -> impl Iterator<Item = &'static Hasher<'static>> + 'a {
    HASHERS.iter().filter(move |hasher| {
        if filters.is_empty() {
            return true;
        }
        let lower_name = hasher.name.to_lowercase();
        filters
            .iter()
            .any(|filter| lower_name.contains(&filter.as_ref().to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digests_match_the_direct_calls() {
        let input = b"The quick brown fox jumps over the lazy dog";
        let seed128 = Uint128::new(SEED0, SEED1);
        let expected: [(&str, Vec<u8>); 6] = [
            ("CityHash32", hash32(input).to_le_bytes().to_vec()),
            ("CityHash64", hash64(input).to_le_bytes().to_vec()),
            (
                "CityHash64WithSeed",
                hash64_with_seed(input, 1234567).to_le_bytes().to_vec(),
            ),
            (
                "CityHash64WithSeeds",
                hash64_with_seeds(input, 1234567, K0).to_le_bytes().to_vec(),
            ),
            ("CityHash128", hash128(input).to_le_bytes().to_vec()),
            (
                "CityHash128WithSeed",
                hash128_with_seed(input, seed128).to_le_bytes().to_vec(),
            ),
        ];

        assert_eq!(HASHERS.len(), expected.len());
        for (hasher, (name, digest)) in HASHERS.iter().zip(&expected) {
            assert_eq!(hasher.name, *name);
            assert_eq!(hasher.digest_size, digest.len(), "{}", name);
            let mut out = vec![0u8; hasher.digest_size];
            (hasher.hash)(&input[..], &mut out[..]);
            assert_eq!(&out, digest, "{}", name);
        }

        // Seeded variants really use their seeds.
        let mut unseeded = [0u8; 8];
        let mut seeded = [0u8; 8];
        (HASHERS[1].hash)(&input[..], &mut unseeded[..]);
        (HASHERS[2].hash)(&input[..], &mut seeded[..]);
        assert_ne!(unseeded, seeded);
    }

    #[test]
    fn name_filters_are_case_insensitive() {
        let names: Vec<_> = matching(&["HASH128"][..]).map(|h| h.name).collect();
        assert_eq!(names, ["CityHash128", "CityHash128WithSeed"]);

        let all: Vec<&str> = Vec::new();
        assert_eq!(matching(&all[..]).count(), HASHERS.len());

        assert_eq!(matching(&["seeds"][..]).count(), 1);
    }
}
