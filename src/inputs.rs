//! Deterministic input bit patterns to gather hash statistics over.
//!
//! Every pattern fills a buffer from a round index alone, so any run can be
//! reproduced exactly.

use nanorand::{Rng, WyRand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Uniformly random bytes.
    Random,
    /// The round index, little-endian, in the lowest bytes; zeros elsewhere.
    Counting,
    /// Like `Counting`, but stepping through gray codes.
    GrayCode,
    /// All combinations of zero set bits, then one, then two, and so on,
    /// starting `skip` combinations in.
    BitCombinations { skip: usize },
    /// Roughly `n` random bits set, everything else zero.
    RandomBits(usize),
    /// Exactly one set bit, walking from the lowest bit upward.
    SingleBit,
}

impl Pattern {
    pub const ALL: &'static [Pattern] = &[
        Pattern::Random,
        Pattern::Counting,
        Pattern::GrayCode,
        Pattern::BitCombinations { skip: 0 },
        // For 8-byte inputs, starts at the first combination with 8 set bits.
        Pattern::BitCombinations {
            skip: 704_494_193,
        },
        Pattern::RandomBits(8),
        Pattern::SingleBit,
    ];

    pub fn name(&self) -> String {
        match self {
            Pattern::Random => "random".into(),
            Pattern::Counting => "counting".into(),
            Pattern::GrayCode => "gray code".into(),
            Pattern::BitCombinations { skip: 0 } => "bit combinations".into(),
            Pattern::BitCombinations { skip } => format!("bit combinations from #{}", skip),
            Pattern::RandomBits(n) => format!("{} random bits", n),
            Pattern::SingleBit => "single-bit".into(),
        }
    }

    /// How many rounds to run this pattern for over `input_len` bytes, given
    /// the requested default.  `SingleBit` only has `input_len * 8` distinct
    /// inputs, so it runs exactly that many.
    pub fn rounds(&self, input_len: usize, default_rounds: usize) -> usize {
        match self {
            Pattern::SingleBit => input_len * 8,
            _ => default_rounds,
        }
    }

    /// Fills `bytes` with input number `index` of this pattern.
    pub fn fill(&self, index: usize, bytes: &mut [u8]) {
        match *self {
            Pattern::Random => {
                let mut rng = WyRand::new_seed(mix64(index as u64));
                rng.fill_bytes(bytes);
            }
            Pattern::Counting => write_low_word(index as u64, bytes),
            Pattern::GrayCode => write_low_word((index ^ (index >> 1)) as u64, bytes),
            Pattern::BitCombinations { skip } => bit_combination(index + skip, bytes),
            Pattern::RandomBits(n) => random_bits(index, n, bytes),
            Pattern::SingleBit => {
                bytes.fill(0);
                if !bytes.is_empty() {
                    let bit_idx = index % (bytes.len() * 8);
                    bytes[bit_idx / 8] = 1 << (bit_idx % 8);
                }
            }
        }
    }
}

fn write_low_word(n: u64, bytes: &mut [u8]) {
    let word = n.to_le_bytes();
    let split = bytes.len().min(word.len());
    bytes[..split].copy_from_slice(&word[..split]);
    bytes[split..].fill(0);
}

fn random_bits(index: usize, n: usize, bytes: &mut [u8]) {
    bytes.fill(0);
    if bytes.is_empty() {
        return;
    }
    let mut rng = WyRand::new_seed(mix64(index as u64 ^ mix64(n as u64)));
    for _ in 0..n {
        let bit = rng.generate_range(0..(bytes.len() * 8));
        bytes[bit / 8] |= 1 << (bit % 8);
    }
}

/// Writes combination number `index` in the sequence: no bits set, then every
/// single bit, then every pair of bits, and so on.
fn bit_combination(index: usize, bytes: &mut [u8]) {
    let bit_len = bytes.len() * 8;
    bytes.fill(0);
    if bit_len == 0 {
        return;
    }

    // Wrap around once every combination has been produced.
    let mut n = if bit_len < usize::BITS as usize {
        index % (1 << bit_len)
    } else {
        index
    };

    // Find how many bits are set, and the index within that group.
    let mut bits = 0;
    let mut combos = binomial(bit_len, bits);
    while n >= combos {
        n -= combos;
        bits += 1;
        combos = binomial(bit_len, bits);
    }

    // Unrank the combination, highest bit first.
    let mut t = bit_len;
    while t > 0 && bits > 0 {
        let y = if t > bits { binomial(t - 1, bits) } else { 0 };
        if n >= y {
            bytes[(t - 1) / 8] |= 1 << ((t - 1) % 8);
            n -= y;
            bits -= 1;
        }
        t -= 1;
    }
}

/// `n choose k`, saturating at `usize::MAX`.
fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}

/// 64-bit bijective bit mixer, used to decorrelate consecutive round indices
/// before they seed the RNG.
fn mix64(mut n: u64) -> u64 {
    // Break zero sensitivity.
    n ^= 0x7be355f7c2e736d2;

    // http://zimbry.blogspot.ch/2011/09/better-bit-mixing-improving-on.html
    // (variant "Mix13")
    n ^= n >> 30;
    n = n.wrapping_mul(0xbf58476d1ce4e5b9);
    n ^= n >> 27;
    n = n.wrapping_mul(0x94d049bb133111eb);
    n ^= n >> 31;

    n
}
