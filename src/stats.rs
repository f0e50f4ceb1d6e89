//! Avalanche and bit-independence statistics for the hash variants.
//!
//! For a fixed input length, each generated input is hashed, then re-hashed
//! once per input bit with that bit flipped.  Per (input bit, output bit)
//! pair we count how often the output bit flipped.  An ideal hash flips every
//! output bit with probability one half.

use std::{fmt, fs::File, path::Path};

use crate::{hashers::Hasher, inputs::Pattern};

pub struct Stats {
    pub input_bit_len: usize,
    pub output_bit_len: usize,

    // The number of samples accumulated.  Or put another way, the number of
    // rounds used to generate the chart.
    pub sample_count: usize,

    // `input_bit_len * output_bit_len` long.  Each element is a count of the
    // number of bit flips for a given in/out bit pairing.
    pub avalanche_chart: Vec<u32>,

    // For every input bit, the BIC quadrants for each ordered pair of
    // distinct output bits: [both flipped, neither, only first, only second].
    pub bic_chart: Vec<[u32; 4]>,
}

/// Min, average and max over a set of per-input-bit measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Spread {
    pub const ZERO: Spread = Spread {
        min: 0.0,
        avg: 0.0,
        max: 0.0,
    };

    fn of(values: impl Iterator<Item = f64>) -> Self {
        let mut spread = Spread {
            min: f64::INFINITY,
            avg: 0.0,
            max: f64::NEG_INFINITY,
        };
        let mut count = 0usize;
        for v in values {
            spread.min = spread.min.min(v);
            spread.max = spread.max.max(v);
            spread.avg += v;
            count += 1;
        }
        if count == 0 {
            return Spread::ZERO;
        }
        spread.avg /= count as f64;
        spread
    }
}

impl Stats {
    pub fn new(
        input_bit_len: usize,
        output_bit_len: usize,
        do_avalanche: bool,
        do_bic: bool,
    ) -> Self {
        Self {
            input_bit_len,
            output_bit_len,
            sample_count: 0,
            avalanche_chart: if do_avalanche {
                vec![0; input_bit_len * output_bit_len]
            } else {
                Vec::new()
            },
            bic_chart: if do_bic {
                vec![[0; 4]; input_bit_len * output_bit_len * output_bit_len.saturating_sub(1)]
            } else {
                Vec::new()
            },
        }
    }

    pub fn get(&self, in_bit: usize, out_bit: usize) -> u32 {
        self.avalanche_chart[in_bit * self.output_bit_len + out_bit]
    }

    pub fn get_row(&self, in_bit: usize) -> &[u32] {
        let start = in_bit * self.output_bit_len;
        &self.avalanche_chart[start..(start + self.output_bit_len)]
    }

    /// Scale from flip counts to probabilities.  Zero when nothing has been
    /// sampled yet.
    fn norm(&self) -> f64 {
        if self.sample_count == 0 {
            0.0
        } else {
            1.0 / self.sample_count as f64
        }
    }

    /// Bias of each in/out pairing, from 0 (flips half the time) to 1
    /// (always or never flips).
    fn biases(&self) -> impl Iterator<Item = f64> + '_ {
        let norm = self.norm();
        self.avalanche_chart
            .iter()
            .map(move |&flips| p_to_bias(flips as f64 * norm))
    }

    pub fn bias(&self) -> Spread {
        if self.sample_count == 0 {
            return Spread::ZERO;
        }
        Spread::of(self.biases())
    }

    /// How many output bits' worth of change one input bit causes.
    pub fn row_diffusion(&self, in_bit: usize) -> f64 {
        let norm = self.norm();
        self.get_row(in_bit)
            .iter()
            .map(|&flips| 1.0 - p_to_bias(flips as f64 * norm))
            .sum()
    }

    pub fn row_entropy(&self, in_bit: usize) -> f64 {
        let norm = self.norm();
        self.get_row(in_bit)
            .iter()
            .map(|&flips| p_to_entropy(flips as f64 * norm))
            .sum()
    }

    pub fn input_bit_diffusion(&self) -> Spread {
        if self.sample_count == 0 {
            return Spread::ZERO;
        }
        Spread::of((0..self.input_bit_len).map(|i| self.row_diffusion(i)))
    }

    pub fn input_bit_entropy(&self) -> Spread {
        if self.sample_count == 0 {
            return Spread::ZERO;
        }
        Spread::of((0..self.input_bit_len).map(|i| self.row_entropy(i)))
    }

    fn bic_row(&self, in_bit: usize) -> &[[u32; 4]] {
        let stride = self.output_bit_len * (self.output_bit_len - 1);
        let start = in_bit * stride;
        &self.bic_chart[start..(start + stride)]
    }

    /// The four BIC quadrants of one input bit, each sorted ascending and
    /// then averaged over every output bit pair.  Ideal is `[0.25; 4]`.
    pub fn row_bic_sorted_quadrants(&self, in_bit: usize) -> [f64; 4] {
        let bic = self.bic_row(in_bit);
        let mut sum = [0u64; 4];
        for mut quadrants in bic.iter().copied() {
            quadrants.sort_unstable();
            for (s, q) in sum.iter_mut().zip(quadrants) {
                *s += q as u64;
            }
        }
        let denom = (bic.len() * self.sample_count) as f64;
        if denom == 0.0 {
            return [0.0; 4];
        }
        sum.map(|s| s as f64 / denom)
    }

    pub fn avg_bic_sorted_quadrants(&self) -> [f64; 4] {
        let mut avg = [0.0; 4];
        for i in 0..self.input_bit_len {
            let row = self.row_bic_sorted_quadrants(i);
            for (a, r) in avg.iter_mut().zip(row) {
                *a += r;
            }
        }
        avg.map(|a| a / self.input_bit_len as f64)
    }

    /// The most lopsided quadrants seen for any single input bit.
    pub fn worst_bic_sorted_quadrants(&self) -> [f64; 4] {
        if self.sample_count == 0 {
            return [0.0; 4];
        }
        let mut worst = [f64::INFINITY, f64::INFINITY, f64::INFINITY, 0.0];
        for i in 0..self.input_bit_len {
            let n = self.row_bic_sorted_quadrants(i);
            worst[0] = worst[0].min(n[0]);
            worst[1] = worst[1].min(n[1]);
            worst[2] = worst[2].min(n[2]);
            worst[3] = worst[3].max(n[3]);
        }
        worst
    }

    pub fn write_avalanche_png<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut pixels = Vec::with_capacity(self.avalanche_chart.len() * 4);
        for flips in self.avalanche_chart.iter().copied() {
            let v = (flips as u64 * 255 / self.sample_count.max(1) as u64).min(255) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }

        png_encode_mini::write_rgba_from_u8(
            &mut File::create(path.as_ref())?,
            &pixels,
            self.output_bit_len as u32,
            self.input_bit_len as u32,
        )?;

        Ok(())
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.avalanche_chart.is_empty() {
            let bias = self.bias();
            let diffusion = self.input_bit_diffusion();
            let entropy = self.input_bit_entropy();
            writeln!(f, "    Bias:")?;
            writeln!(f, "        Min: {:0.2}", bias.min)?;
            writeln!(f, "        Avg: {:0.2}", bias.avg)?;
            writeln!(f, "        Max: {:0.2}", bias.max)?;
            writeln!(
                f,
                "    Input Bit Diffusion (digest size = {} bits):",
                self.output_bit_len
            )?;
            writeln!(f, "        Min: {:0.1} bits", diffusion.min)?;
            writeln!(f, "        Avg: {:0.1} bits", diffusion.avg)?;
            writeln!(f, "        Max: {:0.1} bits", diffusion.max)?;
            writeln!(f, "    Input Bit Diffusion Entropy:")?;
            writeln!(f, "        Min: {:0.1} bits", entropy.min)?;
            writeln!(f, "        Avg: {:0.1} bits", entropy.avg)?;
            writeln!(f, "        Max: {:0.1} bits", entropy.max)?;
        }

        if !self.bic_chart.is_empty() {
            let worst = self.worst_bic_sorted_quadrants();
            let avg = self.avg_bic_sorted_quadrants();
            writeln!(f, "    BIC quadrants (sorted):")?;
            writeln!(
                f,
                "        Wrst: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]",
                worst[0], worst[1], worst[2], worst[3]
            )?;
            writeln!(
                f,
                "         Avg: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]",
                avg[0], avg[1], avg[2], avg[3]
            )?;
        }

        Ok(())
    }
}

/// Gathers statistics for `hasher` over `input_len`-byte inputs drawn from
/// `pattern`.
///
/// `on_round` is called before each round with `(round, rounds)`, for
/// progress reporting.
pub fn compute_stats<F>(
    pattern: Pattern,
    hasher: &Hasher,
    input_len: usize,
    rounds: usize,
    do_avalanche: bool,
    do_bic: bool,
    mut on_round: F,
) -> Stats
where
    F: FnMut(usize, usize),
{
    let output_len = hasher.digest_size;
    let out_bits = output_len * 8;
    let mut stats = Stats::new(input_len * 8, out_bits, do_avalanche, do_bic);

    let mut input = vec![0u8; input_len];
    let mut output = vec![0u8; output_len];
    let mut input_tweaked = vec![0u8; input_len];
    let mut output_tweaked = vec![0u8; output_len];
    let mut flipped = vec![false; out_bits];

    for round in 0..rounds {
        on_round(round, rounds);

        pattern.fill(round, &mut input[..]);
        (hasher.hash)(&input[..], &mut output[..]);

        for in_bit_idx in 0..(input_len * 8) {
            input_tweaked.copy_from_slice(&input);
            input_tweaked[in_bit_idx / 8] ^= 1 << (in_bit_idx % 8);
            (hasher.hash)(&input_tweaked[..], &mut output_tweaked[..]);

            for (out_bit_idx, f) in flipped.iter_mut().enumerate() {
                let i = out_bit_idx / 8;
                let mask = 1 << (out_bit_idx % 8);
                *f = (output[i] & mask) != (output_tweaked[i] & mask);
            }

            if do_avalanche {
                let row = &mut stats.avalanche_chart
                    [(in_bit_idx * out_bits)..((in_bit_idx + 1) * out_bits)];
                for (count, &f) in row.iter_mut().zip(&flipped) {
                    *count += f as u32;
                }
            }

            // Bit independence criterion.
            if do_bic {
                let stride = out_bits * (out_bits - 1);
                for i in 0..out_bits {
                    for j in 0..(out_bits - 1) {
                        let i_b = (i + j + 1) % out_bits;
                        let (a, b) = (flipped[i], flipped[i_b]);
                        let quadrant = match (a, b) {
                            (true, true) => 0,
                            (false, false) => 1,
                            (true, false) => 2,
                            (false, true) => 3,
                        };
                        let k = (in_bit_idx * stride) + (i * (out_bits - 1)) + j;
                        stats.bic_chart[k][quadrant] += 1;
                    }
                }
            }
        }

        stats.sample_count += 1;
    }

    stats
}

pub fn p_to_bias(p: f64) -> f64 {
    (p * 2.0 - 1.0).abs()
}

pub fn p_to_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        0.0
    } else {
        let q = 1.0 - p;
        -(p * p.log2()) - (q * q.log2())
    }
}
