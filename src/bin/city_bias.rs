use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use city_hash::{hashers, inputs::Pattern, stats::compute_stats};

/// Measures avalanche and bit independence of the CityHash variants at a set
/// of input lengths.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Only run hash variants whose name contains one of these
    /// (case-insensitive).
    #[arg(value_name = "NAME")]
    filters: Vec<String>,

    /// Input lengths to test, in bytes.  The defaults land in each length
    /// branch of the 32-, 64- and 128-bit engines.
    #[arg(
        short = 'l',
        long,
        value_delimiter = ',',
        default_value = "4,12,24,32,64,128,256"
    )]
    lengths: Vec<usize>,

    /// Rounds per input pattern (the single-bit pattern always runs one
    /// round per input bit).
    #[arg(short = 'r', long, default_value = "4096")]
    rounds: NonZeroUsize,

    /// Also gather bit-independence statistics.  Memory grows with
    /// input bits times output bits squared.
    #[arg(long)]
    bic: bool,

    /// Directory to write avalanche chart PNGs into.
    #[arg(long, default_value = ".")]
    png_dir: PathBuf,

    /// Don't write avalanche chart PNGs.
    #[arg(long)]
    no_png: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.bic && args.lengths.iter().any(|&len| len > 64) {
        warn!("BIC over inputs longer than 64 bytes needs a lot of memory");
    }
    if !args.no_png {
        std::fs::create_dir_all(&args.png_dir)
            .with_context(|| format!("creating {}", args.png_dir.display()))?;
    }

    let mut matched = 0;
    for hasher in hashers::matching(&args.filters[..]) {
        matched += 1;
        for &input_len in &args.lengths {
            if input_len == 0 {
                warn!("skipping zero-length input: there are no bits to flip");
                continue;
            }

            println!("\n================================");
            println!("{}, {}-byte input", hasher.name, input_len);
            for pattern in Pattern::ALL {
                let rounds = pattern.rounds(input_len, args.rounds.get());
                info!(
                    hasher = hasher.name,
                    input_len,
                    pattern = %pattern.name(),
                    rounds,
                    "gathering statistics"
                );

                let stats = compute_stats(
                    *pattern,
                    hasher,
                    input_len,
                    rounds,
                    true,
                    args.bic,
                    |round, rounds| {
                        if round % 256 == 0 {
                            debug!(round, rounds, "progress");
                        }
                    },
                );

                println!("\nInput bit pattern: {}", pattern.name());
                print!("{}", stats);

                if !args.no_png {
                    let path = args.png_dir.join(format!(
                        "{} - {} bytes - {}.png",
                        hasher.name,
                        input_len,
                        pattern.name()
                    ));
                    stats
                        .write_avalanche_png(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    debug!(path = %path.display(), "wrote avalanche chart");
                }
            }
        }
    }

    if matched == 0 {
        warn!(filters = ?args.filters, "no hash variant matched");
    }

    Ok(())
}
