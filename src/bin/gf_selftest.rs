//! Round-trip self-test over geometric progressions of posting-list sizes.
//!
//! For each n in 10, 10*factor, ... up to --max-n, draws n ids without
//! replacement from [1, universe], encodes, decodes, and verifies equality.
//! Reports the achieved bits per id against the low_bits + 2 expectation.

use clap::Parser;
use gapfano::{decode, encode, max_encoded_len, Layout};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "gf-selftest")]
#[command(about = "Verify gapfano round-trips across a sweep of list sizes")]
struct Args {
    /// Largest list size to test (sizes grow geometrically from 10)
    #[arg(long, default_value = "10000000")]
    max_n: u64,

    /// Universe upper bound for drawn ids
    #[arg(long, default_value = "1000000000")]
    universe: u32,

    /// Geometric growth factor between test sizes
    #[arg(long, default_value = "10")]
    factor: u64,

    /// RNG seed for reproducible runs
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// Draw a sorted duplicate-free sample of about `count` ids from `[1, universe]`
fn sample_ids(rng: &mut StdRng, count: u64, universe: u32) -> Vec<u32> {
    let mut ids: Vec<u32> = (0..count).map(|_| rng.gen_range(1..=universe)).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    println!(
        "{:>12} {:>4} {:>14} {:>10} {:>10} {:>9}",
        "n", "L", "bytes", "bits/id", "raw ratio", "ms"
    );

    let mut n = 10u64;
    while n <= args.max_n {
        let ids = sample_ids(&mut rng, n, args.universe);
        let started = Instant::now();

        let mut bytes = vec![0u8; max_encoded_len(ids.len())];
        let used = match encode(&ids, &mut bytes) {
            Ok(used) => used,
            Err(e) => {
                eprintln!("encode failed for n={}: {e}", ids.len());
                return ExitCode::FAILURE;
            }
        };

        let mut dst = vec![0u32; ids.len()];
        match decode(&bytes[..used], &mut dst) {
            Ok(count) if dst[..count] == ids[..] => {}
            Ok(count) => {
                eprintln!("round-trip mismatch for n={}: {count} ids decoded", ids.len());
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("decode failed for n={}: {e}", ids.len());
                return ExitCode::FAILURE;
            }
        }

        let elapsed = started.elapsed().as_secs_f64() * 1000.0;
        let layout = Layout::new(ids.len() as u32, ids[ids.len() - 1]);
        let bits_per_id = used as f64 * 8.0 / ids.len() as f64;
        let raw_ratio = (ids.len() * 4) as f64 / used as f64;
        println!(
            "{:>12} {:>4} {:>14} {:>10.2} {:>10.2} {:>9.1}",
            ids.len(),
            layout.low_bits,
            used,
            bits_per_id,
            raw_ratio,
            elapsed
        );

        n = n.saturating_mul(args.factor);
    }

    println!("all round-trips verified");
    ExitCode::SUCCESS
}
