//! Analyze compression across posting-list densities.
//!
//! Sweeps the density n/u over powers of two and reports how far the
//! achieved size sits from the low_bits + 2 bits-per-id expectation, to help
//! judge where the split between the low and high streams pays off.

use clap::Parser;
use gapfano::{encode_to_vec, Layout};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(name = "gf-analyze")]
#[command(about = "Report gapfano compression across densities")]
struct Args {
    /// Number of ids per generated list
    #[arg(short, long, default_value = "100000")]
    count: usize,

    /// Densest universe multiplier to start from (universe = count * multiplier)
    #[arg(long, default_value = "1")]
    from: u32,

    /// Sparsest universe multiplier to end at
    #[arg(long, default_value = "16384")]
    to: u32,

    /// RNG seed for reproducible runs
    #[arg(long, default_value = "42")]
    seed: u64,
}

fn main() {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    println!(
        "{:>10} {:>12} {:>4} {:>10} {:>10} {:>10}",
        "universe", "n", "L", "bits/id", "L+2", "overhead%"
    );

    let mut multiplier = args.from.max(1);
    while multiplier <= args.to {
        let universe = (args.count as u64)
            .saturating_mul(u64::from(multiplier))
            .min(u64::from(u32::MAX)) as u32;
        let mut ids: Vec<u32> = (0..args.count * 2)
            .map(|_| rng.gen_range(1..=universe))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.truncate(args.count);

        let bytes = match encode_to_vec(&ids) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("encode failed at universe {universe}: {e}");
                return;
            }
        };

        let layout = Layout::new(ids.len() as u32, ids[ids.len() - 1]);
        let bits_per_id = bytes.len() as f64 * 8.0 / ids.len() as f64;
        let expected = f64::from(layout.low_bits) + 2.0;
        let overhead = (bits_per_id / expected - 1.0) * 100.0;
        println!(
            "{:>10} {:>12} {:>4} {:>10.3} {:>10.1} {:>10.2}",
            universe,
            ids.len(),
            layout.low_bits,
            bits_per_id,
            expected,
            overhead
        );

        multiplier = multiplier.saturating_mul(4);
    }
}
