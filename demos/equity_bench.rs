//! Benchmark equity calculations across ranges, board states and table sizes.
//!
//! Usage:
//!   cargo run --release --example equity_bench
//!   cargo run --release --features parallel --example equity_bench
//!
//! This measures:
//! - Heads-up equity for known hands (preflop, flop, turn, river)
//! - Hand lists and random ranges
//! - Hero vs N random opponents
//! - Sample-count scaling

use std::time::Instant;

use range_equity::{parse_cards, EquityCalculator, HandList, RandomHand, SingleHand};

fn format_duration(nanos: u128) -> String {
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.1} μs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.3} s", nanos as f64 / 1_000_000_000.0)
    }
}

fn bench<F>(name: &str, iterations: u64, mut f: F)
where
    F: FnMut() -> f64,
{
    // Warmup
    for _ in 0..3 {
        f();
    }

    let start = Instant::now();
    let mut equity = 0.0;
    for _ in 0..iterations {
        equity = f();
    }
    let duration = start.elapsed();

    let per_iter_ns = duration.as_nanos() / iterations as u128;
    let per_sec = (iterations as f64) / duration.as_secs_f64();

    println!(
        "{:46} {:>12}  ({:>8.0} /s)  hero {:.3}",
        name,
        format_duration(per_iter_ns),
        per_sec,
        equity
    );
}

fn main() {
    env_logger::init();

    println!("=== Equity Calculator Benchmarks ===\n");
    println!("{:46} {:>12}  {:>11}", "Scenario", "Time/Iter", "Throughput");
    println!("{:-<86}", "");

    let mut calc = EquityCalculator::new(42);

    let aces: SingleHand = "AsAh".parse().expect("valid hand");
    let kings: SingleHand = "KsKh".parse().expect("valid hand");
    let queens: SingleHand = "QsQh".parse().expect("valid hand");
    let broadway: HandList = "AcKd AcQd KcQd AdKc".parse().expect("valid hands");
    let random = RandomHand::default();

    let flop = parse_cards("KcQd2h").expect("valid board");
    let turn = parse_cards("KcQd2h3s").expect("valid board");
    let river = parse_cards("KcQd2h3s4c").expect("valid board");

    println!("\n--- Heads-Up, Known Hands (10k samples) ---");

    for (label, board) in [
        ("HU AA vs KK: Preflop", &flop[..0]),
        ("HU AA vs KK: Flop", &flop[..]),
        ("HU AA vs KK: Turn", &turn[..]),
        ("HU AA vs KK: River", &river[..]),
    ] {
        bench(label, 50, || {
            calc.evaluate(&[&aces, &kings], board, &[], 10_000)
                .expect("disjoint hands")[0]
                .pwin_tie()
        });
    }

    println!("\n--- Ranges (10k samples) ---");

    bench("AA vs broadway list: Flop", 50, || {
        calc.evaluate(&[&aces, &broadway], &flop, &[], 10_000)
            .expect("list has live hands")[0]
            .pwin_tie()
    });

    bench("AA vs random: Preflop", 50, || {
        calc.evaluate(&[&aces, &random], &[], &[], 10_000)
            .expect("random range always deals")[0]
            .pwin_tie()
    });

    bench("AA vs KK vs QQ: Flop", 50, || {
        calc.evaluate(&[&aces, &kings, &queens], &flop, &[], 10_000)
            .expect("disjoint hands")[0]
            .pwin_tie()
    });

    println!("\n--- Hero vs N Random Opponents (10k samples) ---");

    for opponents in [1usize, 2, 5, 8] {
        bench(&format!("AA vs {opponents} random: Preflop"), 20, || {
            calc.evaluate_vs_random(&aces, opponents, &[], &[], 10_000)
                .expect("random ranges always deal")[0]
                .pwin_tie()
        });
    }

    println!("\n--- Sample Scaling (Preflop HU) ---");

    for (label, samples, iterations) in [
        ("1k samples", 1_000u64, 500u64),
        ("10k samples", 10_000, 50),
        ("100k samples", 100_000, 5),
        ("1M samples", 1_000_000, 1),
    ] {
        bench(label, iterations, || {
            calc.evaluate(&[&aces, &kings], &[], &[], samples)
                .expect("disjoint hands")[0]
                .pwin_tie()
        });
    }

    #[cfg(feature = "parallel")]
    {
        println!("\n--- Parallel Shards (1M samples, Preflop HU) ---");
        for shards in [1usize, 4, 16, 64] {
            bench(&format!("{shards} shards"), 3, || {
                calc.evaluate_par(&[&aces, &kings], &[], &[], 1_000_000, shards)
                    .expect("disjoint hands")[0]
                    .pwin_tie()
            });
        }
    }

    println!("\n{:-<86}", "");
    println!("\nStandard error of an equity estimate near 0.5 is about 0.5/sqrt(samples):");
    println!("  • 10k samples:  ±0.005");
    println!("  • 100k samples: ±0.0016");
    println!("  • 1M samples:   ±0.0005");
    println!();
}
