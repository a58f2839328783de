//! Release-mode throughput of the pieces one equity sample is made of.
//!
//! Modes:
//!   deal   N [chunk] : deal one random hand and a full runout per iteration
//!   score  N [chunk] : pre-deal seven-card combinations, time the oracle only
//!   sample N         : deal + score, streaming (what the engine does per seat)
//!
//! Parallel mode (requires --features parallel):
//!   samplepar N      : `sample` split across rayon workers, one stream each
//!
//! Examples:
//!   cargo run --release --example perf -- deal 10000000
//!   cargo run --release --example perf -- score 20000000 2000000
//!   cargo run --release --features parallel --example perf -- samplepar 100000000

use std::hint::black_box;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use range_equity::sampler::complete_board;
use range_equity::{CardSet, Combination, HandEvaluator, RandomHand, RangeProvider, RankOracle};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const ATTEMPTS: u32 = 64;

/// One random hand plus a complete random board.
#[inline(always)]
fn deal_seven(rng: &mut ChaCha8Rng, seat: &RandomHand) -> Combination {
    let mut deck = CardSet::full();
    let mut board = Combination::EMPTY;
    let hand = seat
        .get_hand(&mut *rng, &mut deck, ATTEMPTS)
        .expect("full deck always seats one hand");
    complete_board(&mut *rng, &mut board, &mut deck).expect("full deck covers a runout");
    hand.combination() | board
}

fn report_rate(label: &str, n: u64, dt_secs: f64) {
    let n_f = n as f64;
    println!("{label:20}: {:6.0} ns/op   ({:>12} iterations)", dt_secs * 1e9 / n_f, n);
    println!("{label:20}: {:>10.3} ms      {:>12.0} /s", dt_secs * 1e3, n_f / dt_secs);
}

fn chunk_loop(mut n: u64, chunk: u64, mut f: impl FnMut(u64)) {
    while n > 0 {
        let c = n.min(chunk);
        f(c);
        n -= c;
    }
}

fn bench_deal(n: u64, chunk: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(0x1234_5678_9ABC_DEF0);
    let seat = RandomHand::default();
    let start = Instant::now();

    let mut acc = 0u64;
    chunk_loop(n, chunk, |c| {
        for _ in 0..c {
            acc = acc.wrapping_add(deal_seven(&mut rng, &seat).bits());
        }
    });

    black_box(acc);
    report_rate("Deal7", n, start.elapsed().as_secs_f64());
}

fn bench_score(n: u64, chunk: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(0x1111_2222_3333_4444);
    let seat = RandomHand::default();
    let oracle = HandEvaluator;

    let mut acc = 0u32;
    let mut deal_time = 0.0f64;
    let mut score_time = 0.0f64;

    chunk_loop(n, chunk, |c| {
        let t0 = Instant::now();
        let combos: Vec<Combination> = (0..c).map(|_| deal_seven(&mut rng, &seat)).collect();
        deal_time += t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        for &combo in &combos {
            acc = acc.wrapping_add(oracle.score(combo));
        }
        score_time += t1.elapsed().as_secs_f64();
    });

    black_box(acc);
    println!("Deal7 (untimed)     : {:>10.3} ms", deal_time * 1e3);
    report_rate("ScoreOnly7", n, score_time);
}

fn bench_sample(n: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(0xDEAD_BEEF);
    let seat = RandomHand::default();
    let oracle = HandEvaluator;
    let start = Instant::now();

    let mut acc = 0u32;
    for _ in 0..n {
        acc = acc.wrapping_add(oracle.score(deal_seven(&mut rng, &seat)));
    }

    black_box(acc);
    report_rate("Sample7", n, start.elapsed().as_secs_f64());
}

#[cfg(feature = "parallel")]
fn bench_sample_par(n: u64) {
    let threads = rayon::current_num_threads() as u64;
    let start = Instant::now();

    let acc = (0..threads)
        .into_par_iter()
        .map(|t| {
            let mut rng = ChaCha8Rng::seed_from_u64(0xDEAD_BEEF ^ t);
            let seat = RandomHand::default();
            let share = n / threads + u64::from(t < n % threads);
            let mut acc = 0u32;
            for _ in 0..share {
                acc = acc.wrapping_add(HandEvaluator.score(deal_seven(&mut rng, &seat)));
            }
            acc
        })
        .reduce(|| 0u32, u32::wrapping_add);

    black_box(acc);
    report_rate(&format!("Sample7 x{threads}"), n, start.elapsed().as_secs_f64());
}

fn usage() -> ! {
    eprintln!("usage: perf <deal|score|sample|samplepar> N [chunk]");
    std::process::exit(2);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = args.first().map(String::as_str).unwrap_or_else(|| usage());
    let n: u64 = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| usage());
    let chunk: u64 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2_000_000)
        .max(1);

    match mode {
        "deal" => bench_deal(n, chunk),
        "score" => bench_score(n, chunk),
        "sample" => bench_sample(n),
        #[cfg(feature = "parallel")]
        "samplepar" => bench_sample_par(n),
        #[cfg(not(feature = "parallel"))]
        "samplepar" => {
            eprintln!("samplepar needs --features parallel");
            std::process::exit(2);
        }
        _ => usage(),
    }
}
