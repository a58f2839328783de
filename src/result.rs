//! Per-seat outcome accumulators.

use std::ops::AddAssign;

/// Largest table the engine accepts.
pub const MAX_SEATS: usize = 10;

/// `TIE_SPLIT[k]` is the pot share of each of `k` tied winners.
pub const TIE_SPLIT: [f64; MAX_SEATS + 1] = [
    0.0,
    1.0,
    0.5,
    0.333_333_333_333_333_3,
    0.25,
    0.2,
    0.166_666_666_666_666_66,
    0.142_857_142_857_142_85,
    0.125,
    0.111_111_111_111_111_11,
    0.1,
];

/// Outcome counts for one seat.
///
/// Over a run, `win + tie` summed across all seats equals the sample count:
/// every sample hands out exactly one pot.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct SeatResult {
    /// Samples won outright.
    pub win: u64,
    /// Fractional pot shares from split samples.
    pub tie: f64,
    /// Samples with no share of the pot.
    pub loss: u64,
    pub samples: u64,
}

impl SeatResult {
    pub fn new(samples: u64) -> Self {
        Self {
            samples,
            ..Self::default()
        }
    }

    /// Equity: outright wins plus tie credit, normalized to [0,1].
    pub fn pwin_tie(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        (self.win as f64 + self.tie) / self.samples as f64
    }

    pub fn pwin(&self) -> f64 {
        self.ratio(self.win)
    }

    pub fn ploss(&self) -> f64 {
        self.ratio(self.loss)
    }

    /// Samples ending in a split pot this seat took part in.
    pub fn split_samples(&self) -> u64 {
        self.samples.saturating_sub(self.win).saturating_sub(self.loss)
    }

    pub fn ptie(&self) -> f64 {
        self.ratio(self.split_samples())
    }

    fn ratio(&self, n: u64) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        n as f64 / self.samples as f64
    }

    pub fn merge(mut self, other: SeatResult) -> SeatResult {
        self += other;
        self
    }
}

impl AddAssign for SeatResult {
    fn add_assign(&mut self, rhs: SeatResult) {
        self.win += rhs.win;
        self.tie += rhs.tie;
        self.loss += rhs.loss;
        self.samples += rhs.samples;
    }
}

/// Credit one sample to the seats whose score equals the best score.
///
/// `winners` is scratch space and is cleared on entry.
#[inline]
pub(crate) fn settle(scores: &[u32], winners: &mut Vec<usize>, results: &mut [SeatResult]) {
    winners.clear();
    let best = scores.iter().copied().max().unwrap_or_default();
    for (seat, &s) in scores.iter().enumerate() {
        if s == best {
            winners.push(seat);
        } else {
            results[seat].loss += 1;
        }
    }
    match winners.as_slice() {
        [sole] => results[*sole].win += 1,
        split => {
            let share = TIE_SPLIT[split.len()];
            for &seat in split {
                results[seat].tie += share;
            }
        }
    }
}
