//! Engine settings.

/// Attempts a range gets to find a hand that avoids cards already dealt.
pub const DEFAULT_HAND_ATTEMPTS: u32 = 64;

pub const DEFAULT_SEED: u64 = 0x5EED;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// Seed of the engine's random stream. The stream is the only source of
    /// nondeterminism, so the same seed and call sequence replay exactly.
    pub seed: u64,
    pub hand_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            hand_attempts: DEFAULT_HAND_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Zero is bumped to one: every range gets at least one try.
    pub fn with_hand_attempts(mut self, attempts: u32) -> Self {
        self.hand_attempts = attempts.max(1);
        self
    }
}
