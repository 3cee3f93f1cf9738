//! Injectable randomness.
//!
//! Every randomized decision in the game goes through [`RandomSource`], so a
//! session can be replayed from a seed and tests can script exact draws.

use std::collections::VecDeque;

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// A stream of random draws.
pub trait RandomSource {
    /// Uniform draw from `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform draw from `0..bound`. Returns 0 when `bound <= 1`.
    fn index(&mut self, bound: usize) -> usize;

    /// Fair coin; `true` on heads.
    fn coin(&mut self) -> bool {
        self.index(2) == 0
    }

    /// Bernoulli trial succeeding with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

/// `StdRng`-backed source; reproducible when built from a seed.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl RandomSource for SeededRandom {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn index(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            0
        } else {
            self.rng.gen_range(0..bound)
        }
    }
}

/// Replays queued draws, then falls back to a fixed-seed stream.
///
/// `unit` and `index` draws are queued separately, so a script only needs to
/// pin the draws a test cares about. Scripted units are clamped into `[0, 1)`
/// and scripted indices are reduced modulo the requested bound, which keeps
/// every draw in range no matter what the script says.
pub struct ScriptedRandom {
    units: VecDeque<f64>,
    indices: VecDeque<usize>,
    fallback: SeededRandom,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self {
            units: VecDeque::new(),
            indices: VecDeque::new(),
            fallback: SeededRandom::seeded(0),
        }
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Draws still queued, as `(units, indices)`.
    pub fn queued(&self) -> (usize, usize) {
        (self.units.len(), self.indices.len())
    }
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f64 {
        match self.units.pop_front() {
            Some(u) if u.is_nan() => 0.0,
            Some(u) => u.clamp(0.0, 1.0 - f64::EPSILON),
            None => self.fallback.unit(),
        }
    }

    fn index(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            // Keep the script aligned even for degenerate bounds.
            self.indices.pop_front();
            return 0;
        }
        match self.indices.pop_front() {
            Some(i) => i % bound,
            None => self.fallback.index(bound),
        }
    }
}

/// One independent stream per component.
pub struct RandomSources {
    pub pool: Box<dyn RandomSource>,
    pub offer: Box<dyn RandomSource>,
    pub bonus: Box<dyn RandomSource>,
}

impl RandomSources {
    /// Derive the three component streams from a master generator.
    pub fn from_master<R: RngCore>(master: &mut R) -> Self {
        Self {
            pool: Box::new(SeededRandom::seeded(master.next_u64())),
            offer: Box::new(SeededRandom::seeded(master.next_u64())),
            bonus: Box::new(SeededRandom::seeded(master.next_u64())),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::from_master(&mut StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_master(&mut StdRng::from_entropy())
    }

    /// Assemble streams by hand, e.g. from [`ScriptedRandom`]s.
    pub fn custom(
        pool: impl RandomSource + 'static,
        offer: impl RandomSource + 'static,
        bonus: impl RandomSource + 'static,
    ) -> Self {
        Self {
            pool: Box::new(pool),
            offer: Box::new(offer),
            bonus: Box::new(bonus),
        }
    }
}
