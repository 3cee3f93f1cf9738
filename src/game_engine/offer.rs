//! The banker: swap-or-cash decision and the buyout heuristic.
//!
//! The heuristic has no memory. Each offer is the average of the still-hidden
//! cash values scaled by a freshly drawn factor in `[0.60, 0.95]`.

use tracing::{debug, warn};

use crate::game_engine::{
    random::RandomSource,
    rules::{OFFER_FACTOR_MAX, OFFER_FACTOR_MIN, SWAP_PROBABILITY},
};

pub struct OfferEngine {
    rng: Box<dyn RandomSource>,
}

impl OfferEngine {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self { rng }
    }

    /// Independent 20% roll at every checkpoint.
    pub fn should_propose_swap(&mut self) -> bool {
        let swap = self.rng.chance(SWAP_PROBABILITY);
        debug!(swap, "swap roll");
        swap
    }

    /// `floor(average(remaining) * factor)`, or 0 when nothing is left.
    pub fn compute_offer(&mut self, remaining: &[u64]) -> u64 {
        if remaining.is_empty() {
            warn!("offer requested with no cash values remaining");
            return 0;
        }
        let factor = OFFER_FACTOR_MIN + self.rng.unit() * (OFFER_FACTOR_MAX - OFFER_FACTOR_MIN);
        let offer = scaled_average(remaining, factor);
        debug!(count = remaining.len(), factor, offer, "offer computed");
        offer
    }
}

/// Arithmetic mean of `values`; 0.0 for an empty slice.
pub fn average(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u64 = values.iter().sum();
    sum as f64 / values.len() as f64
}

/// `floor(average(values) * factor)`.
pub fn scaled_average(values: &[u64], factor: f64) -> u64 {
    (average(values) * factor).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_engine::random::{ScriptedRandom, SeededRandom};
    use proptest::prelude::*;

    fn scripted(units: &[f64]) -> OfferEngine {
        OfferEngine::new(Box::new(ScriptedRandom::new().with_units(units.iter().copied())))
    }

    #[test]
    fn empty_remaining_yields_zero() {
        let mut engine = scripted(&[]);
        assert_eq!(engine.compute_offer(&[]), 0);
    }

    #[test]
    fn factor_endpoints() {
        // unit 0 -> factor 0.60
        let mut low = scripted(&[0.0]);
        assert_eq!(low.compute_offer(&[100, 102]), 60);
        // unit 0.5 -> factor 0.775
        let mut mid = scripted(&[0.5]);
        assert_eq!(mid.compute_offer(&[100]), 77);
    }

    #[test]
    fn swap_roll_threshold() {
        let mut engine = scripted(&[0.0, 0.1999, 0.20, 0.9]);
        assert!(engine.should_propose_swap());
        assert!(engine.should_propose_swap());
        assert!(!engine.should_propose_swap());
        assert!(!engine.should_propose_swap());
    }

    #[test]
    fn swap_rate_is_roughly_one_in_five() {
        let mut engine = OfferEngine::new(Box::new(SeededRandom::seeded(2024)));
        let trials = 10_000;
        let hits = (0..trials).filter(|_| engine.should_propose_swap()).count();
        let rate = hits as f64 / trials as f64;
        assert!((0.17..0.23).contains(&rate), "swap rate {rate}");
    }

    #[test]
    fn average_of_values() {
        assert_eq!(average(&[]), 0.0);
        assert!((average(&[1, 2]) - 1.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn offer_stays_within_factor_band(
            values in prop::collection::vec(1u64..=1_000_000, 1..=26),
            seed in any::<u64>(),
        ) {
            let mut engine = OfferEngine::new(Box::new(SeededRandom::seeded(seed)));
            let offer = engine.compute_offer(&values);
            let avg = average(&values);
            prop_assert!(offer >= (avg * OFFER_FACTOR_MIN).floor() as u64);
            prop_assert!(offer <= (avg * OFFER_FACTOR_MAX).floor() as u64);

            let lo = *values.iter().min().unwrap();
            let hi = *values.iter().max().unwrap();
            prop_assert!(offer >= (lo as f64 * OFFER_FACTOR_MIN).floor() as u64);
            prop_assert!(offer <= (hi as f64 * OFFER_FACTOR_MAX).ceil() as u64);
        }
    }
}
