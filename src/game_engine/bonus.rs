//! One-shot offer modifiers.
//!
//! At session start each bonus type is independently made eligible with a
//! coin flip. The first checkpoint whose 30% trigger roll succeeds runs the
//! bonus round: the player picks one multiplier candidate and/or one additive
//! candidate, and the picks sit pending until the next cash offer, which
//! consumes them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game_engine::{
    models::{BonusKind, BonusOption},
    random::RandomSource,
    rules::{
        ADDITIVE_OPTION_COUNT, ADDITIVE_STEP, ADDITIVE_STEPS, BONUS_ELIGIBILITY_PROBABILITY,
        BONUS_TRIGGER_PROBABILITY, MULTIPLIER_FACTOR_MAX, MULTIPLIER_FACTOR_MIN,
        MULTIPLIER_OPTION_COUNT,
    },
};

/// An exact rational scale factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplier {
    #[default]
    Identity,
    Times(u32),
    DividedBy(u32),
}

impl Multiplier {
    /// `floor(offer * self)`.
    pub fn apply(self, offer: u64) -> u64 {
        match self {
            Multiplier::Identity => offer,
            Multiplier::Times(q) => offer.saturating_mul(u64::from(q)),
            Multiplier::DividedBy(q) => offer / u64::from(q.max(1)),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Multiplier::Identity => 1.0,
            Multiplier::Times(q) => f64::from(q),
            Multiplier::DividedBy(q) => 1.0 / f64::from(q.max(1)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusState {
    pub multiplier_eligible: bool,
    pub additive_eligible: bool,
    pub multiplier_consumed: bool,
    pub additive_consumed: bool,
    /// The bonus round has run this session.
    pub checkpoint_consumed: bool,
    pub pending_multiplier: Multiplier,
    pub pending_additive: i64,
}

pub struct BonusEngine {
    rng: Box<dyn RandomSource>,
    state: BonusState,
}

impl BonusEngine {
    /// Flip the two eligibility coins for a new session.
    pub fn new(mut rng: Box<dyn RandomSource>) -> Self {
        let multiplier_eligible = rng.chance(BONUS_ELIGIBILITY_PROBABILITY);
        let additive_eligible = rng.chance(BONUS_ELIGIBILITY_PROBABILITY);
        debug!(multiplier_eligible, additive_eligible, "bonus eligibility drawn");
        Self {
            rng,
            state: BonusState { multiplier_eligible, additive_eligible, ..BonusState::default() },
        }
    }

    pub fn state(&self) -> &BonusState {
        &self.state
    }

    pub fn has_multiplier(&self) -> bool {
        self.state.multiplier_eligible && !self.state.multiplier_consumed
    }

    pub fn has_additive(&self) -> bool {
        self.state.additive_eligible && !self.state.additive_consumed
    }

    /// Roll the 30% trigger, at most once successfully per session.
    pub fn maybe_trigger(&mut self) -> bool {
        if self.state.checkpoint_consumed {
            return false;
        }
        let fired = self.rng.chance(BONUS_TRIGGER_PROBABILITY);
        if fired {
            self.state.checkpoint_consumed = true;
        }
        debug!(fired, "bonus trigger roll");
        fired
    }

    /// The next bonus type the player should choose, multiplier first.
    pub fn next_choice(&self) -> Option<BonusKind> {
        if self.has_multiplier() {
            Some(BonusKind::Multiplier)
        } else if self.has_additive() {
            Some(BonusKind::Additive)
        } else {
            None
        }
    }

    pub fn options_for(&mut self, kind: BonusKind) -> Vec<BonusOption> {
        match kind {
            BonusKind::Multiplier => self.multiplier_options(),
            BonusKind::Additive => self.additive_options(),
        }
    }

    /// Five candidates, each `×q` or `÷q` with `q` in 2..=5.
    pub fn multiplier_options(&mut self) -> Vec<BonusOption> {
        let span = (MULTIPLIER_FACTOR_MAX - MULTIPLIER_FACTOR_MIN + 1) as usize;
        (0..MULTIPLIER_OPTION_COUNT)
            .map(|_| {
                let q = MULTIPLIER_FACTOR_MIN + self.rng.index(span) as u32;
                if self.rng.coin() {
                    BonusOption::Multiply(q)
                } else {
                    BonusOption::Divide(q)
                }
            })
            .collect()
    }

    /// Ten candidates, each `±v` with `v` in 100..=2000 step 100.
    pub fn additive_options(&mut self) -> Vec<BonusOption> {
        (0..ADDITIVE_OPTION_COUNT)
            .map(|_| {
                let v = (self.rng.index(ADDITIVE_STEPS) as i64 + 1) * ADDITIVE_STEP;
                if self.rng.coin() {
                    BonusOption::Add(v)
                } else {
                    BonusOption::Add(-v)
                }
            })
            .collect()
    }

    /// Record the player's pick and retire that bonus type.
    pub fn choose(&mut self, option: BonusOption) {
        match option {
            BonusOption::Multiply(q) => {
                self.state.pending_multiplier = Multiplier::Times(q);
                self.state.multiplier_consumed = true;
            }
            BonusOption::Divide(q) => {
                self.state.pending_multiplier = Multiplier::DividedBy(q);
                self.state.multiplier_consumed = true;
            }
            BonusOption::Add(v) => {
                self.state.pending_additive = v;
                self.state.additive_consumed = true;
            }
        }
        debug!(%option, "bonus chosen");
    }

    pub fn pending_multiplier(&self) -> f64 {
        self.state.pending_multiplier.as_f64()
    }

    pub fn pending_additive(&self) -> i64 {
        self.state.pending_additive
    }

    pub fn has_pending(&self) -> bool {
        self.state.pending_multiplier != Multiplier::Identity || self.state.pending_additive != 0
    }

    /// Human-readable summary of what is pending; empty if nothing is.
    pub fn describe(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if self.state.pending_multiplier != Multiplier::Identity {
            parts.push(format!("Multiplier: {:.2}x", self.pending_multiplier()));
        }
        if self.state.pending_additive != 0 {
            parts.push(format!("Additive: {:+}", self.state.pending_additive));
        }
        parts.join(" and ")
    }

    /// Apply and clear whatever is pending. Never returns less than 1.
    pub fn apply(&mut self, offer: u64) -> u64 {
        let scaled = self.state.pending_multiplier.apply(offer);
        let adjusted = i128::from(scaled) + i128::from(self.state.pending_additive);
        self.state.pending_multiplier = Multiplier::Identity;
        self.state.pending_additive = 0;
        adjusted.clamp(1, i128::from(u64::MAX)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_engine::random::{ScriptedRandom, SeededRandom};
    use proptest::prelude::*;

    /// Both bonus types eligible; remaining units/indices come from `script`.
    fn engine(script: ScriptedRandom) -> BonusEngine {
        BonusEngine::new(Box::new(script))
    }

    #[test]
    fn eligibility_follows_the_coins() {
        let both = engine(ScriptedRandom::new().with_units([0.1, 0.4]));
        assert!(both.has_multiplier() && both.has_additive());
        let neither = engine(ScriptedRandom::new().with_units([0.5, 0.9]));
        assert!(!neither.has_multiplier() && !neither.has_additive());
        assert_eq!(neither.next_choice(), None);
    }

    #[test]
    fn trigger_fires_at_most_once() {
        let mut e = engine(ScriptedRandom::new().with_units([0.0, 0.0, 0.9, 0.1, 0.1]));
        assert!(!e.maybe_trigger(), "0.9 misses the 30% roll");
        assert!(e.maybe_trigger());
        assert!(e.state().checkpoint_consumed);
        assert!(!e.maybe_trigger(), "already fired this session");
    }

    #[test]
    fn multiplier_options_are_in_range() {
        let mut e = BonusEngine::new(Box::new(SeededRandom::seeded(5)));
        for _ in 0..50 {
            let opts = e.multiplier_options();
            assert_eq!(opts.len(), MULTIPLIER_OPTION_COUNT);
            for o in opts {
                match o {
                    BonusOption::Multiply(q) | BonusOption::Divide(q) => assert!((2..=5).contains(&q)),
                    BonusOption::Add(_) => panic!("additive option in multiplier round"),
                }
            }
        }
    }

    #[test]
    fn additive_options_are_in_range() {
        let mut e = BonusEngine::new(Box::new(SeededRandom::seeded(6)));
        for _ in 0..50 {
            let opts = e.additive_options();
            assert_eq!(opts.len(), ADDITIVE_OPTION_COUNT);
            for o in opts {
                let BonusOption::Add(v) = o else { panic!("multiplier option in additive round") };
                assert!(v != 0 && v.abs() <= 2_000 && v % 100 == 0, "bad additive {v}");
            }
        }
    }

    #[test]
    fn scripted_options_decode() {
        // index 1 -> q = 3, coin index 0 -> heads (×); index 3 -> q = 5, coin 1 -> ÷
        let mut e = engine(ScriptedRandom::new().with_units([0.0, 0.0]).with_indices([1, 0, 3, 1]));
        let opts = e.multiplier_options();
        assert_eq!(opts[0], BonusOption::Multiply(3));
        assert_eq!(opts[1], BonusOption::Divide(5));

        // index 19 -> 2000, coin 1 -> negative
        let mut e = engine(ScriptedRandom::new().with_units([0.0, 0.0]).with_indices([19, 1]));
        assert_eq!(e.additive_options()[0], BonusOption::Add(-2_000));
    }

    #[test]
    fn choosing_consumes_the_bonus_type() {
        let mut e = engine(ScriptedRandom::new().with_units([0.0, 0.0]));
        assert_eq!(e.next_choice(), Some(BonusKind::Multiplier));
        e.choose(BonusOption::Divide(4));
        assert_eq!(e.next_choice(), Some(BonusKind::Additive));
        e.choose(BonusOption::Add(-300));
        assert_eq!(e.next_choice(), None);
        assert_eq!(e.pending_multiplier(), 0.25);
        assert_eq!(e.pending_additive(), -300);
    }

    #[test]
    fn describe_reports_pending_bonuses() {
        let mut e = engine(ScriptedRandom::new().with_units([0.0, 0.0]));
        assert_eq!(e.describe(), "");
        e.choose(BonusOption::Divide(3));
        assert_eq!(e.describe(), "Multiplier: 0.33x");
        e.choose(BonusOption::Add(500));
        assert_eq!(e.describe(), "Multiplier: 0.33x and Additive: +500");
        e.apply(1_000);
        assert_eq!(e.describe(), "");
    }

    #[test]
    fn apply_uses_exact_division_and_resets() {
        let mut e = engine(ScriptedRandom::new().with_units([0.0, 0.0]));
        e.choose(BonusOption::Divide(3));
        e.choose(BonusOption::Add(100));
        assert_eq!(e.apply(300), 200);
        assert!(!e.has_pending());
        assert_eq!(e.apply(300), 300, "second apply is a no-op");
    }

    #[test]
    fn apply_floors_at_one() {
        let mut e = engine(ScriptedRandom::new().with_units([0.0, 0.0]));
        e.choose(BonusOption::Add(-2_000));
        assert_eq!(e.apply(150), 1);
        assert_eq!(e.apply(0), 1);
    }

    fn any_option() -> impl Strategy<Value = BonusOption> {
        prop_oneof![
            (2u32..=5).prop_map(BonusOption::Multiply),
            (2u32..=5).prop_map(BonusOption::Divide),
            (1i64..=20).prop_flat_map(|k| prop_oneof![Just(k * 100), Just(-k * 100)]).prop_map(BonusOption::Add),
        ]
    }

    proptest! {
        #[test]
        fn apply_is_positive_and_clears_pending(
            offer in 0u64..=1_000_000,
            picks in prop::collection::vec(any_option(), 0..=2),
        ) {
            let mut e = BonusEngine::new(Box::new(SeededRandom::seeded(offer)));
            for p in picks {
                e.choose(p);
            }
            let out = e.apply(offer);
            prop_assert!(out >= 1);
            prop_assert_eq!(e.pending_multiplier(), 1.0);
            prop_assert_eq!(e.pending_additive(), 0);
        }
    }
}
