//! The game state machine.
//!
//! Every inbound call either advances the session and returns the events to
//! show, or is rejected with a [`GameError`] and leaves the session untouched.
//!
//! ```text
//! AwaitingPick ─pick─▶ Revealing ─open─┬─▶ Revealing
//!                          ▲           ├─▶ (every 3rd reveal) checkpoint
//!                          │           └─▶ GameOver (one other container left)
//!                          │
//!   checkpoint: one container left ─▶ GameOver
//!               bonus fires        ─▶ ChoosingBonus ─▶ … ─▶ swap-or-offer
//!               otherwise          ─▶ swap-or-offer
//!   swap-or-offer: SwapOffered ─accept/decline─▶ Revealing
//!                  OfferPending ─decline─▶ Revealing, ─accept─▶ DealAccepted
//! ```

use rand::{rngs::StdRng, RngCore, SeedableRng};
use tracing::info;

use crate::game_engine::{
    bonus::{BonusEngine, BonusState},
    errors::{GameError, SelectionError},
    models::{
        BonusKind, CellState, Content, GameEvent, GridCell, Phase, SessionRequest, SidebarEntry,
    },
    offer::OfferEngine,
    pool::ContainerPool,
    random::RandomSources,
    rules::{CHECKPOINT_INTERVAL, MAX_ITEMS},
};

pub struct GameSession {
    request: SessionRequest,
    pool: ContainerPool,
    offer: OfferEngine,
    bonus: BonusEngine,
    phase: Phase,
    opened_count: u32,
    /// Seed for the next game when this one was seeded.
    next_seed: Option<u64>,
}

impl GameSession {
    /// Set up a fresh session: build the pool and flip the bonus coins.
    pub fn new(request: SessionRequest) -> Result<Self, GameError> {
        match request.rng_seed {
            Some(seed) => {
                let mut master = StdRng::seed_from_u64(seed);
                let sources = RandomSources::from_master(&mut master);
                let next_seed = master.next_u64();
                Self::assemble(request, sources, Some(next_seed))
            }
            None => Self::assemble(request, RandomSources::from_entropy(), None),
        }
    }

    /// Set up a session over caller-supplied random streams.
    ///
    /// When the request leaves the item count open, it is the first draw
    /// taken from `sources.pool`, ahead of the shuffle.
    pub fn with_sources(request: SessionRequest, sources: RandomSources) -> Result<Self, GameError> {
        Self::assemble(request, sources, None)
    }

    fn assemble(
        request: SessionRequest,
        mut sources: RandomSources,
        next_seed: Option<u64>,
    ) -> Result<Self, GameError> {
        let item_count = match request.item_count {
            Some(n) => n,
            None => sources.pool.index(MAX_ITEMS + 1),
        };
        let pool = ContainerPool::build(&mut *sources.pool, item_count)?;
        let offer = OfferEngine::new(sources.offer);
        let bonus = BonusEngine::new(sources.bonus);
        info!(seed = ?request.rng_seed, item_count, "session started");
        Ok(GameSession {
            request,
            pool,
            offer,
            bonus,
            phase: Phase::AwaitingPick,
            opened_count: 0,
            next_seed,
        })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn request(&self) -> &SessionRequest {
        &self.request
    }

    pub fn pool(&self) -> &ContainerPool {
        &self.pool
    }

    pub fn bonus_state(&self) -> &BonusState {
        self.bonus.state()
    }

    /// Summary of a chosen-but-unapplied bonus; empty when none is pending.
    pub fn pending_bonus(&self) -> String {
        self.bonus.describe()
    }

    pub fn opened_count(&self) -> u32 {
        self.opened_count
    }

    pub fn player(&self) -> Option<usize> {
        self.pool.player()
    }

    pub fn sidebar(&self) -> Vec<SidebarEntry> {
        self.pool.sidebar()
    }

    /// Per-container display state.
    pub fn grid(&self) -> Vec<GridCell> {
        let player = self.pool.player();
        self.pool
            .containers()
            .iter()
            .map(|c| {
                let state = if Some(c.index) == player {
                    CellState::Mine
                } else if c.opened {
                    CellState::Opened
                } else {
                    CellState::Closed
                };
                let enabled = match self.phase {
                    Phase::AwaitingPick => true,
                    Phase::Revealing | Phase::SwapOffered { .. } => state == CellState::Closed,
                    _ => false,
                };
                GridCell { index: c.index, state, enabled }
            })
            .collect()
    }

    fn out_of_turn(&self, action: &'static str) -> GameError {
        GameError::OutOfTurn { action, phase: self.phase.kind() }
    }

    // -----------------------------------------------------------------------
    // Inbound operations
    // -----------------------------------------------------------------------

    /// Claim the player's own container.
    pub fn pick_container(&mut self, index: usize) -> Result<Vec<GameEvent>, GameError> {
        if let Some(current) = self.pool.player() {
            return Err(SelectionError::AlreadyPicked { current }.into());
        }
        if self.phase != Phase::AwaitingPick {
            return Err(self.out_of_turn("pick_container"));
        }
        self.pool.claim(index)?;
        self.phase = Phase::Revealing;
        info!(index, "container claimed");
        Ok(vec![GameEvent::ContainerClaimed { index }])
    }

    /// Reveal another container; may run a checkpoint or end the game.
    pub fn open_container(&mut self, index: usize) -> Result<Vec<GameEvent>, GameError> {
        if self.phase != Phase::Revealing {
            return Err(self.out_of_turn("open_container"));
        }
        let content = self.pool.open(index)?;
        self.opened_count += 1;

        let mut events = vec![GameEvent::ContainerRevealed { index, content }];
        if self.opened_count % CHECKPOINT_INTERVAL == 0 {
            self.checkpoint(&mut events);
        } else if self.pool.unopened_count() == 1 {
            self.final_reveal(&mut events);
        }
        Ok(events)
    }

    pub fn accept_offer(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let Phase::OfferPending { amount } = self.phase else {
            return Err(self.out_of_turn("accept_offer"));
        };
        let Some(content) = self.pool.player_content().cloned() else {
            return Err(self.out_of_turn("accept_offer"));
        };
        info!(amount, %content, "deal accepted");
        self.phase = Phase::DealAccepted { amount, content: content.clone() };
        Ok(vec![GameEvent::DealAccepted { amount, content }, GameEvent::GameOver])
    }

    pub fn decline_offer(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if !matches!(self.phase, Phase::OfferPending { .. }) {
            return Err(self.out_of_turn("decline_offer"));
        }
        self.phase = Phase::Revealing;
        Ok(Vec::new())
    }

    /// Trade places with `target`. The old index goes back into play.
    pub fn accept_swap(&mut self, target: usize) -> Result<Vec<GameEvent>, GameError> {
        if !matches!(self.phase, Phase::SwapOffered { .. }) {
            return Err(self.out_of_turn("accept_swap"));
        }
        let Some(from) = self.pool.player() else {
            return Err(self.out_of_turn("accept_swap"));
        };
        self.pool.swap(from, target)?;
        self.pool.reassign_player(target);
        self.phase = Phase::Revealing;
        info!(from, to = target, "containers swapped");
        Ok(vec![GameEvent::Swapped { from, to: target }])
    }

    pub fn decline_swap(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if !matches!(self.phase, Phase::SwapOffered { .. }) {
            return Err(self.out_of_turn("decline_swap"));
        }
        self.phase = Phase::Revealing;
        Ok(Vec::new())
    }

    pub fn choose_multiplier_option(&mut self, choice: usize) -> Result<Vec<GameEvent>, GameError> {
        self.choose_bonus(BonusKind::Multiplier, choice, "choose_multiplier_option")
    }

    pub fn choose_additive_option(&mut self, choice: usize) -> Result<Vec<GameEvent>, GameError> {
        self.choose_bonus(BonusKind::Additive, choice, "choose_additive_option")
    }

    /// Throw this session away and deal a new one.
    ///
    /// Only allowed once the game has ended. A seeded session moves on to a
    /// seed drawn from its own master stream; an unseeded one reseeds from
    /// entropy. The item-count pin, if any, carries over.
    pub fn start_new_session(&mut self) -> Result<Vec<GameEvent>, GameError> {
        if !self.phase.is_terminal() {
            return Err(self.out_of_turn("start_new_session"));
        }
        let request = SessionRequest { rng_seed: self.next_seed, ..self.request };
        *self = GameSession::new(request)?;
        Ok(vec![GameEvent::SessionStarted { item_count: self.pool.item_count() }])
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    fn checkpoint(&mut self, events: &mut Vec<GameEvent>) {
        if self.pool.unopened_count() == 1 {
            self.final_reveal(events);
            return;
        }
        if self.bonus.maybe_trigger() {
            info!("bonus round triggered");
            if let Some(kind) = self.bonus.next_choice() {
                self.present_bonus(kind, events);
                return;
            }
        }
        self.swap_or_offer(events);
    }

    fn present_bonus(&mut self, kind: BonusKind, events: &mut Vec<GameEvent>) {
        let options = self.bonus.options_for(kind);
        events.push(GameEvent::BonusOptionsPresented { kind, options: options.clone() });
        self.phase = Phase::ChoosingBonus { kind, options };
    }

    fn choose_bonus(
        &mut self,
        kind: BonusKind,
        choice: usize,
        action: &'static str,
    ) -> Result<Vec<GameEvent>, GameError> {
        let option = match &self.phase {
            Phase::ChoosingBonus { kind: k, options } if *k == kind => {
                *options.get(choice).ok_or(GameError::NoSuchOption { choice, available: options.len() })?
            }
            _ => return Err(self.out_of_turn(action)),
        };
        self.bonus.choose(option);

        let mut events = vec![GameEvent::BonusChosen { kind, option }];
        match self.bonus.next_choice() {
            Some(next) => self.present_bonus(next, &mut events),
            None => self.swap_or_offer(&mut events),
        }
        Ok(events)
    }

    fn swap_or_offer(&mut self, events: &mut Vec<GameEvent>) {
        if self.offer.should_propose_swap() {
            let candidates = self.pool.closed_others();
            events.push(GameEvent::SwapProposed { candidates: candidates.clone() });
            self.phase = Phase::SwapOffered { candidates };
            return;
        }

        let remaining = self.pool.remaining_numeric_values();
        let raw = self.offer.compute_offer(&remaining);
        let amount = if self.bonus.has_pending() {
            let description = self.bonus.describe();
            let amount = self.bonus.apply(raw);
            info!(%description, original = raw, amount, "bonus applied");
            events.push(GameEvent::BonusApplied { description, original: raw, amount });
            amount
        } else {
            raw
        };

        info!(amount, remaining = remaining.len(), "offer presented");
        events.push(GameEvent::OfferPresented { amount });
        self.phase = Phase::OfferPending { amount };
    }

    fn final_reveal(&mut self, events: &mut Vec<GameEvent>) {
        let Some(index) = self.pool.player() else {
            return;
        };
        let content: Content = self.pool.containers()[index].content.clone();
        info!(index, %content, "final reveal");
        events.push(GameEvent::FinalRevealed { index, content: content.clone() });
        events.push(GameEvent::GameOver);
        self.phase = Phase::GameOver { content };
    }
}
