//! # suitcase_deal
//!
//! The rules engine for a single-player "pick a case, open the rest" game.
//!
//! Twenty-six containers hide the twenty-six board denominations ($1 up to
//! $1,000,000), a few of them possibly swapped out for themed prizes. The
//! player claims one container, then opens the others one at a time. After
//! every third reveal a banker either proposes a swap or makes a cash buyout
//! offer computed from what is still hidden. Once per game a bonus round may
//! let the player scale or shift the next offer. The game ends on a deal, or
//! when only the player's own container is left.
//!
//! ## How it works
//!
//! 1. Create a [`GameSession`] from a [`SessionRequest`] (optional RNG seed,
//!    optional pinned item count).
//! 2. Drive it with one call per player action: `pick_container`,
//!    `open_container`, `accept_offer` / `decline_offer`,
//!    `accept_swap` / `decline_swap`, `choose_multiplier_option`,
//!    `choose_additive_option`, and `start_new_session` once it's over.
//! 3. Each call returns the [`GameEvent`]s to show, in order, or a
//!    [`GameError`] explaining why the input was rejected (the session is
//!    unchanged in that case).
//! 4. Render [`GameSession::sidebar`] and [`GameSession::grid`], or the JSON
//!    document from [`to_table_state`].
//!
//! ## Key features
//!
//! - **Deterministic**: pass `rng_seed: Some(u64)` to replay the exact same
//!   game, or inject [`ScriptedRandom`] streams to pin individual draws.
//! - **UI-agnostic**: no widgets, dialogs, or callbacks; the presentation
//!   layer reacts to events and queries views.
//!
//! ## Quick start
//!
//! ```rust
//! use suitcase_deal::{GameEvent, GameSession, Phase, SessionRequest};
//!
//! let mut game = GameSession::new(SessionRequest::seeded(42)).unwrap();
//! game.pick_container(0).unwrap();
//!
//! for index in 1..=3 {
//!     for event in game.open_container(index).unwrap() {
//!         if let GameEvent::ContainerRevealed { index, content } = event {
//!             println!("Case {} held {}", index + 1, content);
//!         }
//!     }
//! }
//!
//! // Three reveals in: the banker has made a move (or a bonus round began).
//! assert_ne!(*game.phase(), Phase::Revealing);
//! ```

pub mod client_adapter;
pub mod game_engine;

// Convenience re-exports so callers can use `suitcase_deal::GameSession`
// directly without reaching into `game_engine::`.
pub use client_adapter::to_table_state;
pub use game_engine::models::dollars;
pub use game_engine::{
    BonusKind, BonusOption, CellState, Content, GameError, GameEvent, GameSession, GridCell,
    Phase, PhaseKind, RandomSource, RandomSources, ScriptedRandom, SeededRandom, SelectionError,
    SessionRequest, SidebarEntry,
};
