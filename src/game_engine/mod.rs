//! Core game engine: container pool, banker, bonus round and session flow.
//!
//! ## Module overview
//!
//! | Module    | Purpose |
//! |-----------|---------|
//! | `rules`   | Fixed constants: the board, probabilities, bonus candidate ranges |
//! | `models`  | Shared types: contents, containers, phases, events, views, requests |
//! | `errors`  | Player-input rejections |
//! | `random`  | `RandomSource` trait with seeded and scripted implementations |
//! | `pool`    | Container shuffle, item substitution, reveals and swaps |
//! | `offer`   | Swap-or-cash roll and the buyout heuristic |
//! | `bonus`   | Once-per-session multiplier/additive offer modifier |
//! | `session` | `GameSession` state machine driven by player actions |

pub mod bonus;
pub mod errors;
pub mod models;
pub mod offer;
pub mod pool;
pub mod random;
pub mod rules;
pub mod session;

// Re-export the public API surface so callers can use
// `game_engine::GameSession` without reaching into sub-modules.
pub use bonus::{BonusEngine, BonusState, Multiplier};
pub use errors::{GameError, SelectionError};
pub use models::{
    BonusKind, BonusOption, CellState, Container, Content, GameEvent, GridCell, Phase,
    PhaseKind, SessionRequest, SidebarEntry,
};
pub use offer::OfferEngine;
pub use pool::ContainerPool;
pub use random::{RandomSource, RandomSources, ScriptedRandom, SeededRandom};
pub use session::GameSession;
