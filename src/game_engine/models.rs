use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Container contents
// ---------------------------------------------------------------------------

/// What a container hides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    /// A denomination from the board, in whole dollars.
    Cash(u64),
    /// A themed prize; `replaced_value` is the denomination it displaced.
    Item { label: String, replaced_value: u64 },
}

impl Content {
    /// The board denomination this content accounts for.
    pub fn denomination(&self) -> u64 {
        match self {
            Content::Cash(value) => *value,
            Content::Item { replaced_value, .. } => *replaced_value,
        }
    }

    pub fn cash(&self) -> Option<u64> {
        match self {
            Content::Cash(value) => Some(*value),
            Content::Item { .. } => None,
        }
    }

    pub fn item_label(&self) -> Option<&str> {
        match self {
            Content::Cash(_) => None,
            Content::Item { label, .. } => Some(label),
        }
    }

    pub fn is_item(&self) -> bool {
        matches!(self, Content::Item { .. })
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Cash(value) => write!(f, "{}", dollars(*value)),
            Content::Item { label, .. } => write!(f, "Item: {}", label),
        }
    }
}

/// Format whole dollars with thousands separators, e.g. `$12,500`.
pub fn dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Stable 0-based identity.
    pub index: usize,
    pub content: Content,
    /// Flips to `true` once and stays there.
    pub opened: bool,
}

// ---------------------------------------------------------------------------
// Bonus options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    Multiplier,
    Additive,
}

impl fmt::Display for BonusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusKind::Multiplier => write!(f, "Multiplier Bonus"),
            BonusKind::Additive   => write!(f, "Additive Bonus"),
        }
    }
}

/// One candidate the player can pick from a bonus round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusOption {
    Multiply(u32),
    Divide(u32),
    /// Signed dollar adjustment.
    Add(i64),
}

impl BonusOption {
    pub fn kind(self) -> BonusKind {
        match self {
            BonusOption::Multiply(_) | BonusOption::Divide(_) => BonusKind::Multiplier,
            BonusOption::Add(_) => BonusKind::Additive,
        }
    }
}

impl fmt::Display for BonusOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusOption::Multiply(q) => write!(f, "×{}", q),
            BonusOption::Divide(q)   => write!(f, "÷{}", q),
            BonusOption::Add(v)      => write!(f, "{:+}", v),
        }
    }
}

// ---------------------------------------------------------------------------
// Session phases and events
// ---------------------------------------------------------------------------

/// Where the session is waiting for input.
///
/// Checkpoints and the final reveal are resolved inside a single reveal call,
/// so they never show up here; the session lands directly in whichever phase
/// they lead to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingPick,
    Revealing,
    SwapOffered { candidates: Vec<usize> },
    ChoosingBonus { kind: BonusKind, options: Vec<BonusOption> },
    OfferPending { amount: u64 },
    DealAccepted { amount: u64, content: Content },
    GameOver { content: Content },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::AwaitingPick => PhaseKind::AwaitingPick,
            Phase::Revealing => PhaseKind::Revealing,
            Phase::SwapOffered { .. } => PhaseKind::SwapOffered,
            Phase::ChoosingBonus { kind: BonusKind::Multiplier, .. } => PhaseKind::ChoosingMultiplier,
            Phase::ChoosingBonus { kind: BonusKind::Additive, .. } => PhaseKind::ChoosingAdditive,
            Phase::OfferPending { .. } => PhaseKind::OfferPending,
            Phase::DealAccepted { .. } => PhaseKind::DealAccepted,
            Phase::GameOver { .. } => PhaseKind::GameOver,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::DealAccepted { .. } | Phase::GameOver { .. })
    }
}

/// Data-free tag of a [`Phase`], used in rejections and client views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    AwaitingPick,
    Revealing,
    SwapOffered,
    ChoosingMultiplier,
    ChoosingAdditive,
    OfferPending,
    DealAccepted,
    GameOver,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PhaseKind::AwaitingPick       => "waiting for the first pick",
            PhaseKind::Revealing          => "revealing containers",
            PhaseKind::SwapOffered        => "a swap is on offer",
            PhaseKind::ChoosingMultiplier => "choosing a multiplier bonus",
            PhaseKind::ChoosingAdditive   => "choosing an additive bonus",
            PhaseKind::OfferPending       => "an offer is on the table",
            PhaseKind::DealAccepted       => "the deal is done",
            PhaseKind::GameOver           => "the game is over",
        };
        write!(f, "{}", s)
    }
}

/// Something the presentation layer should show, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { item_count: usize },
    ContainerClaimed { index: usize },
    ContainerRevealed { index: usize, content: Content },
    SwapProposed { candidates: Vec<usize> },
    Swapped { from: usize, to: usize },
    BonusOptionsPresented { kind: BonusKind, options: Vec<BonusOption> },
    BonusChosen { kind: BonusKind, option: BonusOption },
    /// A pending bonus turned `original` into `amount`.
    BonusApplied { description: String, original: u64, amount: u64 },
    OfferPresented { amount: u64 },
    FinalRevealed { index: usize, content: Content },
    DealAccepted { amount: u64, content: Content },
    GameOver,
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// One row of the denomination sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarEntry {
    pub denomination: u64,
    /// Revealed directly, or through an item that displaced it.
    pub seen: bool,
    /// Displaced by an item at build time.
    pub item_occupied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Closed,
    Opened,
    /// The player's own container.
    Mine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub index: usize,
    pub state: CellState,
    /// Whether clicking the cell is currently meaningful.
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// Session request
// ---------------------------------------------------------------------------

/// How to set up a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// `Some` makes every draw reproducible; `None` seeds from entropy.
    pub rng_seed: Option<u64>,
    /// Pin the number of item containers; `None` draws it from `0..=3`.
    pub item_count: Option<usize>,
}

impl SessionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng_seed: Some(seed), item_count: None }
    }

    pub fn with_items(mut self, count: usize) -> Self {
        self.item_count = Some(count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollars_groups_thousands() {
        assert_eq!(dollars(1), "$1");
        assert_eq!(dollars(750), "$750");
        assert_eq!(dollars(1_000), "$1,000");
        assert_eq!(dollars(12_500), "$12,500");
        assert_eq!(dollars(1_000_000), "$1,000,000");
    }

    #[test]
    fn item_content_accounts_for_its_displaced_value() {
        let item = Content::Item { label: "Drone".into(), replaced_value: 500 };
        assert_eq!(item.denomination(), 500);
        assert_eq!(item.cash(), None);
        assert_eq!(item.item_label(), Some("Drone"));
        assert_eq!(item.to_string(), "Item: Drone");
        assert_eq!(Content::Cash(25_000).to_string(), "$25,000");
    }

    #[test]
    fn bonus_options_render_with_operator() {
        assert_eq!(BonusOption::Multiply(3).to_string(), "×3");
        assert_eq!(BonusOption::Divide(2).to_string(), "÷2");
        assert_eq!(BonusOption::Add(500).to_string(), "+500");
        assert_eq!(BonusOption::Add(-1_200).to_string(), "-1200");
        assert_eq!(BonusOption::Add(-100).kind(), BonusKind::Additive);
    }

    #[test]
    fn request_builders() {
        let r = SessionRequest::seeded(9).with_items(2);
        assert_eq!(r.rng_seed, Some(9));
        assert_eq!(r.item_count, Some(2));
        assert_eq!(SessionRequest::new(), SessionRequest::default());
    }

    #[test]
    fn terminal_phases() {
        assert!(Phase::GameOver { content: Content::Cash(1) }.is_terminal());
        assert!(!Phase::OfferPending { amount: 10 }.is_terminal());
        assert_eq!(
            Phase::ChoosingBonus { kind: BonusKind::Additive, options: vec![] }.kind(),
            PhaseKind::ChoosingAdditive
        );
    }
}
