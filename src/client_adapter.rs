use serde_json::{json, Value};
use crate::game_engine::{
    models::{dollars, CellState, Content, GridCell, Phase, SidebarEntry},
    GameSession,
};

/// Sidebar label: `$750`, or `ITEM PRICE` when an item displaced it.
fn sidebar_label(entry: &SidebarEntry) -> String {
    if entry.item_occupied {
        "ITEM PRICE".to_string()
    } else {
        dollars(entry.denomination)
    }
}

/// Build one sidebar row.
fn sidebar_row(entry: &SidebarEntry) -> Value {
    json!({
        "denomination": entry.denomination,
        "label": sidebar_label(entry),
        "seen": entry.seen,
        "itemPrice": entry.item_occupied
    })
}

/// Split the board into the two sidebar columns, low values on the left.
fn sidebar_columns(entries: &[SidebarEntry]) -> Value {
    let half = entries.len() / 2;
    let (left, right) = entries.split_at(half);
    json!({
        "left":  left.iter().map(sidebar_row).collect::<Vec<_>>(),
        "right": right.iter().map(sidebar_row).collect::<Vec<_>>()
    })
}

fn cell_state_str(state: CellState) -> &'static str {
    match state {
        CellState::Closed => "closed",
        CellState::Opened => "opened",
        CellState::Mine   => "mine",
    }
}

/// Build one grid cell. Labels are 1-based for display.
fn grid_cell(cell: &GridCell) -> Value {
    json!({
        "index": cell.index,
        "label": format!("Case {}", cell.index + 1),
        "state": cell_state_str(cell.state),
        "enabled": cell.enabled
    })
}

/// Render a container's content for display.
fn content_value(content: &Content) -> Value {
    match content {
        Content::Cash(value) => json!({ "kind": "cash", "value": value, "text": dollars(*value) }),
        Content::Item { label, .. } => json!({ "kind": "item", "label": label, "text": content.to_string() }),
    }
}

/// Describe the current phase and whatever the player must respond to.
fn phase_value(phase: &Phase) -> Value {
    let name = format!("{:?}", phase.kind());
    match phase {
        Phase::AwaitingPick | Phase::Revealing => json!({ "name": name }),
        Phase::SwapOffered { candidates } => json!({ "name": name, "candidates": candidates }),
        Phase::ChoosingBonus { kind, options } => json!({
            "name": name,
            "title": kind.to_string(),
            "options": options.iter().map(|o| o.to_string()).collect::<Vec<_>>()
        }),
        Phase::OfferPending { amount } => json!({ "name": name, "amount": amount, "text": dollars(*amount) }),
        Phase::DealAccepted { amount, content } => json!({
            "name": name,
            "amount": amount,
            "content": content_value(content)
        }),
        Phase::GameOver { content } => json!({ "name": name, "content": content_value(content) }),
    }
}

/// Map a [`GameSession`] to one JSON document a UI client can render as-is.
pub fn to_table_state(session: &GameSession) -> Value {
    let player = session.player();
    let pending = session.pending_bonus();

    json!({
        "phase": phase_value(session.phase()),
        "player": player,
        "playerLabel": player.map(|i| format!("Case {}", i + 1)),
        "openedCount": session.opened_count(),
        "remaining": session.pool().unopened_count(),
        "pendingBonus": if pending.is_empty() { Value::Null } else { Value::String(pending) },
        "sidebar": sidebar_columns(&session.sidebar()),
        "grid": session.grid().iter().map(grid_cell).collect::<Vec<_>>()
    })
}
