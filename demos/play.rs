//! Play one full game in the terminal with a simple scripted player.
//!
//! Run with: `cargo run --example play -- [seed]`
//!
//! This example stands in for the presentation layer: it makes one core call
//! per player action and prints the events that come back. The player:
//!
//! - claims Case 13,
//! - opens the lowest-numbered closed case each turn,
//! - always picks the first bonus option,
//! - declines swaps,
//! - takes the banker's offer once it reaches 40% of the board's top prize.
//!
//! Set `RUST_LOG=suitcase_deal=debug` to watch the engine's own tracing output.

use suitcase_deal::{dollars, GameEvent, GameSession, Phase, SessionRequest};
use tracing_subscriber::EnvFilter;

const TAKE_THE_DEAL_AT: u64 = 400_000;

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::SessionStarted { item_count } => {
            println!("New game: {item_count} case(s) hide a prize instead of cash");
        }
        GameEvent::ContainerClaimed { index } => {
            println!("You chose Case {}. This is your case until the end!", index + 1);
        }
        GameEvent::ContainerRevealed { index, content } => {
            println!("  Case {:>2} contained {}", index + 1, content);
        }
        GameEvent::SwapProposed { candidates } => {
            println!("The Banker offers to swap your case ({} to choose from)", candidates.len());
        }
        GameEvent::Swapped { from, to } => {
            println!("You swapped Case {} for Case {}", from + 1, to + 1);
        }
        GameEvent::BonusOptionsPresented { kind, options } => {
            let shown: Vec<String> = options.iter().map(|o| o.to_string()).collect();
            println!("{kind}! Options: {}", shown.join("  "));
        }
        GameEvent::BonusChosen { kind, option } => {
            println!("{kind} selected: {option}");
        }
        GameEvent::BonusApplied { description, original, amount } => {
            println!("Bonus applied ({description}): {} -> {}", dollars(*original), dollars(*amount));
        }
        GameEvent::OfferPresented { amount } => {
            println!("The Banker offers you {}. Deal or No Deal?", dollars(*amount));
        }
        GameEvent::FinalRevealed { index, content } => {
            println!("Your case (Case {}) contains {}", index + 1, content);
        }
        GameEvent::DealAccepted { amount, content } => {
            println!("DEAL at {}! Your case contained {}", dollars(*amount), content);
        }
        GameEvent::GameOver => println!("Game over."),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(2024);
    let mut game = match GameSession::new(SessionRequest::seeded(seed)) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("could not start a game: {err}");
            return;
        }
    };
    println!("Seed {seed}, {} item case(s)", game.pool().item_count());

    let step = |result: Result<Vec<GameEvent>, suitcase_deal::GameError>| match result {
        Ok(events) => events.iter().for_each(print_event),
        Err(err) => println!("Not allowed: {err}"),
    };

    step(game.pick_container(12));
    // Show one rejection on purpose.
    step(game.open_container(12));

    while !game.phase().is_terminal() {
        let result = match game.phase().clone() {
            Phase::Revealing => {
                let next = game.pool().closed_others()[0];
                game.open_container(next)
            }
            Phase::SwapOffered { .. } => game.decline_swap(),
            Phase::ChoosingBonus { kind: suitcase_deal::BonusKind::Multiplier, .. } => {
                game.choose_multiplier_option(0)
            }
            Phase::ChoosingBonus { .. } => game.choose_additive_option(0),
            Phase::OfferPending { amount } if amount >= TAKE_THE_DEAL_AT => game.accept_offer(),
            Phase::OfferPending { .. } => {
                println!("No Deal!");
                game.decline_offer()
            }
            Phase::AwaitingPick | Phase::DealAccepted { .. } | Phase::GameOver { .. } => break,
        };
        step(result);
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&suitcase_deal::to_table_state(&game)).unwrap_or_default());
}
