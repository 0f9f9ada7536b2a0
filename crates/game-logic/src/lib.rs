//! Game Logic for Rock-Paper-Scissors-Plus
//!
//! Core rules engine for a three-round Rock-Paper-Scissors variant with a
//! single-use "bomb" move. This crate is compiled to:
//! - Native (for the interactive shell)
//! - WASM (for agent frontends that call `play_round` as a tool)

mod moves;
mod policy;
mod random;
mod referee;

#[cfg(feature = "wasm")]
mod wasm;

pub use moves::{normalize, Move, Normalized, FUZZY_THRESHOLD};
pub use policy::{OpponentPolicy, RandomOpponent, ScriptedOpponent, BOMB_CHANCE_PERCENT};
pub use random::SeededRng;
pub use referee::{
    BotMove, ErrorReport, FinalResult, Outcome, Referee, RefereeError, RoundResult, Scores,
    UserMove, MAX_ROUNDS,
};

/// Decide a resolved round between two canonical moves.
///
/// Equal moves draw (two bombs included), an unanswered bomb wins outright,
/// and otherwise standard cyclic dominance applies.
pub fn resolve(user: Move, bot: Move) -> Outcome {
    if user == bot {
        return Outcome::Draw;
    }
    match (user, bot) {
        (Move::Bomb, _) => Outcome::User,
        (_, Move::Bomb) => Outcome::Bot,
        (Move::Rock, Move::Scissors)
        | (Move::Paper, Move::Rock)
        | (Move::Scissors, Move::Paper) => Outcome::User,
        _ => Outcome::Bot,
    }
}
