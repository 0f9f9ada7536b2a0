//! Round orchestration and game state
//!
//! The referee owns all mutable state for one game and is the only path
//! through which it changes. Callers feed it raw user text; it hands back
//! the structured round result that forms the tool contract.

use serde::{Deserialize, Serialize};

use crate::moves::{normalize, Move, Normalized};
use crate::policy::{OpponentPolicy, RandomOpponent};
use crate::random::SeededRng;
use crate::resolve;

/// Number of rounds in a game
pub const MAX_ROUNDS: u8 = 3;

/// Win counts for both sides
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub user: u8,
    pub bot: u8,
}

/// Outcome of a single round
///
/// The resolver only ever produces the first three; `Wasted` marks rounds
/// consumed by invalid input or an illegal bomb reuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    User,
    Bot,
    Draw,
    Wasted,
}

/// Final verdict, set exactly once when the last round resolves.
///
/// Wire form is the banner string shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalResult {
    #[serde(rename = "User Wins!")]
    UserWins,
    #[serde(rename = "Bot Wins!")]
    BotWins,
    #[serde(rename = "It's a Draw!")]
    Draw,
}

impl FinalResult {
    pub fn as_str(self) -> &'static str {
        match self {
            FinalResult::UserWins => "User Wins!",
            FinalResult::BotWins => "Bot Wins!",
            FinalResult::Draw => "It's a Draw!",
        }
    }
}

impl core::fmt::Display for FinalResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's move as reported in a round result: a canonical move, or the
/// normalized text that failed to match (kept for error messages).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserMove {
    Played(Move),
    Invalid(String),
}

/// The bot's move as reported: a canonical move, or a not-applicable marker
/// when the round was wasted and the bot's roll discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotMove {
    Played(Move),
    NotApplicable,
}

impl BotMove {
    pub fn as_str(self) -> &'static str {
        match self {
            BotMove::Played(mv) => mv.as_str(),
            BotMove::NotApplicable => "n/a",
        }
    }
}

impl Serialize for BotMove {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BotMove {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text == "n/a" {
            return Ok(BotMove::NotApplicable);
        }
        Move::ALL
            .into_iter()
            .find(|m| m.as_str() == text)
            .map(BotMove::Played)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown bot move '{text}'")))
    }
}

/// Result of a single round, the response half of the tool contract
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundResult {
    /// The round just played (pre-increment)
    pub round: u8,
    pub user_move: UserMove,
    pub bot_move: BotMove,
    pub outcome: Outcome,
    pub explanation: String,
    /// Snapshot taken when the round resolved
    pub current_scores: Scores,
    pub game_over: bool,
    /// Present only on the round that ends the game
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_result: Option<FinalResult>,
}

/// Errors surfaced by the referee
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefereeError {
    /// `play_round` was called after the game ended. Non-fatal and
    /// repeatable; state is untouched.
    GameOver,
}

impl core::fmt::Display for RefereeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RefereeError::GameOver => write!(f, "Game is already over."),
        }
    }
}

impl std::error::Error for RefereeError {}

/// Wire shape for post-termination calls: `{error, game_over: true}`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
    pub game_over: bool,
}

impl From<RefereeError> for ErrorReport {
    fn from(err: RefereeError) -> Self {
        Self {
            error: err.to_string(),
            game_over: true,
        }
    }
}

/// Referee for one game of Rock-Paper-Scissors-Plus.
///
/// Owns all game state; every transition goes through [`Referee::play_round`].
/// One instance per game session, strictly sequential use.
#[derive(Clone, Debug)]
pub struct Referee<P> {
    round: u8,
    scores: Scores,
    user_bomb_used: bool,
    bot_bomb_used: bool,
    game_over: bool,
    final_result: Option<FinalResult>,
    policy: P,
}

impl Referee<RandomOpponent> {
    /// Fresh game against the production random opponent
    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomOpponent::new(SeededRng::new(seed)))
    }
}

impl<P: OpponentPolicy> Referee<P> {
    /// Fresh game with an injected opponent policy
    pub fn new(policy: P) -> Self {
        Self {
            round: 1,
            scores: Scores::default(),
            user_bomb_used: false,
            bot_bomb_used: false,
            game_over: false,
            final_result: None,
            policy,
        }
    }

    /// Round about to be played (1-based; `MAX_ROUNDS + 1` once finished)
    pub fn round(&self) -> u8 {
        self.round
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn final_result(&self) -> Option<FinalResult> {
        self.final_result
    }

    pub fn user_bomb_used(&self) -> bool {
        self.user_bomb_used
    }

    pub fn bot_bomb_used(&self) -> bool {
        self.bot_bomb_used
    }

    /// Play one round from raw user text.
    ///
    /// Total over arbitrary text: unrecognized input and illegal bomb reuse
    /// waste the round rather than failing, and the round counter advances
    /// either way. The only error is calling again after the game ended.
    pub fn play_round(&mut self, raw: &str) -> Result<RoundResult, RefereeError> {
        if self.game_over {
            return Err(RefereeError::GameOver);
        }

        let normalized = normalize(raw);
        // The bot rolls whether or not the round turns out valid; a roll
        // discarded by a wasted round must not spend the bot's bomb.
        let bot_roll = self.policy.choose_move(self.bot_bomb_used);

        let (user_move, bot_move, outcome, explanation) = match normalized {
            Normalized::Unrecognized(text) => (
                UserMove::Invalid(text),
                BotMove::NotApplicable,
                Outcome::Wasted,
                format!("'{raw}' is invalid! Round wasted."),
            ),
            Normalized::Exact(Move::Bomb) | Normalized::Corrected(Move::Bomb)
                if self.user_bomb_used =>
            {
                (
                    UserMove::Played(Move::Bomb),
                    BotMove::NotApplicable,
                    Outcome::Wasted,
                    "Bomb already used! Round wasted.".to_string(),
                )
            }
            Normalized::Exact(mv) => self.execute_round(mv, bot_roll, None),
            Normalized::Corrected(mv) => self.execute_round(mv, bot_roll, Some(raw)),
        };

        match outcome {
            Outcome::User => self.scores.user += 1,
            Outcome::Bot => self.scores.bot += 1,
            Outcome::Draw | Outcome::Wasted => {}
        }

        let mut result = RoundResult {
            round: self.round,
            user_move,
            bot_move,
            outcome,
            explanation,
            current_scores: self.scores,
            game_over: false,
            final_result: None,
        };

        // Wasted rounds still consume a turn
        self.round += 1;

        if self.round > MAX_ROUNDS {
            self.game_over = true;
            let verdict = if self.scores.user > self.scores.bot {
                FinalResult::UserWins
            } else if self.scores.bot > self.scores.user {
                FinalResult::BotWins
            } else {
                FinalResult::Draw
            };
            self.final_result = Some(verdict);
            result.game_over = true;
            result.final_result = Some(verdict);
        }

        Ok(result)
    }

    /// Spend bombs, resolve, and narrate a valid round
    fn execute_round(
        &mut self,
        mv: Move,
        bot_roll: Move,
        corrected_from: Option<&str>,
    ) -> (UserMove, BotMove, Outcome, String) {
        if mv == Move::Bomb {
            self.user_bomb_used = true;
        }
        if bot_roll == Move::Bomb {
            self.bot_bomb_used = true;
        }

        let outcome = resolve(mv, bot_roll);

        let mut explanation = match corrected_from {
            Some(original) => format!("Auto-corrected '{}' to '{mv}'. ", original.trim()),
            None => String::new(),
        };
        explanation.push_str(&if outcome == Outcome::Draw {
            format!("Both chose {mv}. Draw.")
        } else if mv == Move::Bomb {
            "BOMB beats everything! You win.".to_string()
        } else if bot_roll == Move::Bomb {
            "Bot dropped a BOMB! You lose.".to_string()
        } else if outcome == Outcome::User {
            format!("{} beats {bot_roll}. You win!", mv.title())
        } else {
            format!("{} beats {mv}. Bot wins!", bot_roll.title())
        });

        (
            UserMove::Played(mv),
            BotMove::Played(bot_roll),
            outcome,
            explanation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ScriptedOpponent;

    fn scripted(moves: impl Into<Vec<Move>>) -> Referee<ScriptedOpponent> {
        Referee::new(ScriptedOpponent::new(moves))
    }

    #[test]
    fn test_rock_beats_scissors() {
        let mut game = scripted([Move::Scissors]);

        let result = game.play_round("rock").unwrap();
        assert_eq!(result.round, 1);
        assert_eq!(result.user_move, UserMove::Played(Move::Rock));
        assert_eq!(result.bot_move, BotMove::Played(Move::Scissors));
        assert_eq!(result.outcome, Outcome::User);
        assert_eq!(result.explanation, "Rock beats scissors. You win!");
        assert_eq!(result.current_scores, Scores { user: 1, bot: 0 });
        assert!(!result.game_over);
        assert_eq!(game.round(), 2);
    }

    #[test]
    fn test_bot_dominance() {
        let mut game = scripted([Move::Paper]);

        let result = game.play_round("rock").unwrap();
        assert_eq!(result.outcome, Outcome::Bot);
        assert_eq!(result.explanation, "Paper beats rock. Bot wins!");
        assert_eq!(result.current_scores, Scores { user: 0, bot: 1 });
    }

    #[test]
    fn test_draw_leaves_scores() {
        let mut game = scripted([Move::Rock]);

        let result = game.play_round("rock").unwrap();
        assert_eq!(result.outcome, Outcome::Draw);
        assert_eq!(result.explanation, "Both chose rock. Draw.");
        assert_eq!(result.current_scores, Scores::default());
        assert_eq!(game.round(), 2);
    }

    #[test]
    fn test_fuzzy_correction_surfaces_in_explanation() {
        let mut game = scripted([Move::Rock]);

        let result = game.play_round("sissors").unwrap();
        assert_eq!(result.user_move, UserMove::Played(Move::Scissors));
        assert!(
            result.explanation.starts_with("Auto-corrected 'sissors' to 'scissors'. "),
            "unexpected explanation: {}",
            result.explanation
        );
        // The corrected move still resolves normally
        assert_eq!(result.outcome, Outcome::Bot);
    }

    #[test]
    fn test_invalid_input_wastes_round() {
        let mut game = scripted([Move::Rock]);

        let result = game.play_round("xyz123").unwrap();
        assert_eq!(result.outcome, Outcome::Wasted);
        assert_eq!(result.user_move, UserMove::Invalid("xyz123".to_string()));
        assert_eq!(result.bot_move, BotMove::NotApplicable);
        assert_eq!(result.explanation, "'xyz123' is invalid! Round wasted.");
        assert_eq!(result.current_scores, Scores::default());
        assert_eq!(game.round(), 2);
    }

    #[test]
    fn test_bomb_mechanic() {
        let mut game = scripted([Move::Rock, Move::Rock]);

        // First use: wins regardless of the bot's standard move
        let result1 = game.play_round("bomb").unwrap();
        assert_eq!(result1.outcome, Outcome::User);
        assert_eq!(result1.explanation, "BOMB beats everything! You win.");
        assert!(game.user_bomb_used());

        // Second use: wasted round, turn still consumed
        let result2 = game.play_round("bomb").unwrap();
        assert_eq!(result2.outcome, Outcome::Wasted);
        assert_eq!(result2.explanation, "Bomb already used! Round wasted.");
        assert_eq!(result2.bot_move, BotMove::NotApplicable);
        assert!(game.user_bomb_used());
        assert_eq!(game.round(), 3);
    }

    #[test]
    fn test_corrected_bomb_reuse_is_still_reuse() {
        let mut game = scripted([Move::Rock, Move::Rock]);

        game.play_round("bomb").unwrap();
        let result = game.play_round("bomp").unwrap();
        assert_eq!(result.outcome, Outcome::Wasted);
        assert_eq!(result.user_move, UserMove::Played(Move::Bomb));
    }

    #[test]
    fn test_bot_bomb_wins() {
        let mut game = scripted([Move::Bomb]);

        let result = game.play_round("rock").unwrap();
        assert_eq!(result.outcome, Outcome::Bot);
        assert_eq!(result.explanation, "Bot dropped a BOMB! You lose.");
        assert!(game.bot_bomb_used());
    }

    #[test]
    fn test_both_bombs_draw() {
        let mut game = scripted([Move::Bomb]);

        let result = game.play_round("bomb").unwrap();
        assert_eq!(result.outcome, Outcome::Draw);
        assert_eq!(result.explanation, "Both chose bomb. Draw.");
        assert!(game.user_bomb_used());
        assert!(game.bot_bomb_used());
    }

    #[test]
    fn test_discarded_roll_keeps_bot_bomb() {
        // The bot would bomb both rounds, but round 1 is wasted by invalid
        // input; that roll is discarded and must not spend the bot's bomb.
        let mut game = scripted([Move::Bomb, Move::Bomb]);

        game.play_round("not a move").unwrap();
        assert!(!game.bot_bomb_used());

        let result = game.play_round("rock").unwrap();
        assert_eq!(result.outcome, Outcome::Bot);
        assert!(game.bot_bomb_used());
    }

    #[test]
    fn test_full_game_user_wins() {
        let mut game = scripted([Move::Scissors, Move::Scissors, Move::Rock]);

        assert_eq!(game.play_round("rock").unwrap().outcome, Outcome::User);
        assert_eq!(game.play_round("rock").unwrap().outcome, Outcome::User);

        let last = game.play_round("scissors").unwrap();
        assert_eq!(last.outcome, Outcome::Bot);
        assert!(last.game_over);
        assert_eq!(last.final_result, Some(FinalResult::UserWins));
        assert_eq!(last.current_scores, Scores { user: 2, bot: 1 });
        assert!(game.game_over());
        assert_eq!(game.final_result(), Some(FinalResult::UserWins));
    }

    #[test]
    fn test_full_game_bot_wins() {
        let mut game = scripted([Move::Paper, Move::Paper, Move::Paper]);

        game.play_round("rock").unwrap();
        game.play_round("rock").unwrap();
        let last = game.play_round("rock").unwrap();

        assert_eq!(last.final_result, Some(FinalResult::BotWins));
        assert_eq!(last.current_scores, Scores { user: 0, bot: 3 });
    }

    #[test]
    fn test_full_game_draw() {
        let mut game = scripted([Move::Rock, Move::Rock, Move::Rock]);

        game.play_round("rock").unwrap();
        game.play_round("rock").unwrap();
        let last = game.play_round("rock").unwrap();

        assert!(last.game_over);
        assert_eq!(last.final_result, Some(FinalResult::Draw));
    }

    #[test]
    fn test_wasted_final_round_still_ends_game() {
        let mut game = scripted([Move::Scissors, Move::Rock, Move::Rock]);

        game.play_round("rock").unwrap();
        game.play_round("paper").unwrap();
        let last = game.play_round("garbage input").unwrap();

        assert_eq!(last.outcome, Outcome::Wasted);
        assert!(last.game_over);
        assert_eq!(last.final_result, Some(FinalResult::UserWins));
    }

    #[test]
    fn test_post_game_call_is_error_and_mutates_nothing() {
        let mut game = scripted([Move::Rock, Move::Rock, Move::Rock]);
        for _ in 0..3 {
            game.play_round("rock").unwrap();
        }

        let round_before = game.round();
        let scores_before = game.scores();

        let err = game.play_round("rock").unwrap_err();
        assert_eq!(err, RefereeError::GameOver);
        assert_eq!(err.to_string(), "Game is already over.");
        assert_eq!(game.round(), round_before);
        assert_eq!(game.scores(), scores_before);

        // Repeatable
        assert_eq!(game.play_round("paper").unwrap_err(), RefereeError::GameOver);
    }

    #[test]
    fn test_round_counter_strictly_monotonic() {
        let mut game = scripted([Move::Rock]);
        let inputs = ["rock", "garbage", "paper"];

        for (i, input) in inputs.iter().enumerate() {
            assert_eq!(game.round(), i as u8 + 1);
            let result = game.play_round(input).unwrap();
            assert_eq!(result.round, i as u8 + 1);
        }
        assert_eq!(game.round(), MAX_ROUNDS + 1);
    }

    #[test]
    fn test_seeded_game_is_reproducible() {
        let mut a = Referee::seeded(99);
        let mut b = Referee::seeded(99);

        for input in ["rock", "paper", "scissors"] {
            let ra = a.play_round(input).unwrap();
            let rb = b.play_round(input).unwrap();
            assert_eq!(ra.bot_move, rb.bot_move);
            assert_eq!(ra.outcome, rb.outcome);
        }
    }

    #[test]
    fn test_round_result_json_shape() {
        let mut game = scripted([Move::Scissors]);
        let result = game.play_round("rock").unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["round"], 1);
        assert_eq!(json["user_move"], "rock");
        assert_eq!(json["bot_move"], "scissors");
        assert_eq!(json["outcome"], "user");
        assert_eq!(json["current_scores"]["user"], 1);
        assert_eq!(json["current_scores"]["bot"], 0);
        assert_eq!(json["game_over"], false);
        // Omitted until the game ends
        assert!(json.get("final_result").is_none());
    }

    #[test]
    fn test_wasted_round_json_shape() {
        let mut game = scripted([Move::Rock]);
        let result = game.play_round("???").unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["user_move"], "???");
        assert_eq!(json["bot_move"], "n/a");
        assert_eq!(json["outcome"], "wasted");
    }

    #[test]
    fn test_final_round_json_carries_banner() {
        let mut game = scripted([Move::Scissors, Move::Scissors, Move::Scissors]);
        game.play_round("rock").unwrap();
        game.play_round("rock").unwrap();
        let last = game.play_round("rock").unwrap();

        let json = serde_json::to_value(&last).unwrap();
        assert_eq!(json["game_over"], true);
        assert_eq!(json["final_result"], "User Wins!");
    }

    #[test]
    fn test_error_report_wire_shape() {
        let report = ErrorReport::from(RefereeError::GameOver);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["error"], "Game is already over.");
        assert_eq!(json["game_over"], true);
    }

    #[test]
    fn test_round_result_round_trips() {
        let mut game = scripted([Move::Bomb]);
        let result = game.play_round("paper").unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: RoundResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_move, result.user_move);
        assert_eq!(back.bot_move, result.bot_move);
        assert_eq!(back.outcome, result.outcome);
        assert_eq!(back.final_result, result.final_result);
    }
}
