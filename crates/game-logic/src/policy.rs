//! Opponent move selection

use crate::moves::Move;
use crate::random::SeededRng;

/// Percent chance the bot plays its bomb while it is still available
pub const BOMB_CHANCE_PERCENT: u8 = 10;

/// Source of the automated opponent's moves.
///
/// A trait seam so the referee's only nondeterminism is injectable and games
/// can be replayed move-for-move in tests.
pub trait OpponentPolicy {
    /// Pick the opponent's move for one round.
    ///
    /// `bomb_already_used` is true once the opponent has spent its bomb;
    /// implementations must not return [`Move::Bomb`] when it is set.
    fn choose_move(&mut self, bomb_already_used: bool) -> Move;
}

/// Production policy: 10% chance to bomb while available, otherwise a
/// uniformly random standard move.
#[derive(Clone, Debug)]
pub struct RandomOpponent {
    rng: SeededRng,
}

impl RandomOpponent {
    /// Build from an existing RNG
    pub fn new(rng: SeededRng) -> Self {
        Self { rng }
    }

    /// Build from a bare seed
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SeededRng::new(seed))
    }
}

impl OpponentPolicy for RandomOpponent {
    fn choose_move(&mut self, bomb_already_used: bool) -> Move {
        if !bomb_already_used && self.rng.next_percent() < BOMB_CHANCE_PERCENT {
            return Move::Bomb;
        }
        Move::BASIC[self.rng.next_range(Move::BASIC.len() as u32) as usize]
    }
}

/// Plays a fixed move sequence, repeating the final move once exhausted.
///
/// Ignores the bomb flag; rule enforcement stays in the referee. Used for
/// deterministic replay in tests.
#[derive(Clone, Debug)]
pub struct ScriptedOpponent {
    moves: Vec<Move>,
    next: usize,
}

impl ScriptedOpponent {
    /// Script the given sequence; an empty script plays rock forever.
    pub fn new(moves: impl Into<Vec<Move>>) -> Self {
        Self {
            moves: moves.into(),
            next: 0,
        }
    }
}

impl OpponentPolicy for ScriptedOpponent {
    fn choose_move(&mut self, _bomb_already_used: bool) -> Move {
        let mv = self
            .moves
            .get(self.next)
            .or_else(|| self.moves.last())
            .copied()
            .unwrap_or(Move::Rock);
        if self.next < self.moves.len() {
            self.next += 1;
        }
        mv
    }
}
