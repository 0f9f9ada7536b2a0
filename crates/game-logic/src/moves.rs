//! Move vocabulary and input normalization

use serde::{Deserialize, Serialize};

/// A move in Rock-Paper-Scissors-Plus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Bomb,
}

impl Move {
    /// The three standard moves (bomb excluded)
    pub const BASIC: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Full move vocabulary
    pub const ALL: [Move; 4] = [Move::Rock, Move::Paper, Move::Scissors, Move::Bomb];

    /// Canonical lowercase form
    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Bomb => "bomb",
        }
    }

    /// Title-case form for round explanations
    pub fn title(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
            Move::Bomb => "Bomb",
        }
    }

    /// One-line rule description (shell greeting, frontend move catalogs)
    pub fn describe(self) -> &'static str {
        match self {
            Move::Rock => "Beats scissors, loses to paper.",
            Move::Paper => "Beats rock, loses to scissors.",
            Move::Scissors => "Beats paper, loses to rock.",
            Move::Bomb => "Beats everything, usable only once per game.",
        }
    }
}

impl core::fmt::Display for Move {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acceptance threshold for fuzzy matching (normalized edit-distance ratio)
pub const FUZZY_THRESHOLD: f64 = 0.6;

/// Result of normalizing raw user text
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Normalized {
    /// Text matched a canonical move exactly (after trim + lowercase)
    Exact(Move),
    /// Text was close enough to a canonical move to auto-correct
    Corrected(Move),
    /// Text matched nothing; carries the normalized text for error messages
    Unrecognized(String),
}

/// Map raw user text to a canonical move.
///
/// Case and surrounding whitespace are insignificant. Exact vocabulary
/// matches win; otherwise the single closest entry by normalized Levenshtein
/// ratio is accepted at [`FUZZY_THRESHOLD`] or above. Pure and total: any
/// text yields one of the three [`Normalized`] forms.
pub fn normalize(raw: &str) -> Normalized {
    let text = raw.trim().to_lowercase();

    if let Some(mv) = Move::ALL.into_iter().find(|m| m.as_str() == text) {
        return Normalized::Exact(mv);
    }

    let best = Move::ALL
        .into_iter()
        .map(|m| (m, strsim::normalized_levenshtein(&text, m.as_str())))
        .max_by(|a, b| a.1.total_cmp(&b.1));

    match best {
        Some((mv, score)) if score >= FUZZY_THRESHOLD => Normalized::Corrected(mv),
        _ => Normalized::Unrecognized(text),
    }
}
