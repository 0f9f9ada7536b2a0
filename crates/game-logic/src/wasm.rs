//! WASM bindings for agent frontends
//!
//! Exposes one game session as a callable tool: a conversational agent
//! running in the browser forwards the user's raw text to `play_round` and
//! renders the structured result.

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::{ErrorReport, Move, RandomOpponent, Referee, SeededRng};

/// One game of Rock-Paper-Scissors-Plus behind the tool contract
#[wasm_bindgen]
pub struct GameSession {
    referee: Referee<RandomOpponent>,
}

#[wasm_bindgen]
impl GameSession {
    /// Start a fresh game. Same seed = same bot moves.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> GameSession {
        GameSession {
            referee: Referee::new(RandomOpponent::new(SeededRng::new(seed))),
        }
    }

    /// Play one round from raw user text.
    ///
    /// Returns the round result, or `{error, game_over: true}` when called
    /// after the game ended. Never throws for game conditions; only
    /// serialization failure maps to an exception.
    pub fn play_round(&mut self, user_move: &str) -> Result<JsValue, JsError> {
        match self.referee.play_round(user_move) {
            Ok(result) => serde_wasm_bindgen::to_value(&result)
                .map_err(|e| JsError::new(&format!("Serialization error: {}", e))),
            Err(err) => serde_wasm_bindgen::to_value(&ErrorReport::from(err))
                .map_err(|e| JsError::new(&format!("Serialization error: {}", e))),
        }
    }

    /// Play one round and return the result as a JSON string, for tool
    /// protocols that pass text instead of structured values.
    pub fn play_round_json(&mut self, user_move: &str) -> Result<String, JsError> {
        let encoded = match self.referee.play_round(user_move) {
            Ok(result) => serde_json::to_string(&result),
            Err(err) => serde_json::to_string(&ErrorReport::from(err)),
        };
        encoded.map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    pub fn game_over(&self) -> bool {
        self.referee.game_over()
    }

    /// Final banner string, or undefined while the game is still running
    pub fn final_result(&self) -> Option<String> {
        self.referee.final_result().map(|r| r.to_string())
    }

    /// Current score snapshot as `{user, bot}`
    pub fn scores(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.referee.scores())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }
}

#[derive(serde::Serialize)]
struct MoveInfo {
    id: String,
    name: String,
    description: String,
}

/// The four recognized moves with display names and rule text
#[wasm_bindgen]
pub fn get_move_catalog() -> Result<JsValue, JsError> {
    let moves: Vec<MoveInfo> = Move::ALL
        .into_iter()
        .map(|mv| MoveInfo {
            id: mv.as_str().to_string(),
            name: mv.title().to_string(),
            description: mv.describe().to_string(),
        })
        .collect();

    serde_wasm_bindgen::to_value(&moves)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
