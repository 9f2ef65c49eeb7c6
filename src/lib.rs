use wasm_bindgen::prelude::*;

pub mod ai;
pub mod bindings;
pub mod board;
pub mod config;
pub mod direction;
pub mod error;
pub mod game;
pub mod snapshot;
pub mod types;

pub use board::Board;
pub use config::EngineConfig;
pub use error::{CorruptState, GameError};
pub use game::{
    apply_human_move, choose_engine_move, is_game_over, load_game, new_game, winner_summary,
};
pub use types::{Cell, Color, Position, WinnerSummary};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
