//! JavaScript surface. The human always plays Black, the engine White.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::GameError;
use crate::game::GameSession;
use crate::snapshot::{Snapshot, load_record};
use crate::types::Color;

const HUMAN: Color = Color::Black;

#[wasm_bindgen]
pub struct WasmGame {
    session: GameSession,
}

#[wasm_bindgen]
impl WasmGame {
    /// Starts a new game. The first mover is drawn from `seed`; when the
    /// engine opens, its first move is already played.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, config: JsValue) -> Result<WasmGame, JsValue> {
        let board = Board::random(&mut StdRng::seed_from_u64(seed));
        Self::start(board, config)
    }

    /// Resumes a persisted game from its snapshot triple.
    pub fn load(turn: u32, mover: i8, cells: &[u8], config: JsValue) -> Result<WasmGame, JsValue> {
        let board = Board::from_bytes(turn, mover, cells).map_err(to_js_error)?;
        Self::start(board, config)
    }

    /// Resumes a persisted game from a framed record.
    #[wasm_bindgen(js_name = fromRecord)]
    pub fn from_record(record: &[u8], config: JsValue) -> Result<WasmGame, JsValue> {
        let board = load_record(record).map_err(to_js_error)?;
        Self::start(board, config)
    }

    /// Human move followed by the engine's replies. Returns a `TurnReport`.
    pub fn place(&mut self, x: u8, y: u8) -> Result<JsValue, JsValue> {
        let report = self.session.place(x, y).map_err(to_js_error)?;
        to_js(&report)
    }

    /// Lets the engine move if it is its turn. Returns the moves played.
    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        let moves = self.session.play_engine().map_err(to_js_error)?;
        to_js(&moves)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.to_game_state())
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.to_game_result())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        let moves: Vec<_> = self.session.board().legal_positions().collect();
        to_js(&moves)
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    pub fn turn(&self) -> u32 {
        self.session.board().turn()
    }

    pub fn mover(&self) -> i8 {
        self.session.board().mover().code()
    }

    /// Raw 100-byte cell snapshot.
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.session.board().to_bytes().to_vec()
    }

    #[wasm_bindgen(js_name = toRecord)]
    pub fn to_record(&self) -> Vec<u8> {
        self.session.snapshot().encode()
    }

    #[wasm_bindgen(js_name = toText)]
    pub fn to_text(&self) -> String {
        self.session.board().to_string()
    }
}

impl WasmGame {
    fn start(board: Board, config: JsValue) -> Result<WasmGame, JsValue> {
        let config = parse_config(config)?;
        let mut session = GameSession::with_engine(board, HUMAN, config);
        session.play_engine().map_err(to_js_error)?;
        Ok(WasmGame { session })
    }
}

/// Snapshot of an arbitrary board for hosts that keep their own storage.
#[wasm_bindgen(js_name = decodeRecord)]
pub fn decode_record(record: &[u8]) -> Result<JsValue, JsValue> {
    let snapshot = Snapshot::decode(record).map_err(|e| to_js_error(e.into()))?;
    to_js(&snapshot)
}

fn parse_config(value: JsValue) -> Result<EngineConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EngineConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

fn to_js_error(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
