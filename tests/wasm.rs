#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Object, Reflect};
use othello::bindings::{WasmGame, decode_record};
use othello::{Board, Color};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).expect("field must exist")
}

fn shallow_config() -> JsValue {
    let config = Object::new();
    Reflect::set(&config, &"max_depth".into(), &JsValue::from_f64(1.0)).unwrap();
    config.into()
}

#[wasm_bindgen_test]
fn new_game_hands_the_human_a_playable_position() {
    let game = WasmGame::new(11, JsValue::UNDEFINED).unwrap();

    assert!(!game.is_game_over());
    assert_eq!(game.mover(), Color::Black.code());
    let moves = Array::from(&game.legal_moves().unwrap());
    assert!(moves.length() > 0);
}

#[wasm_bindgen_test]
fn place_reports_human_and_engine_moves() {
    let board = Board::new(Color::Black);
    let mut game =
        WasmGame::load(board.turn(), board.mover().code(), &board.to_bytes(), shallow_config())
            .unwrap();

    let report = game.place(4, 3).unwrap();

    let human = get(&report, "human_move");
    assert_eq!(get(&human, "x").as_f64(), Some(4.0));
    assert_eq!(get(&human, "y").as_f64(), Some(3.0));
    assert_eq!(Array::from(&get(&report, "engine_moves")).length(), 1);
    assert_eq!(game.turn(), 2);
}

#[wasm_bindgen_test]
fn illegal_place_is_an_error() {
    let board = Board::new(Color::Black);
    let mut game =
        WasmGame::load(board.turn(), board.mover().code(), &board.to_bytes(), JsValue::NULL)
            .unwrap();

    let err = game.place(1, 1).unwrap_err();
    assert!(err.as_string().unwrap().contains("illegal move"));
}

#[wasm_bindgen_test]
fn record_round_trips_through_js() {
    let game = WasmGame::new(5, shallow_config()).unwrap();
    let record = game.to_record();

    let snapshot = decode_record(&record).unwrap();
    assert_eq!(get(&snapshot, "turn").as_f64(), Some(game.turn() as f64));

    let restored = WasmGame::from_record(&record, shallow_config()).unwrap();
    assert_eq!(restored.to_bytes(), game.to_bytes());
}

#[wasm_bindgen_test]
fn corrupt_load_is_rejected() {
    let err = WasmGame::load(0, 1, &[0u8; 10], JsValue::UNDEFINED).err().unwrap();
    assert!(err.as_string().unwrap().contains("corrupt state"));
}
