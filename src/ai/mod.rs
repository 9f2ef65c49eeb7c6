pub mod engine;
pub mod eval;
pub mod search;

pub use engine::{AlphaBetaEngine, EngineMove};
