use rand::Rng;
use serde::Serialize;

use crate::ai::{AlphaBetaEngine, EngineMove};
use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::{GameError, GameResult};
use crate::snapshot::Snapshot;
use crate::types::{Color, GameState, Position, WinnerSummary};

pub trait MoveSelector: Send + Sync {
    /// Picks a legal move for `board.mover()`, or `None` when there is none.
    fn select_move(&self, board: &Board) -> Option<EngineMove>;
}

impl MoveSelector for AlphaBetaEngine {
    fn select_move(&self, board: &Board) -> Option<EngineMove> {
        self.best_move(board)
    }
}

/// Plays the cell that flips the most discs, first by column then row on ties.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySelector;

impl MoveSelector for GreedySelector {
    fn select_move(&self, board: &Board) -> Option<EngineMove> {
        let mut best: Option<EngineMove> = None;
        for position in board.legal_positions() {
            let captures = board.mobility(position.x, position.y).captures as i32;
            if best.is_none_or(|b| captures > b.score) {
                best = Some(EngineMove {
                    position,
                    score: captures,
                    depth: 0,
                });
            }
        }
        best
    }
}

/// Starts a game with the first mover drawn from `rng`.
pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Board {
    Board::random(rng)
}

/// Rebuilds a persisted game. Fails with [`GameError::Corrupt`] without
/// building anything when the bytes do not describe a valid board.
pub fn load_game(turn: u32, mover: i8, bytes: &[u8]) -> GameResult<Board> {
    Board::from_bytes(turn, mover, bytes)
}

pub fn apply_human_move(board: &mut Board, x: u8, y: u8) -> GameResult<()> {
    board.apply_move(x, y).map(|_| ())
}

/// Lets `selector` choose for the current mover and plays the choice.
///
/// Callers must check [`is_game_over`] first; a mover without legal moves is
/// reported as [`GameError::NoLegalMoves`] and the board is left alone.
pub fn choose_engine_move<S: MoveSelector + ?Sized>(
    selector: &S,
    board: &mut Board,
) -> GameResult<EngineMove> {
    if !board.has_legal_moves() {
        return Err(GameError::NoLegalMoves);
    }

    let selected = selector
        .select_move(board)
        .ok_or(GameError::NoLegalMoves)?;
    board.apply_move(selected.position.x, selected.position.y)?;
    Ok(selected)
}

pub fn is_game_over(board: &Board) -> bool {
    board.is_terminal()
}

pub fn winner_summary(board: &Board) -> WinnerSummary {
    board.winner_summary()
}

/// What happened during one human turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub human_move: Position,
    /// Engine replies in order; several when the human had to pass.
    pub engine_moves: Vec<EngineMove>,
    pub is_game_over: bool,
}

/// One game between a human color and an engine.
pub struct GameSession {
    board: Board,
    human: Color,
    selector: Box<dyn MoveSelector>,
}

impl GameSession {
    /// A loaded board whose mover cannot play is passed to the other side
    /// first, so the session never waits on a player without moves.
    pub fn new(mut board: Board, human: Color, selector: Box<dyn MoveSelector>) -> Self {
        board.pass_if_stuck();
        Self {
            board,
            human,
            selector,
        }
    }

    pub fn with_engine(board: Board, human: Color, config: EngineConfig) -> Self {
        Self::new(board, human, Box::new(AlphaBetaEngine::new(config)))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_terminal()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_game_over() && self.board.mover() == self.human
    }

    /// Plays the human move, then lets the engine answer until the human is
    /// to move again or the game ends.
    pub fn place(&mut self, x: u8, y: u8) -> GameResult<TurnReport> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if self.board.mover() != self.human {
            return Err(GameError::NotYourTurn);
        }

        self.board.apply_move(x, y)?;
        let engine_moves = self.play_engine()?;

        Ok(TurnReport {
            human_move: Position::new(x, y),
            engine_moves,
            is_game_over: self.is_game_over(),
        })
    }

    /// Plays engine moves while it is the engine's turn. Returns them in order;
    /// empty when the human is already to move.
    pub fn play_engine(&mut self) -> GameResult<Vec<EngineMove>> {
        let mut moves = Vec::new();
        while !self.is_game_over() && self.board.mover() != self.human {
            moves.push(choose_engine_move(self.selector.as_ref(), &mut self.board)?);
        }
        Ok(moves)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.board)
    }

    pub fn to_game_state(&self) -> GameState {
        let (white_count, black_count) = self.board.disc_counts();
        GameState {
            cells: self.board.to_cells().to_vec(),
            turn: self.board.turn(),
            mover: self.board.mover(),
            white_count,
            black_count,
            is_game_over: self.is_game_over(),
            legal_moves: self.board.legal_positions().collect(),
        }
    }

    pub fn to_game_result(&self) -> WinnerSummary {
        self.board.winner_summary()
    }
}
