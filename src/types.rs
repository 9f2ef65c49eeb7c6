use serde::{Deserialize, Serialize};

/// A disc color. White moves as Mover-A (`+1`), Black as Mover-B (`-1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Snapshot byte for this color.
    pub fn code(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            1 => Some(Self::White),
            -1 => Some(Self::Black),
            _ => None,
        }
    }
}

/// Contents of one grid cell, including the sentinel ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Disc(Color),
    Wall,
}

impl Cell {
    pub const WHITE: Cell = Cell::Disc(Color::White);
    pub const BLACK: Cell = Cell::Disc(Color::Black);

    pub fn code(self) -> i8 {
        match self {
            Self::Empty => 0,
            Self::Disc(color) => color.code(),
            Self::Wall => 2,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            2 => Some(Self::Wall),
            _ => Color::from_code(code).map(Self::Disc),
        }
    }

    pub fn is(self, color: Color) -> bool {
        self == Self::Disc(color)
    }
}

/// A playable coordinate. `x` is the column and `y` the row, both 1..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Draw,
    WhiteWins,
    BlackWins,
}

/// Disc tally and result of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinnerSummary {
    pub white: u8,
    pub black: u8,
    pub outcome: Outcome,
}

impl WinnerSummary {
    pub fn from_counts(white: u8, black: u8) -> Self {
        let outcome = if white > black {
            Outcome::WhiteWins
        } else if black > white {
            Outcome::BlackWins
        } else {
            Outcome::Draw
        };
        Self {
            white,
            black,
            outcome,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self.outcome {
            Outcome::WhiteWins => Some(Color::White),
            Outcome::BlackWins => Some(Color::Black),
            Outcome::Draw => None,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Snapshot bytes, see [`crate::board::Board::to_cells`].
    pub cells: Vec<i8>,
    pub turn: u32,
    pub mover: Color,
    pub white_count: u8,
    pub black_count: u8,
    pub is_game_over: bool,
    pub legal_moves: Vec<Position>,
}
