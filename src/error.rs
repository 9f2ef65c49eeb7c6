//! Error types for board and game operations.

/// Why a snapshot or record could not be turned into a board.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CorruptState {
    #[error("snapshot must hold {expected} cells, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("invalid cell code {code} at index {index}")]
    InvalidCellCode { index: usize, code: i8 },

    /// A border cell that is not a wall, or an interior cell that is.
    #[error("wall layout broken at index {index}")]
    WallLayout { index: usize },

    #[error("invalid mover code {0}")]
    InvalidMover(i8),

    #[error("invalid record magic (expected OTHS)")]
    BadMagic,

    #[error("unsupported record version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },

    #[error("record truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("record has {0} trailing bytes")]
    TrailingBytes(usize),

    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Out of range, occupied, or captures nothing. The board is untouched.
    #[error("illegal move at ({x}, {y})")]
    InvalidMove { x: u8, y: u8 },

    #[error("corrupt state: {0}")]
    Corrupt(#[from] CorruptState),

    #[error("game is already over")]
    GameOver,

    #[error("it is not the player's turn")]
    NotYourTurn,

    #[error("current mover has no legal moves")]
    NoLegalMoves,
}

pub type GameResult<T> = Result<T, GameError>;
