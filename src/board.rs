use std::fmt;

use rand::Rng;

use crate::direction::{Direction, Directions};
use crate::error::{CorruptState, GameError, GameResult};
use crate::types::{Cell, Color, Position, WinnerSummary};

pub const BOARD_SIZE: usize = 8;
pub const GRID_WIDTH: usize = BOARD_SIZE + 2;
pub const GRID_CELLS: usize = GRID_WIDTH * GRID_WIDTH;

/// What playing on one cell would capture for the current mover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mobility {
    pub directions: Directions,
    pub captures: u8,
}

impl Mobility {
    pub fn is_legal(&self) -> bool {
        !self.directions.is_empty()
    }
}

/// Othello board on a 10x10 grid whose outer ring is always [`Cell::Wall`].
///
/// Cell `(x, y)` is stored at `x * 10 + y`. Mobility for the current mover is
/// recomputed after every mutation, so reads never trigger move generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; GRID_CELLS],
    turn: u32,
    mover: Color,
    mobility: [Mobility; GRID_CELLS],
    legal_count: u8,
}

impl Board {
    /// Creates the initial board:
    /// (4,4)=white, (5,5)=white, (4,5)=black, (5,4)=black.
    pub fn new(first_mover: Color) -> Self {
        let mut cells = [Cell::Empty; GRID_CELLS];
        for (index, cell) in cells.iter_mut().enumerate() {
            if is_border(index) {
                *cell = Cell::Wall;
            }
        }
        cells[index_of(4, 4)] = Cell::WHITE;
        cells[index_of(5, 5)] = Cell::WHITE;
        cells[index_of(4, 5)] = Cell::BLACK;
        cells[index_of(5, 4)] = Cell::BLACK;

        Self::with_cells(cells, 0, first_mover)
    }

    /// Creates the initial board with the first mover drawn from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first_mover = if rng.random_bool(0.5) {
            Color::White
        } else {
            Color::Black
        };
        Self::new(first_mover)
    }

    /// Rebuilds a board from snapshot cell codes.
    ///
    /// Nothing is constructed unless the buffer holds exactly 100 valid codes,
    /// walls sit exactly on the border ring and `mover` is `+1` or `-1`.
    pub fn from_cells(turn: u32, mover: i8, codes: &[i8]) -> GameResult<Self> {
        if codes.len() != GRID_CELLS {
            return Err(CorruptState::WrongLength {
                expected: GRID_CELLS,
                actual: codes.len(),
            }
            .into());
        }

        let mut cells = [Cell::Empty; GRID_CELLS];
        for (index, (&code, cell)) in codes.iter().zip(cells.iter_mut()).enumerate() {
            *cell = Cell::from_code(code).ok_or(CorruptState::InvalidCellCode { index, code })?;
            if (*cell == Cell::Wall) != is_border(index) {
                return Err(CorruptState::WallLayout { index }.into());
            }
        }

        let mover = Color::from_code(mover).ok_or(CorruptState::InvalidMover(mover))?;
        Ok(Self::with_cells(cells, turn, mover))
    }

    /// Same as [`Board::from_cells`] for raw persisted bytes.
    pub fn from_bytes(turn: u32, mover: i8, bytes: &[u8]) -> GameResult<Self> {
        let codes: Vec<i8> = bytes.iter().map(|&b| b as i8).collect();
        Self::from_cells(turn, mover, &codes)
    }

    fn with_cells(cells: [Cell; GRID_CELLS], turn: u32, mover: Color) -> Self {
        let mut board = Self {
            cells,
            turn,
            mover,
            mobility: [Mobility::default(); GRID_CELLS],
            legal_count: 0,
        };
        board.refresh_mobility();
        board
    }

    /// Snapshot cell codes in `x * 10 + y` order.
    pub fn to_cells(&self) -> [i8; GRID_CELLS] {
        let mut codes = [0i8; GRID_CELLS];
        for (code, cell) in codes.iter_mut().zip(self.cells.iter()) {
            *code = cell.code();
        }
        codes
    }

    /// Snapshot cells as raw bytes (two's complement codes).
    pub fn to_bytes(&self) -> [u8; GRID_CELLS] {
        self.to_cells().map(|code| code as u8)
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn mover(&self) -> Color {
        self.mover
    }

    /// Cell at grid coordinates, walls included (`0..=9`).
    pub fn cell(&self, x: u8, y: u8) -> Cell {
        if x as usize >= GRID_WIDTH || y as usize >= GRID_WIDTH {
            return Cell::Wall;
        }
        self.cells[index_of(x, y)]
    }

    pub(crate) fn cells(&self) -> &[Cell; GRID_CELLS] {
        &self.cells
    }

    /// Mobility of `(x, y)` for the current mover. Off-board cells are never legal.
    pub fn mobility(&self, x: u8, y: u8) -> Mobility {
        if !in_range(x, y) {
            return Mobility::default();
        }
        self.mobility[index_of(x, y)]
    }

    pub fn is_legal(&self, x: u8, y: u8) -> bool {
        self.mobility(x, y).is_legal()
    }

    pub fn legal_move_count(&self) -> usize {
        self.legal_count as usize
    }

    pub fn has_legal_moves(&self) -> bool {
        self.legal_count > 0
    }

    /// Legal cells for the current mover, by increasing column then row.
    pub fn legal_positions(&self) -> impl Iterator<Item = Position> + '_ {
        interior()
            .filter(move |p| self.mobility[index_of(p.x, p.y)].is_legal())
    }

    /// Plays `(x, y)` for the current mover.
    ///
    /// On success the mover switches, unless the opponent has no reply while
    /// the game goes on, in which case the same color moves again. Returns the
    /// mobility that was consumed by the move.
    pub fn apply_move(&mut self, x: u8, y: u8) -> GameResult<Mobility> {
        let mobility = self.mobility(x, y);
        if !mobility.is_legal() {
            return Err(GameError::InvalidMove { x, y });
        }

        let origin = index_of(x, y);
        let own = Cell::Disc(self.mover);
        let opp = Cell::Disc(self.mover.opponent());
        self.cells[origin] = own;
        for direction in mobility.directions.iter() {
            let mut index = offset(origin, direction.step());
            while self.cells[index] == opp {
                self.cells[index] = own;
                index = offset(index, direction.step());
            }
        }

        self.turn = self.turn.saturating_add(1);
        self.mover = self.mover.opponent();
        self.refresh_mobility();
        self.pass_if_stuck();

        Ok(mobility)
    }

    /// Hands the move back to the opponent when the mover has no legal move
    /// but the game is not over. Returns whether a pass happened.
    pub fn pass_if_stuck(&mut self) -> bool {
        if self.legal_count > 0 || self.is_terminal() {
            return false;
        }
        self.mover = self.mover.opponent();
        self.refresh_mobility();
        true
    }

    /// True when neither color can move on the current grid.
    pub fn is_terminal(&self) -> bool {
        self.legal_count == 0 && !self.any_mobility(self.mover.opponent())
    }

    /// Returns `(white_count, black_count)`.
    pub fn disc_counts(&self) -> (u8, u8) {
        let mut white = 0u8;
        let mut black = 0u8;
        for cell in &self.cells {
            match cell {
                Cell::Disc(Color::White) => white += 1,
                Cell::Disc(Color::Black) => black += 1,
                _ => {}
            }
        }
        (white, black)
    }

    pub fn empty_count(&self) -> u8 {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count() as u8
    }

    pub fn winner_summary(&self) -> WinnerSummary {
        let (white, black) = self.disc_counts();
        WinnerSummary::from_counts(white, black)
    }

    fn refresh_mobility(&mut self) {
        let mut legal_count = 0u8;
        for p in interior() {
            let index = index_of(p.x, p.y);
            let mobility = self.scan(index, self.mover);
            if mobility.is_legal() {
                legal_count += 1;
            }
            self.mobility[index] = mobility;
        }
        self.legal_count = legal_count;
    }

    fn any_mobility(&self, color: Color) -> bool {
        interior().any(|p| self.scan(index_of(p.x, p.y), color).is_legal())
    }

    /// Walks every direction from an empty cell. A direction counts only when
    /// a run of opponent discs is closed by one of `color`'s discs; the wall
    /// ring stops every scan.
    fn scan(&self, origin: usize, color: Color) -> Mobility {
        let mut mobility = Mobility::default();
        if self.cells[origin] != Cell::Empty {
            return mobility;
        }

        let own = Cell::Disc(color);
        let opp = Cell::Disc(color.opponent());
        for direction in Direction::ALL {
            let mut index = offset(origin, direction.step());
            let mut run = 0u8;
            while self.cells[index] == opp {
                run += 1;
                index = offset(index, direction.step());
            }
            if run > 0 && self.cells[index] == own {
                mobility.directions |= direction;
                mobility.captures += run;
            }
        }
        mobility
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for y in 1..=BOARD_SIZE as u8 {
            write!(f, "{y}")?;
            for x in 1..=BOARD_SIZE as u8 {
                let glyph = match self.cell(x, y) {
                    Cell::Disc(Color::White) => 'O',
                    Cell::Disc(Color::Black) => 'X',
                    Cell::Empty => '.',
                    Cell::Wall => '#',
                };
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        let (white, black) = self.disc_counts();
        write!(
            f,
            "O: {white}, X: {black}, turn {}, to move: {:?}",
            self.turn, self.mover
        )
    }
}

pub(crate) fn index_of(x: u8, y: u8) -> usize {
    x as usize * GRID_WIDTH + y as usize
}

fn offset(index: usize, step: isize) -> usize {
    index.wrapping_add_signed(step)
}

fn in_range(x: u8, y: u8) -> bool {
    (1..=BOARD_SIZE as u8).contains(&x) && (1..=BOARD_SIZE as u8).contains(&y)
}

fn is_border(index: usize) -> bool {
    let (x, y) = (index / GRID_WIDTH, index % GRID_WIDTH);
    x == 0 || y == 0 || x == GRID_WIDTH - 1 || y == GRID_WIDTH - 1
}

/// Interior positions by increasing column, then row.
fn interior() -> impl Iterator<Item = Position> {
    (1..=BOARD_SIZE as u8).flat_map(|x| (1..=BOARD_SIZE as u8).map(move |y| Position::new(x, y)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Builds snapshot codes from eight rows (`y = 1..=8`), one char per
    /// column: `O` white, `X` black, anything else empty.
    pub(crate) fn layout(rows: [&str; 8]) -> [i8; GRID_CELLS] {
        let mut codes = [0i8; GRID_CELLS];
        for (index, code) in codes.iter_mut().enumerate() {
            if is_border(index) {
                *code = Cell::Wall.code();
            }
        }
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let code = match ch {
                    'O' => 1,
                    'X' => -1,
                    _ => 0,
                };
                codes[index_of(col as u8 + 1, row as u8 + 1)] = code;
            }
        }
        codes
    }

    pub(crate) fn board_from(rows: [&str; 8], mover: Color, turn: u32) -> Board {
        Board::from_cells(turn, mover.code(), &layout(rows)).expect("test layout must be valid")
    }

    fn interior_total(board: &Board) -> usize {
        let (white, black) = board.disc_counts();
        white as usize + black as usize + board.empty_count() as usize
    }

    #[test]
    fn initial_board_has_walls_and_four_center_discs() {
        let board = Board::new(Color::White);

        assert_eq!(board.turn(), 0);
        assert_eq!(board.disc_counts(), (2, 2));
        assert_eq!(board.empty_count(), 60);
        assert_eq!(board.cell(4, 4), Cell::WHITE);
        assert_eq!(board.cell(5, 5), Cell::WHITE);
        assert_eq!(board.cell(4, 5), Cell::BLACK);
        assert_eq!(board.cell(5, 4), Cell::BLACK);
        for i in 0..GRID_WIDTH as u8 {
            assert_eq!(board.cell(0, i), Cell::Wall);
            assert_eq!(board.cell(9, i), Cell::Wall);
            assert_eq!(board.cell(i, 0), Cell::Wall);
            assert_eq!(board.cell(i, 9), Cell::Wall);
        }
    }

    #[test]
    fn opening_offers_four_single_captures() {
        for mover in [Color::White, Color::Black] {
            let board = Board::new(mover);
            let legal: Vec<_> = board.legal_positions().collect();

            assert_eq!(legal.len(), 4);
            assert_eq!(board.legal_move_count(), 4);
            for p in legal {
                let m = board.mobility(p.x, p.y);
                assert_eq!(m.captures, 1);
                assert_eq!(m.directions.len(), 1);
            }
        }
    }

    #[test]
    fn opening_moves_for_white_are_in_column_then_row_order() {
        let board = Board::new(Color::White);
        let legal: Vec<_> = board.legal_positions().collect();

        assert_eq!(
            legal,
            vec![
                Position::new(3, 5),
                Position::new(4, 6),
                Position::new(5, 3),
                Position::new(6, 4),
            ]
        );
    }

    #[test]
    fn apply_move_flips_and_switches_mover() {
        let mut board = Board::new(Color::White);

        let used = board.apply_move(5, 3).unwrap();

        assert_eq!(used.captures, 1);
        assert_eq!(board.cell(5, 3), Cell::WHITE);
        assert_eq!(board.cell(5, 4), Cell::WHITE);
        assert_eq!(board.disc_counts(), (4, 1));
        assert_eq!(board.turn(), 1);
        assert_eq!(board.mover(), Color::Black);
        assert!(board.has_legal_moves());
    }

    #[test]
    fn illegal_move_keeps_board_unchanged() {
        let mut board = Board::new(Color::Black);
        let before = board;

        for (x, y) in [(0, 0), (9, 4), (1, 1), (4, 4), (3, 3), (12, 200)] {
            let err = board.apply_move(x, y).unwrap_err();
            assert_eq!(err, GameError::InvalidMove { x, y });
            assert_eq!(board, before);
        }
    }

    #[test]
    fn auto_pass_returns_turn_to_the_same_mover() {
        let mut board = board_from(
            [
                "OX......", "........", "OX......", "........", "........", "........",
                "........", "........",
            ],
            Color::White,
            10,
        );

        board.apply_move(3, 1).unwrap();

        assert_eq!(board.mover(), Color::White);
        assert_eq!(board.turn(), 11);
        assert!(!board.is_terminal());
        assert_eq!(board.legal_positions().collect::<Vec<_>>(), vec![Position::new(3, 3)]);
    }

    #[test]
    fn no_moves_for_either_side_is_terminal() {
        let board = board_from(
            [
                "O......X", "........", "........", "........", "........", "........",
                "........", "........",
            ],
            Color::Black,
            7,
        );

        assert!(!board.has_legal_moves());
        assert!(board.is_terminal());
        let summary = board.winner_summary();
        assert_eq!((summary.white, summary.black), (1, 1));
        assert_eq!(summary.winner(), None);
    }

    #[test]
    fn full_board_tally_matches_hand_count() {
        let board = board_from(
            [
                "OOOOOOOO", "OOOOOOOO", "OOOOOOOO", "OOOOOOOO", "OOOOOOOO", "XXXXXXXX",
                "XXXXXXXX", "XXXXXXXX",
            ],
            Color::White,
            60,
        );

        assert!(board.is_terminal());
        let summary = board.winner_summary();
        assert_eq!((summary.white, summary.black), (40, 24));
        assert_eq!(summary.winner(), Some(Color::White));
    }

    #[test]
    fn mover_without_moves_is_not_terminal_when_opponent_can_move() {
        // Only reachable through a snapshot: black is stuck, white is not.
        let board = board_from(
            [
                "OX......", "........", "........", "........", "........", "........",
                "........", "........",
            ],
            Color::Black,
            3,
        );

        assert!(!board.has_legal_moves());
        assert!(!board.is_terminal());
    }

    #[test]
    fn pass_if_stuck_hands_the_move_to_the_opponent() {
        let mut board = board_from(
            [
                "OX......", "........", "........", "........", "........", "........",
                "........", "........",
            ],
            Color::Black,
            3,
        );

        assert!(board.pass_if_stuck());
        assert_eq!(board.mover(), Color::White);
        assert_eq!(board.turn(), 3);
        assert!(board.is_legal(3, 1));

        assert!(!board.pass_if_stuck());
        assert_eq!(board.mover(), Color::White);
    }

    #[test]
    fn pass_if_stuck_leaves_finished_games_alone() {
        let mut board = board_from(
            [
                "O......X", "........", "........", "........", "........", "........",
                "........", "........",
            ],
            Color::Black,
            7,
        );
        let before = board;

        assert!(!board.pass_if_stuck());
        assert_eq!(board, before);
    }

    #[test]
    fn turn_counter_saturates_on_loaded_boards() {
        let mut board =
            Board::from_cells(u32::MAX, Color::White.code(), &Board::new(Color::White).to_cells())
                .unwrap();

        board.apply_move(5, 3).unwrap();

        assert_eq!(board.turn(), u32::MAX);
        assert_eq!(board.mover(), Color::Black);
    }

    #[test]
    fn random_playouts_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x0BE1);

        for _ in 0..20 {
            let mut board = Board::random(&mut rng);
            while !board.is_terminal() {
                assert_eq!(interior_total(&board), 64);
                assert!(board.has_legal_moves());

                let legal: Vec<_> = board.legal_positions().collect();
                let p = legal[rng.random_range(0..legal.len())];
                let before = board;
                let mover = before.mover();
                let used = board.apply_move(p.x, p.y).unwrap();

                let count = |b: &Board, color: Color| {
                    let (white, black) = b.disc_counts();
                    match color {
                        Color::White => white as usize,
                        Color::Black => black as usize,
                    }
                };
                let captures = used.captures as usize;
                assert_eq!(count(&board, mover), count(&before, mover) + 1 + captures);
                assert_eq!(
                    count(&board, mover.opponent()),
                    count(&before, mover.opponent()) - captures
                );
                assert_eq!(board.turn(), before.turn() + 1);

                let mut flipped = 0;
                for q in interior() {
                    let (old, new) = (before.cell(q.x, q.y), board.cell(q.x, q.y));
                    if q == p {
                        assert_eq!(old, Cell::Empty);
                        assert_eq!(new, Cell::Disc(mover));
                    } else if old != new {
                        assert_eq!(old, Cell::Disc(mover.opponent()));
                        assert_eq!(new, Cell::Disc(mover));
                        flipped += 1;
                    }
                }
                assert_eq!(flipped, used.captures);
            }
            assert_eq!(interior_total(&board), 64);
        }
    }

    #[test]
    fn random_first_mover_is_reproducible() {
        let a = Board::random(&mut StdRng::seed_from_u64(42));
        let b = Board::random(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        let mut rng = StdRng::seed_from_u64(7);
        let movers: Vec<_> = (0..64).map(|_| Board::random(&mut rng).mover()).collect();
        assert!(movers.contains(&Color::White));
        assert!(movers.contains(&Color::Black));
    }

    #[test]
    fn cells_round_trip_through_snapshot() {
        let mut board = Board::new(Color::Black);
        board.apply_move(4, 3).unwrap();

        let restored = Board::from_cells(board.turn(), board.mover().code(), &board.to_cells()).unwrap();
        assert_eq!(restored, board);

        let from_bytes = Board::from_bytes(board.turn(), board.mover().code(), &board.to_bytes()).unwrap();
        assert_eq!(from_bytes, board);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        let err = Board::from_cells(0, 1, &[0i8; 99]).unwrap_err();
        assert_eq!(
            err,
            GameError::Corrupt(CorruptState::WrongLength {
                expected: 100,
                actual: 99
            })
        );
    }

    #[test]
    fn from_cells_rejects_invalid_codes() {
        let mut codes = Board::new(Color::White).to_cells();
        codes[index_of(2, 2)] = 3;

        let err = Board::from_cells(0, 1, &codes).unwrap_err();
        assert_eq!(
            err,
            GameError::Corrupt(CorruptState::InvalidCellCode { index: 22, code: 3 })
        );
    }

    #[test]
    fn from_cells_rejects_broken_wall_ring() {
        let mut codes = Board::new(Color::White).to_cells();
        codes[index_of(0, 5)] = 0;
        let err = Board::from_cells(0, 1, &codes).unwrap_err();
        assert_eq!(err, GameError::Corrupt(CorruptState::WallLayout { index: 5 }));

        let mut codes = Board::new(Color::White).to_cells();
        codes[index_of(3, 3)] = 2;
        let err = Board::from_cells(0, 1, &codes).unwrap_err();
        assert_eq!(err, GameError::Corrupt(CorruptState::WallLayout { index: 33 }));
    }

    #[test]
    fn from_cells_rejects_invalid_mover() {
        let codes = Board::new(Color::White).to_cells();
        let err = Board::from_cells(0, 0, &codes).unwrap_err();
        assert_eq!(err, GameError::Corrupt(CorruptState::InvalidMover(0)));
    }

    #[test]
    fn display_renders_rows_and_side_to_move() {
        let text = Board::new(Color::Black).to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[4], "4 . . . O X . . .");
        assert_eq!(lines[5], "5 . . . X O . . .");
        assert_eq!(lines[9], "O: 2, X: 2, turn 0, to move: Black");
    }
}
