//! Byte-level board snapshots for persistence collaborators.
//!
//! A [`Snapshot`] is the raw triple a store keeps (turn, mover, 100 cell
//! codes). [`Snapshot::encode`] frames it as a self-checking record:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | magic `OTHS` |
//! | 4 | 4 | version (u32 LE) |
//! | 8 | 4 | turn (u32 LE) |
//! | 12 | 1 | mover (i8) |
//! | 13 | 3 | reserved, zero |
//! | 16 | 4 | CRC32 of the cell bytes (u32 LE) |
//! | 20 | 100 | cell codes |

use serde::{Deserialize, Serialize};

use crate::board::{Board, GRID_CELLS};
use crate::error::{CorruptState, GameResult};

const MAGIC: &[u8; 4] = b"OTHS";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 20;
pub const RECORD_SIZE: usize = HEADER_SIZE + GRID_CELLS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub turn: u32,
    pub mover: i8,
    pub cells: Vec<i8>,
}

impl Snapshot {
    pub fn of(board: &Board) -> Self {
        Self {
            turn: board.turn(),
            mover: board.mover().code(),
            cells: board.to_cells().to_vec(),
        }
    }

    /// Validates and rebuilds the board.
    pub fn restore(&self) -> GameResult<Board> {
        Board::from_cells(self.turn, self.mover, &self.cells)
    }

    pub fn encode(&self) -> Vec<u8> {
        let payload: Vec<u8> = self.cells.iter().map(|&c| c as u8).collect();

        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&self.turn.to_le_bytes());
        out.push(self.mover as u8);
        out.extend_from_slice(&[0u8; 3]);
        out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    /// Parses a record produced by [`Snapshot::encode`]. Only the framing is
    /// checked here; [`Snapshot::restore`] validates the cells.
    pub fn decode(data: &[u8]) -> Result<Self, CorruptState> {
        if data.len() < RECORD_SIZE {
            return Err(CorruptState::Truncated {
                expected: RECORD_SIZE,
                actual: data.len(),
            });
        }

        if &data[0..4] != MAGIC {
            return Err(CorruptState::BadMagic);
        }

        let version = read_u32_le(data, 4);
        if version != VERSION {
            return Err(CorruptState::UnsupportedVersion {
                expected: VERSION,
                actual: version,
            });
        }

        if data.len() > RECORD_SIZE {
            return Err(CorruptState::TrailingBytes(data.len() - RECORD_SIZE));
        }

        let turn = read_u32_le(data, 8);
        let mover = data[12] as i8;
        let expected_crc = read_u32_le(data, 16);
        let payload = &data[HEADER_SIZE..];

        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(CorruptState::ChecksumMismatch {
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        Ok(Self {
            turn,
            mover,
            cells: payload.iter().map(|&b| b as i8).collect(),
        })
    }
}

/// Decodes and validates a record in one step.
pub fn load_record(data: &[u8]) -> GameResult<Board> {
    Snapshot::decode(data)?.restore()
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}
