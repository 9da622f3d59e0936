use crate::Tile;

/// The error type for [`Board::from_grid()`](crate::Board::from_grid).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidGrid {
    /// There are no rows, or the rows have no cells.
    Empty,
    RaggedRow {
        row: usize,
        expected_len: usize,
        found_len: usize,
    },
    /// A cell is neither empty (0) nor a power of two of at least 2.
    InvalidTile { row: usize, col: usize, value: Tile },
}

impl std::error::Error for InvalidGrid {}

impl std::fmt::Display for InvalidGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidGrid::Empty => write!(f, "The grid must have at least one row and one column"),
            InvalidGrid::RaggedRow {
                row,
                expected_len,
                found_len,
            } => write!(
                f,
                "Row {} has {} cells, but the first row has {}",
                row, found_len, expected_len
            ),
            InvalidGrid::InvalidTile { row, col, value } => write!(
                f,
                "The tile at ({}, {}) is {}, which is neither 0 nor a power of two",
                row, col, value
            ),
        }
    }
}
