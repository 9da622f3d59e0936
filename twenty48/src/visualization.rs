use std::fmt;

use crate::{Board, TileSpawner};

/// How an empty cell is drawn.
pub const EMPTY_CELL: &str = ".";

/// One line per row, with every label centered in a column as wide as
/// the largest tile on the board.
impl<S: TileSpawner> fmt::Display for Board<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column_width = self.max_tile().to_string().len();
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &tile) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                let label = match tile {
                    0 => EMPTY_CELL.to_string(),
                    _ => tile.to_string(),
                };
                write!(f, "{:^width$}", label, width = column_width)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Board;

    #[test]
    fn pads_to_the_widest_tile() {
        let board = Board::from_grid([[2, 0, 0], [0, 128, 16]]).unwrap();
        assert_eq!(board.to_string(), " 2   .   . \n .  128 16 ");
    }

    #[test]
    fn single_digits_are_not_padded() {
        let board = Board::from_grid([[2, 4], [0, 8]]).unwrap();
        assert_eq!(board.to_string(), "2 4\n. 8");
    }

    #[test]
    fn empty_board_is_all_dots() {
        let board = Board::from_grid([[0, 0], [0, 0]]).unwrap();
        assert_eq!(board.to_string(), ". .\n. .");
    }
}
