use serde::{Deserialize, Serialize};

/// One of the four directions the tiles can be pushed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Does this move work on columns rather than rows?
    ///
    /// Vertical moves are computed by transposing the grid, moving
    /// horizontally and transposing back.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Does this move push tiles towards the end of a row/column?
    ///
    /// Those moves are computed by reversing each line, moving
    /// towards the start and reversing back.
    pub fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facets_split_the_four_directions() {
        let vertical: Vec<_> = Direction::ALL.into_iter().filter(|d| d.is_vertical()).collect();
        let reversed: Vec<_> = Direction::ALL.into_iter().filter(|d| d.is_reversed()).collect();
        assert_eq!(vertical, vec![Direction::Up, Direction::Down]);
        assert_eq!(reversed, vec![Direction::Right, Direction::Down]);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::from_str::<Direction>("\"right\"").unwrap(),
            Direction::Right
        );
    }
}
