use quickcheck::{Arbitrary, Gen};

use crate::{Direction, Tile};

/// A valid, non-empty grid of up to 5 x 5 cells.
#[derive(Clone, Debug)]
pub struct ArbitraryGrid(pub Vec<Vec<Tile>>);

/// A row of up to 8 valid tiles.
#[derive(Clone, Debug)]
pub struct ArbitraryRow(pub Vec<Tile>);

// About a third of the cells are empty, the rest are 2 to 64, so that
// full boards and merges both come up regularly.
fn arbitrary_tile(g: &mut Gen) -> Tile {
    let exponent = u8::arbitrary(g) % 9;
    if exponent < 3 {
        0
    } else {
        1 << (exponent - 2)
    }
}

impl Arbitrary for ArbitraryGrid {
    fn arbitrary(g: &mut Gen) -> Self {
        let height = usize::arbitrary(g) % 5 + 1;
        let width = usize::arbitrary(g) % 5 + 1;
        let grid = (0..height)
            .map(|_| (0..width).map(|_| arbitrary_tile(g)).collect())
            .collect();
        ArbitraryGrid(grid)
    }
}

impl Arbitrary for ArbitraryRow {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 9;
        ArbitraryRow((0..len).map(|_| arbitrary_tile(g)).collect())
    }
}

impl Arbitrary for Direction {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}
