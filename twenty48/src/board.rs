use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Direction, InvalidGrid, RandomSpawner, TileSpawner};

/// A single cell. 0 is empty, anything else is a power of two.
pub type Tile = u32;

/// The largest tile that fits in a [`Tile`]. It cannot merge any further.
pub const MAX_TILE: Tile = 1 << (Tile::BITS - 1);

/// The `(height, width)` of a regular game.
pub const DEFAULT_SIZE: (usize, usize) = (4, 4);

/// A rectangular grid of tiles, plus the source of newly spawned tiles.
///
/// The dimensions are fixed at construction. Two boards are equal when
/// their grids are, regardless of their spawners.
#[derive(Clone, Debug)]
pub struct Board<S = RandomSpawner> {
    /// Row-major, all rows have the same non-zero length.
    grid: Vec<Vec<Tile>>,
    spawner: S,
}

impl Board<RandomSpawner> {
    /// Creates a board with two random tiles on it, using an entropy-seeded RNG.
    ///
    /// Panics if `height` or `width` is zero.
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_spawner(height, width, RandomSpawner::from_entropy())
    }

    /// Like [`Self::new()`], but reproducible.
    pub fn seeded(height: usize, width: usize, seed: u64) -> Self {
        Self::with_spawner(height, width, RandomSpawner::seeded(seed))
    }

    /// Installs the given grid as-is, without the two initial tiles.
    ///
    /// Later moves spawn tiles as usual, with an entropy-seeded RNG. Use
    /// [`Board::from_grid_with_spawner()`] with [`NoSpawn`](crate::NoSpawn) for a board
    /// whose moves never spawn.
    pub fn from_grid<G, R>(grid: G) -> Result<Self, InvalidGrid>
    where
        G: IntoIterator<Item = R>,
        R: IntoIterator<Item = Tile>,
    {
        Self::from_grid_with_spawner(grid, RandomSpawner::from_entropy())
    }
}

impl Default for Board<RandomSpawner> {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE.0, DEFAULT_SIZE.1)
    }
}

impl<S: TileSpawner> Board<S> {
    /// Creates an empty `height` x `width` board and spawns two tiles on it.
    ///
    /// Panics if `height` or `width` is zero.
    pub fn with_spawner(height: usize, width: usize, spawner: S) -> Self {
        assert!(height > 0, "a board needs at least one row");
        assert!(width > 0, "a board needs at least one column");
        let mut board = Self {
            grid: vec![vec![0; width]; height],
            spawner,
        };
        for _ in 0..2 {
            board.spawn_random_tile();
        }
        board
    }

    /// Creates a board from explicit rows, without spawning any tiles.
    ///
    /// Fails on an empty grid, on rows of differing length and on cells that
    /// are neither 0 nor a power of two of at least 2.
    pub fn from_grid_with_spawner<G, R>(grid: G, spawner: S) -> Result<Self, InvalidGrid>
    where
        G: IntoIterator<Item = R>,
        R: IntoIterator<Item = Tile>,
    {
        let grid: Vec<Vec<Tile>> = grid
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();
        let width = grid.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(InvalidGrid::Empty);
        }
        for (i, row) in grid.iter().enumerate() {
            if row.len() != width {
                return Err(InvalidGrid::RaggedRow {
                    row: i,
                    expected_len: width,
                    found_len: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if value != 0 && (value < 2 || !value.is_power_of_two()) {
                    return Err(InvalidGrid::InvalidTile { row: i, col: j, value });
                }
            }
        }
        Ok(Self { grid, spawner })
    }

    /// Keeps the grid, but spawns tiles with `spawner` from now on.
    pub fn with_new_spawner<T: TileSpawner>(self, spawner: T) -> Board<T> {
        Board {
            grid: self.grid,
            spawner,
        }
    }

    /// `(height, width)`
    pub fn size(&self) -> (usize, usize) {
        (self.grid.len(), self.grid[0].len())
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.grid
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.grid.get(row)?.get(col).copied()
    }

    /// The number of non-empty cells.
    pub fn tile_count(&self) -> usize {
        self.tiles().filter(|&tile| tile != 0).count()
    }

    /// The largest tile on the board, or 0 if it is empty.
    pub fn max_tile(&self) -> Tile {
        self.tiles().max().unwrap_or(0)
    }

    /// The coordinates of all empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.grid
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &tile)| tile == 0)
                    .map(move |(j, _)| (i, j))
            })
            .collect()
    }

    /// Is there anything left to do?
    ///
    /// True if there is an empty cell, or two horizontally or vertically
    /// adjacent cells with the same value (below [`MAX_TILE`]).
    pub fn has_legal_moves(&self) -> bool {
        self.tiles().any(|tile| tile == 0) || self.has_adjacent_equal_tiles()
    }

    /// Would moving in this direction change anything?
    ///
    /// Unlike the move itself, this does not touch the board or the spawner.
    pub fn can_move(&self, direction: Direction) -> bool {
        let mut grid = self.grid.clone();
        shift_grid(&mut grid, direction)
    }

    /// Slides and merges all tiles in `direction`.
    ///
    /// If anything moved, a new tile is spawned afterwards. Returns whether
    /// anything moved.
    pub fn make_move(&mut self, direction: Direction) -> bool {
        if !self.has_legal_moves() {
            return false;
        }
        let moved = shift_grid(&mut self.grid, direction);
        if moved {
            self.spawn_random_tile();
        }
        moved
    }

    pub fn move_left(&mut self) -> bool {
        self.make_move(Direction::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.make_move(Direction::Right)
    }

    pub fn move_up(&mut self) -> bool {
        self.make_move(Direction::Up)
    }

    pub fn move_down(&mut self) -> bool {
        self.make_move(Direction::Down)
    }

    /// Asks the spawner for a new tile in one of the empty cells.
    ///
    /// Does nothing when the board is full. Returns whether a tile was placed.
    pub fn spawn_random_tile(&mut self) -> bool {
        let empty_cells = self.empty_cells();
        if empty_cells.is_empty() {
            return false;
        }
        match self.spawner.spawn(&empty_cells) {
            Some(((i, j), value)) => {
                debug_assert_eq!(self.grid[i][j], 0);
                self.grid[i][j] = value;
                true
            }
            None => false,
        }
    }

    fn has_adjacent_equal_tiles(&self) -> bool {
        let in_rows = self
            .grid
            .iter()
            .any(|row| row.windows(2).any(|pair| merge(pair[0], pair[1]).is_some()));
        let in_columns = self.grid.windows(2).any(|rows| {
            rows[0]
                .iter()
                .zip(&rows[1])
                .any(|(&upper, &lower)| merge(upper, lower).is_some())
        });
        in_rows || in_columns
    }

    fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.grid.iter().flatten().copied()
    }
}

impl<S, T> PartialEq<Board<T>> for Board<S> {
    fn eq(&self, other: &Board<T>) -> bool {
        self.grid == other.grid
    }
}

impl<S> Eq for Board<S> {}

/// A board serializes as its list of rows.
impl<S> Serialize for Board<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.grid.serialize(serializer)
    }
}

/// Goes through the same validation as [`Board::from_grid()`], and uses
/// the spawner's default.
impl<'de, S: TileSpawner + Default> Deserialize<'de> for Board<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grid = Vec::<Vec<Tile>>::deserialize(deserializer)?;
        Board::from_grid_with_spawner(grid, S::default()).map_err(serde::de::Error::custom)
    }
}

/// Slides all tiles of `row` towards index 0, merging equal neighbors.
///
/// Each tile takes part in at most one merge, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]`, not `[8, 0, 0, 0]`. Returns whether any tile moved or merged.
///
/// Two [`MAX_TILE`]s do not merge, since their sum does not fit in a [`Tile`].
pub fn compact_row_left(row: &mut [Tile]) -> bool {
    let mut changed = false;
    // `slow` is the cell being filled, `fast` looks for the next tile to put there.
    let mut slow = 0;
    let mut fast = 1;
    while fast < row.len() {
        let (anchor, next) = (row[slow], row[fast]);
        if anchor != 0 && next != 0 {
            if let Some(merged) = merge(anchor, next) {
                row[slow] = merged;
                row[fast] = 0;
                changed = true;
            }
            // Either way, `slow` is final now. The cells between it and
            // `fast` are all empty.
            slow += 1;
            fast = slow;
        } else if next != 0 {
            row[slow] = next;
            row[fast] = 0;
            changed = true;
        }
        fast += 1;
    }
    changed
}

fn merge(a: Tile, b: Tile) -> Option<Tile> {
    if a != 0 && a == b {
        a.checked_mul(2)
    } else {
        None
    }
}

// Every direction is a left move on a reversed and/or transposed grid.
fn shift_grid(grid: &mut Vec<Vec<Tile>>, direction: Direction) -> bool {
    if direction.is_vertical() {
        *grid = transpose(grid);
    }
    let mut moved = false;
    for row in grid.iter_mut() {
        if direction.is_reversed() {
            row.reverse();
        }
        moved |= compact_row_left(row);
        if direction.is_reversed() {
            row.reverse();
        }
    }
    if direction.is_vertical() {
        *grid = transpose(grid);
    }
    moved
}

fn transpose(grid: &[Vec<Tile>]) -> Vec<Vec<Tile>> {
    let width = grid.first().map_or(0, Vec::len);
    (0..width)
        .map(|j| grid.iter().map(|row| row[j]).collect())
        .collect()
}
