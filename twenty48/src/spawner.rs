use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::Tile;

/// The probability that a spawned tile is a 4 rather than a 2.
pub const CHANCE_OF_FOUR: f64 = 0.1;

/// Decides where a new tile appears after a move, and what its value is.
///
/// Implement this to make spawning deterministic in tests, or use [`NoSpawn`]
/// to switch it off entirely.
pub trait TileSpawner {
    /// Picks one of `empty_cells` (as `(row, col)` pairs) and the value to put there.
    ///
    /// `empty_cells` is never empty. Returning `None` leaves the board as it is.
    fn spawn(&mut self, empty_cells: &[(usize, usize)]) -> Option<((usize, usize), Tile)>;
}

/// The regular spawning rule: a uniformly chosen empty cell gets
/// a 2, or a 4 with probability [`CHANCE_OF_FOUR`].
#[derive(Clone, Debug)]
pub struct RandomSpawner<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSpawner<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomSpawner<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> TileSpawner for RandomSpawner<R> {
    fn spawn(&mut self, empty_cells: &[(usize, usize)]) -> Option<((usize, usize), Tile)> {
        let &cell = empty_cells.choose(&mut self.rng)?;
        let value = if self.rng.gen_bool(CHANCE_OF_FOUR) { 4 } else { 2 };
        Some((cell, value))
    }
}

/// A spawner that never places anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoSpawn;

impl TileSpawner for NoSpawn {
    fn spawn(&mut self, _empty_cells: &[(usize, usize)]) -> Option<((usize, usize), Tile)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn spawns_mostly_twos() {
        let mut spawner = RandomSpawner::seeded(42);
        let mut fours = 0;
        for _ in 0..2000 {
            let (cell, value) = spawner.spawn(&[(1, 2)]).unwrap();
            assert_eq!(cell, (1, 2));
            match value {
                2 => {}
                4 => fours += 1,
                other => panic!("spawned a {}", other),
            }
        }
        // Expected value is 200
        assert!((120..280).contains(&fours), "{} fours", fours);
    }

    #[test]
    fn reaches_every_empty_cell() {
        let mut spawner = RandomSpawner::seeded(7);
        let empty_cells = [(0, 0), (0, 3), (2, 1), (3, 3)];
        let hit: BTreeSet<_> = (0..200)
            .map(|_| spawner.spawn(&empty_cells).unwrap().0)
            .collect();
        assert_eq!(hit, BTreeSet::from(empty_cells));
    }

    #[test]
    fn same_seed_same_spawns() {
        let empty_cells = [(0, 0), (0, 1), (1, 0), (1, 1)];
        let mut a = RandomSpawner::seeded(3);
        let mut b = RandomSpawner::seeded(3);
        for _ in 0..20 {
            assert_eq!(a.spawn(&empty_cells), b.spawn(&empty_cells));
        }
    }

    #[test]
    fn no_spawn_is_inert() {
        assert_eq!(NoSpawn.spawn(&[(0, 0)]), None);
    }
}
