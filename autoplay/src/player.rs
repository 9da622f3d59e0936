use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use twenty48::{Board, Direction};

/// Something that picks the next move.
pub trait Player {
    /// Returns `None` if the player gives up.
    fn choose(&mut self, board: &Board) -> Option<Direction>;
}

/// The players that can be selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PlayerKind {
    Random,
    Corner,
}

impl PlayerKind {
    pub fn build(self, rng: &mut impl Rng) -> Box<dyn Player> {
        match self {
            PlayerKind::Random => Box::new(RandomPlayer::new(StdRng::seed_from_u64(rng.gen()))),
            PlayerKind::Corner => Box::new(CornerPlayer),
        }
    }
}

/// Picks uniformly among the directions that change the board.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Player for RandomPlayer {
    fn choose(&mut self, board: &Board) -> Option<Direction> {
        let candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| board.can_move(direction))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }
}

/// Keeps the big tiles in the bottom left corner by preferring down and
/// left, and only going up when nothing else works.
pub struct CornerPlayer;

const CORNER_PREFERENCE: [Direction; 4] = [
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Up,
];

impl Player for CornerPlayer {
    fn choose(&mut self, board: &Board) -> Option<Direction> {
        CORNER_PREFERENCE
            .into_iter()
            .find(|&direction| board.can_move(direction))
    }
}

#[cfg(test)]
mod tests {
    use twenty48::RandomSpawner;

    use super::*;

    fn board(rows: [[u32; 3]; 2]) -> Board {
        Board::from_grid(rows)
            .unwrap()
            .with_new_spawner(RandomSpawner::seeded(0))
    }

    #[test]
    fn corner_player_follows_its_preference() {
        assert_eq!(
            CornerPlayer.choose(&board([[2, 0, 0], [4, 0, 0]])),
            Some(Direction::Right)
        );
        assert_eq!(
            CornerPlayer.choose(&board([[2, 0, 0], [0, 0, 0]])),
            Some(Direction::Down)
        );
        assert_eq!(CornerPlayer.choose(&board([[2, 4, 2], [4, 2, 4]])), None);
    }

    #[test]
    fn random_player_only_picks_useful_moves() {
        let mut player = RandomPlayer::new(StdRng::seed_from_u64(9));
        // Only up and left change anything here
        let board = board([[0, 0, 0], [0, 0, 2]]);
        for _ in 0..50 {
            let direction = player.choose(&board).unwrap();
            assert!(matches!(direction, Direction::Up | Direction::Left));
        }
    }
}
