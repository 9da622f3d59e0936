use serde::Serialize;
use tracing::{trace, warn};
use twenty48::{Board, Tile};

use crate::player::Player;

/// How a single game went.
#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    /// Moves that changed the board.
    pub moves: usize,
    pub max_tile: Tile,
    pub tile_count: usize,
    pub final_board: Board,
}

/// Lets `player` move until the board has no legal moves left.
///
/// The game also ends early if the player gives up or picks a move that
/// changes nothing, since asking again would not make a difference.
pub fn play_game(mut board: Board, player: &mut dyn Player) -> GameSummary {
    let mut moves = 0;
    while board.has_legal_moves() {
        let Some(direction) = player.choose(&board) else {
            warn!(moves, "Player gave up");
            break;
        };
        if !board.make_move(direction) {
            warn!(moves, %direction, "Player chose a move that changes nothing");
            break;
        }
        moves += 1;
        trace!(moves, %direction, "\n{}", board);
    }

    GameSummary {
        moves,
        max_tile: board.max_tile(),
        tile_count: board.tile_count(),
        final_board: board,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use twenty48::{Direction, RandomSpawner};

    use super::*;
    use crate::{CornerPlayer, RandomPlayer};

    struct AlwaysLeft;

    impl Player for AlwaysLeft {
        fn choose(&mut self, _board: &Board) -> Option<Direction> {
            Some(Direction::Left)
        }
    }

    #[test]
    fn random_player_plays_until_the_end() {
        for seed in 0..5 {
            let mut player = RandomPlayer::new(StdRng::seed_from_u64(seed));
            let summary = play_game(Board::seeded(4, 4, seed), &mut player);
            assert!(!summary.final_board.has_legal_moves());
            assert_eq!(summary.tile_count, 16);
            assert_eq!(summary.max_tile, summary.final_board.max_tile());
            assert!(summary.moves > 0);
        }
    }

    #[test]
    fn corner_player_plays_until_the_end() {
        let summary = play_game(Board::seeded(3, 5, 11), &mut CornerPlayer);
        assert!(!summary.final_board.has_legal_moves());
        assert_eq!(summary.final_board.size(), (3, 5));
        assert_eq!(summary.tile_count, 15);
    }

    #[test]
    fn stops_on_a_move_that_changes_nothing() {
        let board = Board::from_grid([[2, 0], [4, 0]])
            .unwrap()
            .with_new_spawner(RandomSpawner::seeded(0));
        let summary = play_game(board, &mut AlwaysLeft);
        assert_eq!(summary.moves, 0);
        assert_eq!(summary.tile_count, 2);
    }

    #[test]
    fn summary_serializes_the_grid() {
        let board = Board::from_grid([[2, 4], [4, 2]])
            .unwrap()
            .with_new_spawner(RandomSpawner::seeded(0));
        let summary = play_game(board, &mut CornerPlayer);
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"moves":0,"max_tile":4,"tile_count":4,"final_board":[[2,4],[4,2]]}"#
        );
    }
}
