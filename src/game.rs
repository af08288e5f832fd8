//! One game session: the board plus the accept/spawn/terminal loop around it.
//!
//! A move is accepted only if it changes the board. An accepted move is
//! committed, followed by exactly one spawn and a terminal check. Rejected
//! moves leave everything untouched.

use log::{debug, info};
use rand::Rng;

use crate::engine::{Board, Direction};
use crate::error::BoardError;

/// What happened to a single input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No-op move, or the game had already ended.
    Rejected,
    /// The move was committed and a tile spawned.
    Moved,
    /// The move was committed and left the board in a terminal state.
    GameOver,
}

pub struct Game<R: Rng> {
    board: Board,
    rng: R,
    over: bool,
    moves: u64,
}

impl<R: Rng> Game<R> {
    /// Start a `size` x `size` game seeded with two tiles.
    ///
    /// ```
    /// use puzzle_2048::game::Game;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let game = Game::new(4, StdRng::seed_from_u64(5)).unwrap();
    /// assert_eq!(game.board().count_empty(), 14);
    /// assert!(!game.is_over());
    /// ```
    pub fn new(size: usize, mut rng: R) -> Result<Self, BoardError> {
        let board = Board::new(size)?.with_random_tile(&mut rng).with_random_tile(&mut rng);
        Ok(Game { board, rng, over: false, moves: 0 })
    }

    /// Resume from an existing board without seeding it.
    pub fn from_board(board: Board, rng: R) -> Self {
        let over = board.game_over();
        Game { board, rng, over, moves: 0 }
    }

    /// Apply one move: validate, shift, commit, spawn, check for the end.
    pub fn step(&mut self, dir: Direction) -> StepOutcome {
        if self.over {
            debug!("ignoring {dir}: game already over");
            return StepOutcome::Rejected;
        }
        let shifted = self.board.shift(dir);
        if !shifted.changed {
            debug!("rejected {dir}: nothing moves");
            return StepOutcome::Rejected;
        }
        self.board = shifted.board;
        self.moves += 1;
        let spawned = self.board.new_tile(&mut self.rng);
        debug!("accepted {dir} (move {}), spawned: {spawned}", self.moves);
        if self.board.game_over() {
            self.over = true;
            info!("game over after {} moves, highest tile {}", self.moves, self.board.highest_tile());
            return StepOutcome::GameOver;
        }
        StepOutcome::Moved
    }

    /// Map a key name and apply it. Unknown keys yield `None` and are ignored.
    pub fn press(&mut self, key: &str) -> Option<StepOutcome> {
        Direction::from_key(key).map(|dir| self.step(dir))
    }

    /// Directions that would currently change the board.
    pub fn valid_moves(&self) -> Vec<Direction> {
        Direction::ALL.into_iter().filter(|&dir| self.board.valid_move(dir)).collect()
    }

    /// Discard the board and start over with a freshly seeded one of the same size.
    pub fn reset(&mut self) {
        let size = self.board.size();
        self.board = Board::zeros(size).with_random_tile(&mut self.rng).with_random_tile(&mut self.rng);
        self.over = false;
        self.moves = 0;
        info!("new {size}x{size} game");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Number of accepted moves since the last reset.
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn game(rows: Vec<Vec<u64>>) -> Game<StdRng> {
        Game::from_board(Board::from_rows(rows).unwrap(), StdRng::seed_from_u64(11))
    }

    #[test]
    fn new_game_is_seeded() {
        let g = Game::new(4, StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(g.board().count_empty(), 14);
        assert_eq!(g.moves(), 0);
        assert!(Game::new(0, StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = Game::new(4, StdRng::seed_from_u64(77)).unwrap();
        let mut b = Game::new(4, StdRng::seed_from_u64(77)).unwrap();
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
            assert_eq!(a.step(dir), b.step(dir));
        }
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut g = game(vec![vec![2, 0, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]]);
        let before = g.board().clone();
        assert_eq!(g.step(Direction::Left), StepOutcome::Rejected);
        assert_eq!(g.step(Direction::Up), StepOutcome::Rejected);
        assert_eq!(g.board(), &before);
        assert_eq!(g.moves(), 0);
        assert_eq!(g.valid_moves(), vec![Direction::Right, Direction::Down]);
    }

    #[test]
    fn accepted_move_spawns_one_tile() {
        let mut g = game(vec![vec![2, 0, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]]);
        assert_eq!(g.step(Direction::Right), StepOutcome::Moved);
        assert_eq!(g.board().get(0, 3), Some(2));
        assert_eq!(g.board().count_empty(), 14);
        assert_eq!(g.moves(), 1);
    }

    #[test]
    fn final_move_ends_game() {
        let mut g = game(vec![vec![0, 8], vec![16, 32]]);
        assert_eq!(g.step(Direction::Left), StepOutcome::GameOver);
        assert!(g.is_over());
        assert!(g.board().game_over());
        assert_eq!(g.step(Direction::Right), StepOutcome::Rejected);
        assert_eq!(g.moves(), 1);
    }

    #[test]
    fn terminal_board_starts_over() {
        let g = game(vec![vec![2, 4], vec![4, 2]]);
        assert!(g.is_over());
        assert!(g.valid_moves().is_empty());
    }

    #[test]
    fn press_maps_keys() {
        let mut g = game(vec![vec![2, 0, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]]);
        assert_eq!(g.press("q"), None);
        assert_eq!(g.press("A"), Some(StepOutcome::Rejected));
        assert_eq!(g.press("s"), Some(StepOutcome::Moved));
        assert_eq!(g.board().get(3, 0), Some(2));
    }

    #[test]
    fn reset_starts_fresh() {
        let mut g = game(vec![vec![0, 8], vec![16, 32]]);
        g.step(Direction::Left);
        assert!(g.is_over());
        g.reset();
        assert!(!g.is_over());
        assert_eq!(g.moves(), 0);
        assert_eq!(g.board().size(), 2);
        assert_eq!(g.board().count_empty(), 2);
    }

    #[test]
    fn random_play_reaches_the_end() {
        let mut g = Game::new(4, StdRng::seed_from_u64(2024)).unwrap();
        let mut picker = StdRng::seed_from_u64(4202);
        while !g.is_over() {
            let moves = g.valid_moves();
            assert!(!moves.is_empty());
            let dir = moves[picker.gen_range(0..moves.len())];
            assert_ne!(g.step(dir), StepOutcome::Rejected);
        }
        assert!(g.board().game_over());
        assert!(g.valid_moves().is_empty());
    }
}
