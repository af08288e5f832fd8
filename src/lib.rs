//! puzzle-2048: the 2048 sliding-tile puzzle
//!
//! This crate provides:
//! - A square `Board` with the move logic (`shift`, `valid_move`, `new_tile`, `game_over`, ...)
//! - Key-name to `Direction` mapping (`input` module)
//! - A `Game` session that accepts moves, spawns tiles and detects the end (`game` module)
//! - TOML settings for the terminal front end (`config` module)
//!
//! Quick start:
//! ```
//! use puzzle_2048::engine::{Board, Direction};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::new(4).unwrap().with_random_tile(&mut rng).with_random_tile(&mut rng);
//! let moved = b0.shift(Direction::Left);
//! assert_eq!(moved.board.tile_sum(), b0.tile_sum());
//! ```
//!
//! Full loop
//! ```
//! use puzzle_2048::game::{Game, StepOutcome};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut game = Game::new(4, StdRng::seed_from_u64(123)).unwrap();
//! for key in ["a", "w", "d", "s"] {
//!     if game.press(key) == Some(StepOutcome::GameOver) {
//!         break;
//!     }
//! }
//! println!("{}", game.board());
//! ```
//!
//! Note: the free functions in `engine` (e.g. `engine::insert_random_tile`) use the
//! thread-local RNG. Prefer the methods taking `&mut impl Rng` when you need determinism.
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod input;
