//! Rule engine for turn-based board games.
//!
//! Two variants ship with the crate: Chinese chess ([`games::xiangqi`]) and
//! five-in-a-row ([`games::gomoku`]). Both plug the same [`Rules`] seam into
//! the same [`Game`] controller, which validates each attempted move, applies
//! it, records it for undo, detects the end of the game, and in engine-play
//! mode answers with the engine's reply before returning.
//!
//! ```
//! use qigames::{Game, Gomoku, Pos, Side};
//!
//! // Red is played manually, Black by the built-in evaluator.
//! let mut game = Game::with_engine(Gomoku::default(), Side::Black);
//! game.attempt_move(Pos::new(7, 7), Pos::new(7, 7)).unwrap();
//!
//! // The engine has already answered.
//! assert_eq!(game.history().len(), 2);
//! assert_eq!(game.current_side(), Side::Red);
//! ```

pub mod board;
pub mod game;
pub mod games;
pub mod history;

pub use board::{Board, MoveRecord, Pos, Side, TrialMove};
pub use game::{Game, GameState, MoveRejected, Outcome, Rules};
pub use games::gomoku::Gomoku;
pub use games::xiangqi::Xiangqi;
pub use history::MoveHistory;
