//! Game controller: the state machine tying board, rules, threat detection
//! and history together.
//!
//! A [`Game`] owns one board and one history for the lifetime of a session.
//! [`Game::attempt_move`] is the single entry point for play: it validates,
//! applies, updates turn and terminal state, and in engine-play mode answers
//! with the engine's reply before returning. Rejected attempts leave all
//! state untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, MoveRecord, Pos, Side};
use crate::history::MoveHistory;

/// Why a move attempt was rejected. All rejections are non-fatal and leave
/// the game state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveRejected {
    /// A coordinate lies off the board.
    #[error("position is off the board")]
    OutOfBounds,
    /// The source cell holds a piece of the side not to move.
    #[error("piece belongs to the side not to move")]
    WrongSide,
    /// The source cell is empty.
    #[error("source cell is empty")]
    EmptySource,
    /// The move violates the occupant's movement rules.
    #[error("move violates the movement rules")]
    IllegalGeometry,
    /// The game has already ended; start a new game first.
    #[error("game is already over")]
    GameOver,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Draw,
}

/// Rule set of one game variant.
///
/// The controller is generic over this seam: a variant supplies its piece
/// type, initial layout, per-move legality, how a validated move mutates the
/// board, and when a just-applied move ends the game. `choose_move` is the
/// optional engine hook; variants without one stay fully manual.
pub trait Rules {
    type Piece: Copy + PartialEq + std::fmt::Debug;

    /// Board with the variant's initial layout.
    fn initial_board(&self) -> Board<Self::Piece>;

    /// Check a move attempt by `side`. Bounds are already verified by the
    /// controller; everything else (source occupancy, ownership, movement
    /// geometry) is the variant's concern.
    fn validate(
        &self,
        board: &Board<Self::Piece>,
        side: Side,
        from: Pos,
        to: Pos,
    ) -> Result<(), MoveRejected>;

    /// Apply a validated move, returning the reversible record.
    fn apply(
        &self,
        board: &mut Board<Self::Piece>,
        side: Side,
        from: Pos,
        to: Pos,
    ) -> MoveRecord<Self::Piece>;

    /// Decide whether the just-applied move ended the game. The board is
    /// borrowed mutably so the variant may run scoped trial moves; it must
    /// be returned in exactly the state it was received.
    fn outcome_after(
        &self,
        board: &mut Board<Self::Piece>,
        record: &MoveRecord<Self::Piece>,
        mover: Side,
    ) -> Option<Outcome>;

    /// Pick a move for `side`, if this variant has an engine.
    fn choose_move(&self, _board: &Board<Self::Piece>, _side: Side) -> Option<(Pos, Pos)> {
        None
    }
}

/// The rendering-visible state of a game: board, side to move, outcome.
///
/// Every controller call hands back a view of this; clone it to keep a
/// snapshot across further moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState<P> {
    pub board: Board<P>,
    pub current_side: Side,
    pub outcome: Option<Outcome>,
}

/// One game session.
pub struct Game<R: Rules> {
    rules: R,
    state: GameState<R::Piece>,
    history: MoveHistory<R::Piece>,
    engine_side: Option<Side>,
}

impl<R: Rules> Game<R> {
    /// Start a manual game: both sides are played through [`Game::attempt_move`].
    pub fn new(rules: R) -> Game<R> {
        Game::start(rules, None)
    }

    /// Start a game in which `engine_side` is played by the variant's engine.
    /// Its replies are applied synchronously inside [`Game::attempt_move`];
    /// if the engine owns the first turn, it opens immediately.
    pub fn with_engine(rules: R, engine_side: Side) -> Game<R> {
        Game::start(rules, Some(engine_side))
    }

    fn start(rules: R, engine_side: Option<Side>) -> Game<R> {
        let board = rules.initial_board();
        let mut game = Game {
            rules,
            state: GameState {
                board,
                current_side: Side::Red,
                outcome: None,
            },
            history: MoveHistory::new(),
            engine_side,
        };
        game.run_engine_if_due();
        game
    }

    /// Attempt to move (or place) from `from` to `to` for the side to move.
    ///
    /// On success the move is applied, recorded, and the turn advances or
    /// the game ends; the resulting state is returned. In engine-play mode
    /// the engine's reply is applied before this returns. On rejection
    /// nothing changes.
    pub fn attempt_move(
        &mut self,
        from: Pos,
        to: Pos,
    ) -> Result<&GameState<R::Piece>, MoveRejected> {
        match self.try_move(from, to) {
            Ok(()) => Ok(&self.state),
            Err(reason) => {
                log::debug!("move {:?} -> {:?} rejected: {}", from, to, reason);
                Err(reason)
            }
        }
    }

    fn try_move(&mut self, from: Pos, to: Pos) -> Result<(), MoveRejected> {
        if self.state.outcome.is_some() {
            return Err(MoveRejected::GameOver);
        }
        if !self.state.board.in_bounds(from) || !self.state.board.in_bounds(to) {
            return Err(MoveRejected::OutOfBounds);
        }
        let side = self.state.current_side;
        self.rules.validate(&self.state.board, side, from, to)?;

        let record = self.rules.apply(&mut self.state.board, side, from, to);
        self.history.push(record, side);
        log::debug!(
            "{:?} played {:?} -> {:?}{}",
            side,
            from,
            to,
            if record.captured.is_some() { " (capture)" } else { "" }
        );

        match self.rules.outcome_after(&mut self.state.board, &record, side) {
            Some(outcome) => {
                log::debug!("game over: {:?}", outcome);
                self.state.outcome = Some(outcome);
            }
            None => {
                self.state.current_side = side.opponent();
                self.run_engine_if_due();
            }
        }
        Ok(())
    }

    fn run_engine_if_due(&mut self) {
        if self.state.outcome.is_some() || self.engine_side != Some(self.state.current_side) {
            return;
        }
        let side = self.state.current_side;
        if let Some((from, to)) = self.rules.choose_move(&self.state.board, side) {
            log::debug!("engine reply {:?} -> {:?}", from, to);
            // A rejected engine move means the evaluator itself is broken.
            self.attempt_move(from, to)
                .expect("engine chose an illegal move");
        }
    }

    /// Take back the most recent move, restoring board, turn and terminal
    /// state; a no-op on an empty history. Single-step: in engine-play mode
    /// call twice to take back both the reply and the preceding move.
    pub fn undo(&mut self) -> &GameState<R::Piece> {
        if let Some((record, side)) = self.history.pop() {
            self.state.board.undo_record(&record);
            self.state.current_side = side;
            self.state.outcome = None;
        }
        &self.state
    }

    /// Reset to the initial layout for a fresh game.
    pub fn new_game(&mut self) -> &GameState<R::Piece> {
        self.state.board = self.rules.initial_board();
        self.state.current_side = Side::Red;
        self.state.outcome = None;
        self.history.clear();
        self.run_engine_if_due();
        &self.state
    }

    /// Read-only view of the current state, for rendering.
    #[inline]
    pub fn state(&self) -> &GameState<R::Piece> {
        &self.state
    }

    /// The side whose turn it is.
    #[inline]
    pub fn current_side(&self) -> Side {
        self.state.current_side
    }

    /// How the game ended, if it has.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    /// The live board.
    #[inline]
    pub fn board(&self) -> &Board<R::Piece> {
        &self.state.board
    }

    /// The moves applied so far this game.
    #[inline]
    pub fn history(&self) -> &MoveHistory<R::Piece> {
        &self.history
    }

    /// The most recently applied move, if any.
    #[inline]
    pub fn last_move(&self) -> Option<&MoveRecord<R::Piece>> {
        self.history.last().map(|(record, _)| record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1×5 strip with one token per side on the outer cells. A token slides
    /// one cell sideways onto an empty cell; reaching the centre wins. Small
    /// enough to drive every controller path by hand.
    struct StripRules;

    impl Rules for StripRules {
        type Piece = Side;

        fn initial_board(&self) -> Board<Side> {
            let mut board = Board::new(1, 5);
            board.set(Pos::new(0, 0), Some(Side::Red));
            board.set(Pos::new(0, 4), Some(Side::Black));
            board
        }

        fn validate(
            &self,
            board: &Board<Side>,
            side: Side,
            from: Pos,
            to: Pos,
        ) -> Result<(), MoveRejected> {
            let piece = board.get(from).ok_or(MoveRejected::EmptySource)?;
            if piece != side {
                return Err(MoveRejected::WrongSide);
            }
            let one_step = from.row == to.row
                && (i16::from(from.col) - i16::from(to.col)).abs() == 1;
            if !one_step || !board.is_empty(to) {
                return Err(MoveRejected::IllegalGeometry);
            }
            Ok(())
        }

        fn apply(
            &self,
            board: &mut Board<Side>,
            _side: Side,
            from: Pos,
            to: Pos,
        ) -> MoveRecord<Side> {
            board.apply_move(from, to)
        }

        fn outcome_after(
            &self,
            _board: &mut Board<Side>,
            record: &MoveRecord<Side>,
            mover: Side,
        ) -> Option<Outcome> {
            (record.to.col == 2).then_some(Outcome::Win(mover))
        }

        fn choose_move(&self, board: &Board<Side>, side: Side) -> Option<(Pos, Pos)> {
            // Step toward the centre if that cell is free.
            let from = board.positions().find(|&pos| board.get(pos) == Some(side))?;
            let to = if from.col < 2 {
                board.step(from, 0, 1)?
            } else {
                board.step(from, 0, -1)?
            };
            board.is_empty(to).then_some((from, to))
        }
    }

    fn pos(col: u8) -> Pos {
        Pos::new(0, col)
    }

    /// Red 0→1, Black 4→3, Red 1→2 reaches the centre and wins.
    fn play_to_win(game: &mut Game<StripRules>) {
        game.attempt_move(pos(0), pos(1)).unwrap();
        game.attempt_move(pos(4), pos(3)).unwrap();
        let state = game.attempt_move(pos(1), pos(2)).unwrap();
        assert_eq!(state.outcome, Some(Outcome::Win(Side::Red)));
    }

    #[test]
    fn test_every_rejection_leaves_state_untouched() {
        let mut game = Game::new(StripRules);
        let before = game.state().clone();

        assert_eq!(
            game.attempt_move(pos(1), pos(2)),
            Err(MoveRejected::EmptySource)
        );
        assert_eq!(
            game.attempt_move(pos(4), pos(3)),
            Err(MoveRejected::WrongSide)
        );
        assert_eq!(
            game.attempt_move(pos(0), pos(2)),
            Err(MoveRejected::IllegalGeometry)
        );
        assert_eq!(
            game.attempt_move(pos(0), Pos::new(1, 0)),
            Err(MoveRejected::OutOfBounds)
        );
        assert_eq!(game.state(), &before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_accepted_move_flips_turn_and_returns_state() {
        let mut game = Game::new(StripRules);
        let state = game.attempt_move(pos(0), pos(1)).unwrap();
        assert_eq!(state.current_side, Side::Black);
        assert_eq!(state.board.get(pos(1)), Some(Side::Red));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_terminal_is_absorbing_until_new_game() {
        let mut game = Game::new(StripRules);
        play_to_win(&mut game);

        // Even ill-formed attempts answer GameOver; it is checked first.
        assert_eq!(game.attempt_move(pos(3), pos(2)), Err(MoveRejected::GameOver));
        assert_eq!(
            game.attempt_move(pos(0), Pos::new(9, 9)),
            Err(MoveRejected::GameOver)
        );

        let state = game.new_game();
        assert_eq!(state.outcome, None);
        assert_eq!(state.current_side, Side::Red);
        assert_eq!(state.board.get(pos(0)), Some(Side::Red));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_undo_clears_terminal_state() {
        let mut game = Game::new(StripRules);
        play_to_win(&mut game);

        let state = game.undo();
        assert_eq!(state.outcome, None);
        assert_eq!(state.current_side, Side::Red);
        assert_eq!(state.board.get(pos(1)), Some(Side::Red));

        // The winning move can be replayed.
        let state = game.attempt_move(pos(1), pos(2)).unwrap();
        assert_eq!(state.outcome, Some(Outcome::Win(Side::Red)));
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut game = Game::new(StripRules);
        let before = game.state().clone();
        game.undo();
        let state = game.undo();
        assert_eq!(state, &before);
    }

    #[test]
    fn test_engine_replies_synchronously() {
        let mut game = Game::with_engine(StripRules, Side::Black);
        let state = game.attempt_move(pos(0), pos(1)).unwrap();
        // Black's reply 4→3 was applied inside the same call.
        assert_eq!(state.board.get(pos(3)), Some(Side::Black));
        assert_eq!(state.current_side, Side::Red);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_undo_never_restarts_the_engine() {
        let mut game = Game::with_engine(StripRules, Side::Black);
        game.attempt_move(pos(0), pos(1)).unwrap(); // engine: 4 -> 3
        game.attempt_move(pos(1), pos(0)).unwrap(); // engine: 3 -> 2 wins
        assert_eq!(game.outcome(), Some(Outcome::Win(Side::Black)));

        // After undoing the winning reply it is the engine's turn, but undo
        // never moves for it; the engine only acts in response to play.
        let state = game.undo();
        assert_eq!(state.outcome, None);
        assert_eq!(state.current_side, Side::Black);
        assert_eq!(game.history().len(), 3);
    }

    #[test]
    fn test_engine_opens_when_it_owns_the_first_turn() {
        let game = Game::with_engine(StripRules, Side::Red);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.board().get(pos(1)), Some(Side::Red));
        assert_eq!(game.current_side(), Side::Black);
    }

    #[test]
    fn test_new_game_restarts_engine_opening() {
        let mut game = Game::with_engine(StripRules, Side::Red);
        // Black 4 -> 3 hands the turn back; the engine walks 1 -> 2 and wins.
        game.attempt_move(pos(4), pos(3)).unwrap();
        assert_eq!(game.outcome(), Some(Outcome::Win(Side::Red)));

        let state = game.new_game();
        assert_eq!(state.outcome, None);
        assert_eq!(state.board.get(pos(1)), Some(Side::Red));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(MoveRejected::GameOver.to_string(), "game is already over");
        assert_eq!(
            MoveRejected::OutOfBounds.to_string(),
            "position is off the board"
        );
        assert_eq!(
            MoveRejected::IllegalGeometry.to_string(),
            "move violates the movement rules"
        );
    }
}
