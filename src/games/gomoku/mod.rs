//! Five-in-a-row (gomoku) on a square board, 15×15 by default.
//!
//! Stones are placed on empty intersections and never move again, so every
//! move is encoded `from == to`. The first mover's stones are conventionally
//! rendered black; here they are simply [`Side::Red`], the first mover.

use serde::{Deserialize, Serialize};

use crate::board::{Board, MoveRecord, Pos, Side};
use crate::game::{MoveRejected, Outcome, Rules};

pub mod eval;

/// Board edge length of over-the-board gomoku.
pub const STANDARD_SIZE: u8 = 15;

/// The four scan axes: horizontal, vertical and the two diagonals.
pub const AXES: [(i8, i8); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Five-in-a-row rule set.
///
/// The engine plays whichever side a [`crate::game::Game`] is told it owns;
/// move selection lives in [`eval`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Gomoku {
    size: u8,
}

impl Gomoku {
    /// Rule set for a `size × size` board. Sizes below five cells cannot
    /// ever produce a win and are rejected.
    pub fn new(size: u8) -> Gomoku {
        assert!(size >= 5, "board must fit a run of five");
        Gomoku { size }
    }

    /// Board edge length.
    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }
}

impl Default for Gomoku {
    fn default() -> Gomoku {
        Gomoku::new(STANDARD_SIZE)
    }
}

/// Count same-side stones adjacent to `pos` in one direction.
fn count_toward(board: &Board<Side>, pos: Pos, side: Side, dr: i8, dc: i8) -> u32 {
    let mut count = 0;
    let mut cur = pos;
    while let Some(next) = board.step(cur, dr, dc) {
        if board.get(next) != Some(side) {
            break;
        }
        count += 1;
        cur = next;
    }
    count
}

/// Check whether a `side` stone at `pos` lies on a run of five or more.
///
/// `pos` itself is counted for `side` without being read, so this answers
/// both "did the stone just placed here win" and "would placing here win".
pub fn is_winning_placement(board: &Board<Side>, pos: Pos, side: Side) -> bool {
    AXES.iter().any(|&(dr, dc)| {
        1 + count_toward(board, pos, side, dr, dc) + count_toward(board, pos, side, -dr, -dc) >= 5
    })
}

/// The five cells of the winning run through `pos`, if any, for highlighting.
/// On an overlong run the five cells nearest the run's low end are returned.
pub fn winning_run(board: &Board<Side>, pos: Pos, side: Side) -> Option<[Pos; 5]> {
    for &(dr, dc) in &AXES {
        let back = count_toward(board, pos, side, -dr, -dc);
        let forward = count_toward(board, pos, side, dr, dc);
        if 1 + back + forward < 5 {
            continue;
        }
        let mut cells = [pos; 5];
        for _ in 0..back {
            cells[0] = board.step(cells[0], -dr, -dc).expect("counted run cell off the board");
        }
        for i in 1..5 {
            cells[i] = board.step(cells[i - 1], dr, dc).expect("counted run cell off the board");
        }
        return Some(cells);
    }
    None
}

impl Rules for Gomoku {
    type Piece = Side;

    fn initial_board(&self) -> Board<Side> {
        Board::new(self.size, self.size)
    }

    fn validate(
        &self,
        board: &Board<Side>,
        _side: Side,
        from: Pos,
        to: Pos,
    ) -> Result<(), MoveRejected> {
        // Stones are placed, never moved, and only on empty cells.
        if from != to || !board.is_empty(to) {
            return Err(MoveRejected::IllegalGeometry);
        }
        Ok(())
    }

    fn apply(&self, board: &mut Board<Side>, side: Side, _from: Pos, to: Pos) -> MoveRecord<Side> {
        board.place(to, side)
    }

    fn outcome_after(
        &self,
        board: &mut Board<Side>,
        record: &MoveRecord<Side>,
        mover: Side,
    ) -> Option<Outcome> {
        if is_winning_placement(board, record.to, mover) {
            Some(Outcome::Win(mover))
        } else if board.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    fn choose_move(&self, board: &Board<Side>, side: Side) -> Option<(Pos, Pos)> {
        eval::choose_move(board, side).map(|pos| (pos, pos))
    }
}
