//! Board substrate shared by every game variant.
//!
//! A board is a fixed `rows × cols` grid of optional occupants. It performs
//! no legality checks of its own: callers apply moves a validator has already
//! accepted and take them back with the returned [`MoveRecord`], which
//! [`Board::apply_move`] / [`Board::undo_record`] treat as exact inverses.

use serde::{Deserialize, Serialize};

/// Side to move. Red is the first mover in every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    /// Get the opposing side.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }
}

/// Position on a board, 0-indexed, row 0 at Red's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Create a position from row and column.
    #[inline]
    pub fn new(row: u8, col: u8) -> Pos {
        Pos { row, col }
    }
}

/// Record of one applied move, sufficient to reverse it exactly.
///
/// The prior destination occupant is recorded even when `None` so that undo
/// is uniform. A stone placement is encoded with `from == to`; undoing such a
/// record clears the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord<P> {
    pub from: Pos,
    pub to: Pos,
    /// The occupant that moved (or was placed).
    pub moved: P,
    /// What the destination held before the move, if anything.
    pub captured: Option<P>,
}

impl<P> MoveRecord<P> {
    /// Check if this record is a placement (`from == to`).
    #[inline]
    pub fn is_placement(&self) -> bool {
        self.from == self.to
    }
}

/// A fixed-size grid of optional occupants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board<P> {
    rows: u8,
    cols: u8,
    cells: Vec<Option<P>>,
}

impl<P: Copy> Board<P> {
    /// Create an empty board of the given dimensions.
    pub fn new(rows: u8, cols: u8) -> Board<P> {
        Board {
            rows,
            cols,
            cells: vec![None; rows as usize * cols as usize],
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Check whether a position lies on the board.
    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.in_bounds(pos));
        pos.row as usize * self.cols as usize + pos.col as usize
    }

    /// Get the occupant at a position.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<P> {
        self.cells[self.index(pos)]
    }

    /// Set or clear the occupant at a position.
    #[inline]
    pub fn set(&mut self, pos: Pos, occupant: Option<P>) {
        let idx = self.index(pos);
        self.cells[idx] = occupant;
    }

    /// Check whether a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_none()
    }

    /// Step from a position by signed deltas. `None` if it leaves the board.
    #[inline]
    pub fn step(&self, pos: Pos, drow: i8, dcol: i8) -> Option<Pos> {
        let row = pos.row as i16 + drow as i16;
        let col = pos.col as i16 + dcol as i16;
        if row >= 0 && col >= 0 && row < self.rows as i16 && col < self.cols as i16 {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Iterate over all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (rows, cols) = (self.rows, self.cols);
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Pos::new(row, col)))
    }

    /// Check whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Move the occupant at `from` to `to`, clearing the source and folding
    /// the destination's prior occupant into the returned record.
    ///
    /// No validation is performed here; illegal calls are the caller's
    /// responsibility. Panics if `from` is empty, since that means the
    /// caller's own state is corrupt.
    pub fn apply_move(&mut self, from: Pos, to: Pos) -> MoveRecord<P> {
        let moved = self.get(from).expect("apply_move called with empty source");
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, Some(moved));
        MoveRecord {
            from,
            to,
            moved,
            captured,
        }
    }

    /// Place a new occupant on an empty cell, returning a record with
    /// `from == to`.
    pub fn place(&mut self, to: Pos, occupant: P) -> MoveRecord<P> {
        let captured = self.get(to);
        debug_assert!(captured.is_none(), "place onto an occupied cell");
        self.set(to, Some(occupant));
        MoveRecord {
            from: to,
            to,
            moved: occupant,
            captured,
        }
    }

    /// Reverse a move produced by [`Board::apply_move`] or [`Board::place`].
    ///
    /// Restores `from ← moved` before `to ← captured`; that write order also
    /// makes a placement record (`from == to`) undo to an empty cell.
    pub fn undo_record(&mut self, record: &MoveRecord<P>) {
        self.set(record.from, Some(record.moved));
        self.set(record.to, record.captured);
    }
}

/// Scoped trial move: applies on creation, reverts when dropped.
///
/// The checkmate search tries candidate escapes in a loop with early exits;
/// the guard guarantees the board is restored on every path out.
pub struct TrialMove<'a, P: Copy> {
    board: &'a mut Board<P>,
    record: MoveRecord<P>,
}

impl<'a, P: Copy> TrialMove<'a, P> {
    /// Apply `from → to` as a trial on the borrowed board.
    pub fn new(board: &'a mut Board<P>, from: Pos, to: Pos) -> TrialMove<'a, P> {
        let record = board.apply_move(from, to);
        TrialMove { board, record }
    }

    /// The board with the trial move applied.
    #[inline]
    pub fn board(&self) -> &Board<P> {
        self.board
    }

    /// The record of the trial move.
    #[inline]
    pub fn record(&self) -> &MoveRecord<P> {
        &self.record
    }
}

impl<P: Copy> Drop for TrialMove<'_, P> {
    fn drop(&mut self) {
        self.board.undo_record(&self.record);
    }
}
