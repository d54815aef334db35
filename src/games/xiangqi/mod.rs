//! Chinese chess (xiangqi) on a 10×9 board.
//!
//! Red sits on rows 0–4 and moves toward row 9; Black mirrors it. The river
//! runs between rows 4 and 5, and each side's palace is the 3×3 zone of its
//! general: columns 3–5 crossed with rows 0–2 (Red) or 7–9 (Black).
//!
//! Move legality lives in [`moves`], check and game-ending detection in
//! [`threat`]. Neither rejects a move for leaving one's own general in
//! check: such a move is physically playable and loses to the general's
//! capture on the reply.

use serde::{Deserialize, Serialize};

use crate::board::{Board, MoveRecord, Pos, Side};
use crate::game::{MoveRejected, Outcome, Rules};

pub mod moves;
pub mod threat;

/// Board rows.
pub const ROWS: u8 = 10;
/// Board columns.
pub const COLS: u8 = 9;

/// Movement archetype of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// One orthogonal step, confined to the palace. Its capture ends the game.
    General,
    /// One diagonal step, confined to the palace.
    Advisor,
    /// Two diagonal steps over an empty "eye", never across the river.
    Elephant,
    /// A (2,1) jump with an empty orthogonal "leg".
    Horse,
    /// Any straight-line slide over empty cells.
    Chariot,
    /// Slides like a chariot, but captures by jumping exactly one screen.
    Cannon,
    /// One step forward; gains sideways steps after crossing the river.
    Soldier,
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    /// Create a piece.
    #[inline]
    pub fn new(side: Side, kind: PieceKind) -> Piece {
        Piece { side, kind }
    }
}

/// Check if `pos` lies inside `side`'s palace.
#[inline]
pub fn in_palace(side: Side, pos: Pos) -> bool {
    let row_ok = match side {
        Side::Red => pos.row <= 2,
        Side::Black => pos.row >= 7,
    };
    row_ok && (3..=5).contains(&pos.col)
}

/// The row direction `side`'s soldiers advance in.
#[inline]
pub fn forward(side: Side) -> i8 {
    match side {
        Side::Red => 1,
        Side::Black => -1,
    }
}

/// Check if `row` lies on `side`'s own half of the river.
#[inline]
pub fn own_half(side: Side, row: u8) -> bool {
    match side {
        Side::Red => row <= 4,
        Side::Black => row >= 5,
    }
}

/// Check if a soldier standing on `row` has crossed the river.
#[inline]
pub fn crossed_river(side: Side, row: u8) -> bool {
    !own_half(side, row)
}

/// Standard initial layout.
pub fn initial_board() -> Board<Piece> {
    use PieceKind::*;

    let mut board = Board::new(ROWS, COLS);
    let back_rank = [
        Chariot, Horse, Elephant, Advisor, General, Advisor, Elephant, Horse, Chariot,
    ];
    for (col, kind) in back_rank.into_iter().enumerate() {
        board.set(Pos::new(0, col as u8), Some(Piece::new(Side::Red, kind)));
        board.set(Pos::new(9, col as u8), Some(Piece::new(Side::Black, kind)));
    }
    for col in [1, 7] {
        board.set(Pos::new(2, col), Some(Piece::new(Side::Red, Cannon)));
        board.set(Pos::new(7, col), Some(Piece::new(Side::Black, Cannon)));
    }
    for col in [0, 2, 4, 6, 8] {
        board.set(Pos::new(3, col), Some(Piece::new(Side::Red, Soldier)));
        board.set(Pos::new(6, col), Some(Piece::new(Side::Black, Soldier)));
    }
    board
}

/// Chinese-chess rule set. Both sides are played manually; there is no
/// engine for this variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xiangqi;

impl Rules for Xiangqi {
    type Piece = Piece;

    fn initial_board(&self) -> Board<Piece> {
        initial_board()
    }

    fn validate(
        &self,
        board: &Board<Piece>,
        side: Side,
        from: Pos,
        to: Pos,
    ) -> Result<(), MoveRejected> {
        let piece = board.get(from).ok_or(MoveRejected::EmptySource)?;
        if piece.side != side {
            return Err(MoveRejected::WrongSide);
        }
        if !moves::is_legal(board, piece, from, to) {
            return Err(MoveRejected::IllegalGeometry);
        }
        Ok(())
    }

    fn apply(&self, board: &mut Board<Piece>, _side: Side, from: Pos, to: Pos) -> MoveRecord<Piece> {
        board.apply_move(from, to)
    }

    fn outcome_after(
        &self,
        board: &mut Board<Piece>,
        record: &MoveRecord<Piece>,
        mover: Side,
    ) -> Option<Outcome> {
        // A general left en prise can actually be taken; that ends the game
        // at once and must be decided before any check probing.
        if record.captured.map(|piece| piece.kind) == Some(PieceKind::General) {
            return Some(Outcome::Win(mover));
        }

        let defender = mover.opponent();
        if threat::is_in_check(board, defender) {
            if threat::is_checkmate(board, defender) {
                return Some(Outcome::Win(mover));
            }
        } else if threat::is_stalemate(board, defender) {
            // A side with no move at all loses, as in over-the-board play.
            return Some(Outcome::Win(mover));
        }
        None
    }
}
