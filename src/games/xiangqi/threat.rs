//! Check, checkmate and stalemate detection.
//!
//! Everything here is exhaustive simulation: a side is in check if any enemy
//! piece has a legal move onto its general, and checkmated if no trial move
//! leaves that test false. Each trial runs inside a [`TrialMove`] guard so
//! the board is bit-identical afterwards no matter how the search exits.

use crate::board::{Board, Pos, Side, TrialMove};

use super::{moves, Piece, PieceKind};

/// Locate `side`'s general.
pub fn find_general(board: &Board<Piece>, side: Side) -> Option<Pos> {
    let general = Piece::new(side, PieceKind::General);
    board.positions().find(|&pos| board.get(pos) == Some(general))
}

/// Check whether `side`'s general is attacked.
///
/// Panics if the general is missing: the engine only ever removes a general
/// by the capture that immediately ends the game, so a board without one is
/// corrupt.
pub fn is_in_check(board: &Board<Piece>, side: Side) -> bool {
    let general = find_general(board, side).expect("general missing from board");
    if generals_facing(board) {
        return true;
    }
    let enemy = side.opponent();
    for from in board.positions() {
        if let Some(piece) = board.get(from) {
            if piece.side == enemy && moves::is_legal(board, piece, from, general) {
                return true;
            }
        }
    }
    false
}

/// Check whether the two generals face each other on an open file. That
/// arrangement is check for whichever side must answer it.
pub fn generals_facing(board: &Board<Piece>) -> bool {
    let red = match find_general(board, Side::Red) {
        Some(pos) => pos,
        None => return false,
    };
    let black = match find_general(board, Side::Black) {
        Some(pos) => pos,
        None => return false,
    };
    if red.col != black.col {
        return false;
    }
    let (low, high) = if red.row < black.row {
        (red.row, black.row)
    } else {
        (black.row, red.row)
    };
    (low + 1..high).all(|row| board.is_empty(Pos::new(row, red.col)))
}

/// Check whether `side` is checkmated: in check, and no pseudo-legal move
/// escapes it.
///
/// Brute force by intent: every candidate is applied as a scoped trial, the
/// check test recomputed from scratch, and the board restored.
pub fn is_checkmate(board: &mut Board<Piece>, side: Side) -> bool {
    if !is_in_check(board, side) {
        return false;
    }
    for (from, to) in moves::pseudo_legal_moves(board, side) {
        let trial = TrialMove::new(board, from, to);
        if !is_in_check(trial.board(), side) {
            return false;
        }
    }
    true
}

/// Check whether `side` has no move at all while not in check. Since moves
/// into self-check stay playable here, this only happens when every piece is
/// physically blocked; the immobilized side loses, as over the board.
pub fn is_stalemate(board: &Board<Piece>, side: Side) -> bool {
    !is_in_check(board, side) && moves::pseudo_legal_moves(board, side).is_empty()
}
