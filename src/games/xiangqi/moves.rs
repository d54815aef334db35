//! Per-piece move legality and move enumeration.
//!
//! Legality is answered two independent ways: [`is_legal`] checks one
//! `from → to` pair by delta arithmetic, while [`moves_from`] enumerates
//! destinations from direction tables and ray walks. The pair check backs
//! move validation and the check test; the enumeration feeds the checkmate
//! search. Their agreement is asserted in the tests.

use crate::board::{Board, Pos, Side};

use super::{crossed_river, forward, in_palace, own_half, Piece, PieceKind};

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Jump offsets for the horse, each paired with the leg cell that must be
/// empty for that jump.
const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
    ((1, 2), (0, 1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
];

// ============================================================================
// PAIR LEGALITY
// ============================================================================

/// Check whether moving `piece` from `from` to `to` is a physically legal
/// piece move: archetype geometry holds and the destination is not occupied
/// by the mover's own side. Whether the move leaves the mover's general in
/// check is deliberately not examined here.
pub fn is_legal(board: &Board<Piece>, piece: Piece, from: Pos, to: Pos) -> bool {
    debug_assert_eq!(board.get(from), Some(piece));
    if from == to {
        return false;
    }
    if let Some(target) = board.get(to) {
        if target.side == piece.side {
            return false;
        }
    }
    let side = piece.side;
    match piece.kind {
        PieceKind::General => general_step(side, from, to),
        PieceKind::Advisor => advisor_step(side, from, to),
        PieceKind::Elephant => elephant_step(board, side, from, to),
        PieceKind::Horse => horse_step(board, from, to),
        PieceKind::Chariot => chariot_slide(board, from, to),
        PieceKind::Cannon => cannon_slide(board, from, to),
        PieceKind::Soldier => soldier_step(side, from, to),
    }
}

#[inline]
fn deltas(from: Pos, to: Pos) -> (i8, i8) {
    (
        to.row as i8 - from.row as i8,
        to.col as i8 - from.col as i8,
    )
}

fn general_step(side: Side, from: Pos, to: Pos) -> bool {
    let (dr, dc) = deltas(from, to);
    dr.abs() + dc.abs() == 1 && in_palace(side, to)
}

fn advisor_step(side: Side, from: Pos, to: Pos) -> bool {
    let (dr, dc) = deltas(from, to);
    dr.abs() == 1 && dc.abs() == 1 && in_palace(side, to)
}

fn elephant_step(board: &Board<Piece>, side: Side, from: Pos, to: Pos) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr.abs() != 2 || dc.abs() != 2 || !own_half(side, to.row) {
        return false;
    }
    let eye = Pos::new(
        (from.row as i8 + dr / 2) as u8,
        (from.col as i8 + dc / 2) as u8,
    );
    board.is_empty(eye)
}

fn horse_step(board: &Board<Piece>, from: Pos, to: Pos) -> bool {
    let (dr, dc) = deltas(from, to);
    let leg = match (dr.abs(), dc.abs()) {
        (2, 1) => Pos::new((from.row as i8 + dr / 2) as u8, from.col),
        (1, 2) => Pos::new(from.row, (from.col as i8 + dc / 2) as u8),
        _ => return false,
    };
    board.is_empty(leg)
}

fn chariot_slide(board: &Board<Piece>, from: Pos, to: Pos) -> bool {
    on_line(from, to) && pieces_between(board, from, to) == 0
}

fn cannon_slide(board: &Board<Piece>, from: Pos, to: Pos) -> bool {
    if !on_line(from, to) {
        return false;
    }
    let screens = pieces_between(board, from, to);
    if board.is_empty(to) {
        screens == 0
    } else {
        // Captures jump exactly one screen.
        screens == 1
    }
}

fn soldier_step(side: Side, from: Pos, to: Pos) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr == forward(side) && dc == 0 {
        return true;
    }
    crossed_river(side, from.row) && dr == 0 && dc.abs() == 1
}

#[inline]
fn on_line(from: Pos, to: Pos) -> bool {
    from.row == to.row || from.col == to.col
}

/// Count occupied cells strictly between two positions sharing a row or
/// column.
fn pieces_between(board: &Board<Piece>, from: Pos, to: Pos) -> usize {
    debug_assert!(on_line(from, to));
    let (dr, dc) = deltas(from, to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut count = 0;
    let mut cur = from;
    while let Some(next) = board.step(cur, step_r, step_c) {
        if next == to {
            break;
        }
        if !board.is_empty(next) {
            count += 1;
        }
        cur = next;
    }
    count
}

// ============================================================================
// ENUMERATION
// ============================================================================

/// Enumerate every destination the occupant of `from` may move to. Empty
/// source yields nothing.
pub fn moves_from(board: &Board<Piece>, from: Pos) -> Vec<Pos> {
    let piece = match board.get(from) {
        Some(piece) => piece,
        None => return Vec::new(),
    };
    let mut out = Vec::new();
    let side = piece.side;
    match piece.kind {
        PieceKind::General => general_moves(board, side, from, &mut out),
        PieceKind::Advisor => advisor_moves(board, side, from, &mut out),
        PieceKind::Elephant => elephant_moves(board, side, from, &mut out),
        PieceKind::Horse => horse_moves(board, side, from, &mut out),
        PieceKind::Chariot => chariot_moves(board, side, from, &mut out),
        PieceKind::Cannon => cannon_moves(board, side, from, &mut out),
        PieceKind::Soldier => soldier_moves(board, side, from, &mut out),
    }
    out
}

/// Every pseudo-legal `(from, to)` for `side`: archetype-legal and not a
/// self-capture. Moves into self-check are not filtered out.
pub fn pseudo_legal_moves(board: &Board<Piece>, side: Side) -> Vec<(Pos, Pos)> {
    let mut out = Vec::with_capacity(64);
    for from in board.positions() {
        if board.get(from).map_or(false, |piece| piece.side == side) {
            for to in moves_from(board, from) {
                out.push((from, to));
            }
        }
    }
    out
}

/// Push `to` unless it holds one of `side`'s own pieces.
fn push_unless_own(board: &Board<Piece>, side: Side, to: Pos, out: &mut Vec<Pos>) {
    if board.get(to).map_or(true, |target| target.side != side) {
        out.push(to);
    }
}

fn general_moves(board: &Board<Piece>, side: Side, from: Pos, out: &mut Vec<Pos>) {
    for (dr, dc) in ORTHOGONAL {
        if let Some(to) = board.step(from, dr, dc) {
            if in_palace(side, to) {
                push_unless_own(board, side, to, out);
            }
        }
    }
}

fn advisor_moves(board: &Board<Piece>, side: Side, from: Pos, out: &mut Vec<Pos>) {
    for (dr, dc) in DIAGONAL {
        if let Some(to) = board.step(from, dr, dc) {
            if in_palace(side, to) {
                push_unless_own(board, side, to, out);
            }
        }
    }
}

fn elephant_moves(board: &Board<Piece>, side: Side, from: Pos, out: &mut Vec<Pos>) {
    for (dr, dc) in DIAGONAL {
        let eye = match board.step(from, dr, dc) {
            Some(pos) => pos,
            None => continue,
        };
        if !board.is_empty(eye) {
            continue;
        }
        if let Some(to) = board.step(from, 2 * dr, 2 * dc) {
            if own_half(side, to.row) {
                push_unless_own(board, side, to, out);
            }
        }
    }
}

fn horse_moves(board: &Board<Piece>, side: Side, from: Pos, out: &mut Vec<Pos>) {
    for ((dr, dc), (leg_r, leg_c)) in HORSE_JUMPS {
        let leg = match board.step(from, leg_r, leg_c) {
            Some(pos) => pos,
            None => continue,
        };
        if !board.is_empty(leg) {
            continue;
        }
        if let Some(to) = board.step(from, dr, dc) {
            push_unless_own(board, side, to, out);
        }
    }
}

fn chariot_moves(board: &Board<Piece>, side: Side, from: Pos, out: &mut Vec<Pos>) {
    for (dr, dc) in ORTHOGONAL {
        let mut cur = from;
        while let Some(to) = board.step(cur, dr, dc) {
            match board.get(to) {
                Some(target) => {
                    if target.side != side {
                        out.push(to);
                    }
                    break;
                }
                None => out.push(to),
            }
            cur = to;
        }
    }
}

fn cannon_moves(board: &Board<Piece>, side: Side, from: Pos, out: &mut Vec<Pos>) {
    for (dr, dc) in ORTHOGONAL {
        let mut cur = from;
        let mut screened = false;
        while let Some(to) = board.step(cur, dr, dc) {
            match board.get(to) {
                Some(target) => {
                    if screened {
                        // Second piece on the ray: capturable over the screen.
                        if target.side != side {
                            out.push(to);
                        }
                        break;
                    }
                    screened = true;
                }
                None => {
                    if !screened {
                        out.push(to);
                    }
                }
            }
            cur = to;
        }
    }
}

fn soldier_moves(board: &Board<Piece>, side: Side, from: Pos, out: &mut Vec<Pos>) {
    if let Some(to) = board.step(from, forward(side), 0) {
        push_unless_own(board, side, to, out);
    }
    if crossed_river(side, from.row) {
        for dc in [-1, 1] {
            if let Some(to) = board.step(from, 0, dc) {
                push_unless_own(board, side, to, out);
            }
        }
    }
}
