//! One-ply move selection: win now, block the opponent, otherwise take the
//! cell with the best run patterns.
//!
//! There is deliberately no lookahead beyond the two immediate-win scans.
//! Every candidate cell is scored from scratch against the current board,
//! and the weights only need to order patterns sensibly: a four that can
//! still be completed dwarfs a three, an open end beats a blocked one, and
//! a small centre nudge settles otherwise featureless boards.

use crate::board::{Board, Pos, Side};

use super::{is_winning_placement, AXES};

/// Pick a placement for `side`, or `None` when the board is full.
///
/// Priority: complete a five for `side`; else spoil the opponent's five;
/// else the highest-scoring empty cell. Every tie goes to the first
/// candidate in row-major order.
pub fn choose_move(board: &Board<Side>, side: Side) -> Option<Pos> {
    if let Some(pos) = winning_cell_for(board, side) {
        log::trace!("taking the win at {:?}", pos);
        return Some(pos);
    }
    if let Some(pos) = winning_cell_for(board, side.opponent()) {
        log::trace!("blocking the loss at {:?}", pos);
        return Some(pos);
    }

    let mut best: Option<(Pos, i32)> = None;
    for pos in board.positions() {
        if !board.is_empty(pos) {
            continue;
        }
        let score = score_placement(board, pos, side);
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((pos, score)),
        }
    }
    let (pos, score) = best?;
    log::debug!("engine places at {:?} (score {})", pos, score);
    Some(pos)
}

/// First empty cell, in row-major order, where a `side` stone completes a
/// run of five.
fn winning_cell_for(board: &Board<Side>, side: Side) -> Option<Pos> {
    board
        .positions()
        .find(|&pos| board.is_empty(pos) && is_winning_placement(board, pos, side))
}

/// Score a hypothetical `side` stone on the empty cell `pos`.
fn score_placement(board: &Board<Side>, pos: Pos, side: Side) -> i32 {
    let patterns: i32 = AXES
        .iter()
        .map(|&(dr, dc)| axis_score(board, pos, side, dr, dc))
        .sum();
    patterns + center_bonus(board, pos)
}

/// Score one axis through `pos`: the run the stone would sit in, weighted
/// by length and how many of its ends stay open.
fn axis_score(board: &Board<Side>, pos: Pos, side: Side, dr: i8, dc: i8) -> i32 {
    let (forward, forward_open) = run_and_opening(board, pos, side, dr, dc);
    let (back, back_open) = run_and_opening(board, pos, side, -dr, -dc);
    let count = 1 + forward + back;
    let open_ends = u32::from(forward_open) + u32::from(back_open);
    pattern_weight(count, open_ends)
}

/// Count `side` stones contiguous with `pos` in one direction, and whether
/// the cell just past them is empty.
fn run_and_opening(board: &Board<Side>, pos: Pos, side: Side, dr: i8, dc: i8) -> (u32, bool) {
    let mut count = 0;
    let mut cur = pos;
    loop {
        match board.step(cur, dr, dc) {
            Some(next) if board.get(next) == Some(side) => {
                count += 1;
                cur = next;
            }
            Some(next) => return (count, board.is_empty(next)),
            None => return (count, false),
        }
    }
}

fn pattern_weight(count: u32, open_ends: u32) -> i32 {
    match (count, open_ends) {
        (n, _) if n >= 5 => 100_000,
        (4, 2) => 10_000,
        (4, 1) => 3_000,
        (3, 2) => 1_000,
        (3, 1) => 300,
        (2, 2) => 100,
        (2, 1) => 30,
        (1, 2) => 10,
        (1, 1) => 3,
        _ => 0,
    }
}

/// Small nudge toward the middle of the board, always smaller than the gap
/// between neighbouring pattern weights of three and up.
fn center_bonus(board: &Board<Side>, pos: Pos) -> i32 {
    let center_row = i32::from(board.rows() / 2);
    let center_col = i32::from(board.cols() / 2);
    let dist = (i32::from(pos.row) - center_row).abs() + (i32::from(pos.col) - center_col).abs();
    center_row + center_col - dist
}
