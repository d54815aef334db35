//! Append-only move history backing single-step undo.

use serde::{Deserialize, Serialize};

use crate::board::{MoveRecord, Side};

/// Ordered log of applied moves together with the side that made each one.
///
/// Lifetime is one game session: cleared on new game, popped on undo. There
/// is no redo stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveHistory<P> {
    entries: Vec<(MoveRecord<P>, Side)>,
}

impl<P: Copy> MoveHistory<P> {
    /// Create an empty history.
    pub fn new() -> MoveHistory<P> {
        MoveHistory {
            entries: Vec::new(),
        }
    }

    /// Append a move made by `side`.
    pub fn push(&mut self, record: MoveRecord<P>, side: Side) {
        self.entries.push((record, side));
    }

    /// Remove and return the most recent move, if any.
    pub fn pop(&mut self) -> Option<(MoveRecord<P>, Side)> {
        self.entries.pop()
    }

    /// The most recent move without removing it.
    #[inline]
    pub fn last(&self) -> Option<&(MoveRecord<P>, Side)> {
        self.entries.last()
    }

    /// Number of moves applied so far this game.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no moves have been applied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all moves. Used when a new game starts.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
