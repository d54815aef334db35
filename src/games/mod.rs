//! Rule sets for the shipped game variants.

pub mod gomoku;
pub mod xiangqi;
