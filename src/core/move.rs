use super::types::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A piece relocation. The acting player comes from the turn, not the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: impl Into<Position>, to: impl Into<Position>) -> Self {
        Move {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
