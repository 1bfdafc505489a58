use serde::{Deserialize, Serialize};
use std::fmt;

/// プレイヤーID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Player1, // 下側から上へ進む
    Player2, // 上側から下へ進む
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::Player1
    }
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// Row delta of a forward step. Player1 moves toward row 0.
    pub fn direction(self) -> i32 {
        match self {
            PlayerId::Player1 => -1,
            PlayerId::Player2 => 1,
        }
    }

    /// The row this player has to reach to win on a board of `size` rows.
    pub fn goal_row(self, size: usize) -> i32 {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => size as i32 - 1,
        }
    }

    /// 1 or 2, the color number handed to agents.
    pub fn color(self) -> u8 {
        match self {
            PlayerId::Player1 => 1,
            PlayerId::Player2 => 2,
        }
    }

    pub fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }

    pub fn both() -> [PlayerId; 2] {
        [PlayerId::Player1, PlayerId::Player2]
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Player{}", self.color())
    }
}

/// マスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Owned(PlayerId),
}

/// 盤面座標 (0-indexed)
///
/// Signed so that agents can name cells off the board; the board and the
/// rule engine reject those instead of the agent panicking on underflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Position {
        Position::new(self.row + d_row, self.col + d_col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
