use super::types::{Cell, PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: usize },
}

/// 盤面
///
/// Row-major `size * size` cells plus the number of pieces each player has
/// captured. Storage only: the rule engine decides what may be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    /// 取った駒の数 (index = PlayerId::index)
    captured: [u32; 2],
}

impl Board {
    /// A board in the starting layout.
    pub fn new(size: usize) -> Self {
        let mut board = Board::empty(size);
        board.reset();
        board
    }

    /// A board with no pieces at all, for building positions by hand.
    pub fn empty(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
            captured: [0, 0],
        }
    }

    /// Rows 0-1 belong to Player2, the last two rows to Player1.
    pub fn reset(&mut self) {
        let n = self.size;
        for row in 0..n {
            let cell = if row < 2 {
                Cell::Owned(PlayerId::Player2)
            } else if row + 2 >= n {
                Cell::Owned(PlayerId::Player1)
            } else {
                Cell::Empty
            };
            self.cells[row * n..(row + 1) * n].fill(cell);
        }
        self.captured = [0, 0];
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        let n = self.size as i32;
        (0..n).contains(&pos.row) && (0..n).contains(&pos.col)
    }

    fn index(&self, pos: Position) -> Result<usize, BoardError> {
        if self.in_bounds(pos) {
            Ok(pos.row as usize * self.size + pos.col as usize)
        } else {
            Err(BoardError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                size: self.size,
            })
        }
    }

    pub fn get(&self, pos: Position) -> Result<Cell, BoardError> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn set(&mut self, pos: Position, cell: Cell) -> Result<(), BoardError> {
        let i = self.index(pos)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Pieces each player starts with.
    pub fn initial_pieces(&self) -> u32 {
        2 * self.size as u32
    }

    pub fn captured(&self, player: PlayerId) -> u32 {
        self.captured[player.index()]
    }

    pub fn record_capture(&mut self, player: PlayerId) {
        self.captured[player.index()] += 1;
    }

    /// Number of `player`'s pieces still on the board.
    pub fn count(&self, player: PlayerId) -> u32 {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Owned(player))
            .count() as u32
    }

    /// All positions currently holding one of `player`'s pieces, row-major.
    pub fn positions_of(&self, player: PlayerId) -> impl Iterator<Item = Position> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == Cell::Owned(player))
            .map(move |(i, _)| Position::new((i / n) as i32, (i % n) as i32))
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, "{:>2}", col)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2} ", row)?;
            for cell in self.row(row) {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Owned(PlayerId::Player1) => 'X',
                    Cell::Owned(PlayerId::Player2) => 'O',
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "captured: P1={} P2={}",
            self.captured[0], self.captured[1]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_places_two_rows_per_player() {
        let board = Board::new(8);
        for col in 0..8 {
            assert_eq!(board.get(Position::new(0, col)), Ok(Cell::Owned(PlayerId::Player2)));
            assert_eq!(board.get(Position::new(1, col)), Ok(Cell::Owned(PlayerId::Player2)));
            for row in 2..6 {
                assert_eq!(board.get(Position::new(row, col)), Ok(Cell::Empty));
            }
            assert_eq!(board.get(Position::new(6, col)), Ok(Cell::Owned(PlayerId::Player1)));
            assert_eq!(board.get(Position::new(7, col)), Ok(Cell::Owned(PlayerId::Player1)));
        }
        assert_eq!(board.count(PlayerId::Player1), 16);
        assert_eq!(board.count(PlayerId::Player2), 16);
        assert_eq!(board.initial_pieces(), 16);
    }

    #[test]
    fn reset_clears_captures_and_moved_pieces() {
        let mut board = Board::new(6);
        board.set(Position::new(3, 3), Cell::Owned(PlayerId::Player1)).unwrap();
        board.set(Position::new(4, 3), Cell::Empty).unwrap();
        board.record_capture(PlayerId::Player1);

        board.reset();
        assert_eq!(board, Board::new(6));
        assert_eq!(board.captured(PlayerId::Player1), 0);
    }

    #[test]
    fn out_of_bounds_access_is_an_error() {
        let mut board = Board::new(8);
        let err = BoardError::OutOfBounds { row: 8, col: 0, size: 8 };
        assert_eq!(board.get(Position::new(8, 0)), Err(err));
        assert!(board.get(Position::new(0, -1)).is_err());
        assert!(board.set(Position::new(-1, 3), Cell::Empty).is_err());
        assert!(!board.in_bounds(Position::new(3, 8)));
        assert!(board.in_bounds(Position::new(7, 7)));
    }

    #[test]
    fn positions_of_lists_row_major() {
        let mut board = Board::empty(4);
        board.set(Position::new(2, 1), Cell::Owned(PlayerId::Player1)).unwrap();
        board.set(Position::new(0, 3), Cell::Owned(PlayerId::Player1)).unwrap();
        let found: Vec<_> = board.positions_of(PlayerId::Player1).collect();
        assert_eq!(found, vec![Position::new(0, 3), Position::new(2, 1)]);
    }
}
