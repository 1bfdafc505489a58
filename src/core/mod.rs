pub mod board;
pub mod fault;
pub mod r#move;
pub mod types;

pub use board::{Board, BoardError};
pub use fault::Fault;
pub use r#move::Move;
pub use types::{Cell, PlayerId, Position};
