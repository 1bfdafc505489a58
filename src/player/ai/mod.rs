pub mod random;
pub mod weighted;

pub use random::RandomAgent;
pub use weighted::WeightedAgent;

use crate::core::{Board, Move, PlayerId};
use crate::logic::{apply_move, classify_move, legal_moves, MoveKind};

/// The agent's private copy of the game, kept in sync from the moves it sees.
#[derive(Debug, Clone)]
pub(crate) struct LocalBoard {
    pub board: Board,
    pub me: PlayerId,
}

impl LocalBoard {
    pub fn new(board_size: usize) -> Self {
        Self {
            board: Board::new(board_size),
            me: PlayerId::Player1,
        }
    }

    pub fn start(&mut self, color: PlayerId) {
        self.me = color;
        self.board.reset();
    }

    pub fn play(&mut self, player: PlayerId, mv: &Move) -> anyhow::Result<()> {
        let kind = classify_move(&self.board, player, mv)
            .map_err(|fault| anyhow::anyhow!("cannot replay {} for {}: {}", mv, player, fault))?;
        apply_move(&mut self.board, player, mv, kind)?;
        Ok(())
    }

    /// Replays the opponent's last move, if any.
    pub fn observe(&mut self, last_opponent_move: Option<Move>) -> anyhow::Result<()> {
        match last_opponent_move {
            Some(mv) => self.play(self.me.opponent(), &mv),
            None => Ok(()),
        }
    }

    pub fn my_moves(&self) -> Vec<(Move, MoveKind)> {
        legal_moves(&self.board, self.me)
    }
}
