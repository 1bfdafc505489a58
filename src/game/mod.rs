pub(crate) mod deadline;
pub mod evaluator;

pub use evaluator::{MatchConfig, MatchEvaluator, MatchPhase};

use crate::core::{Board, Fault, Move, PlayerId};
use crate::logic::{apply_move, check_win, classify_move, MoveKind};
use std::time::Duration;

/// Points for an honest win.
pub const WIN_POINTS: u32 = 2;
/// Points for the opponent of a faulting player.
pub const FORFEIT_POINTS: u32 = 1;

/// 対局の状態 (one match only)
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub to_move: PlayerId,
    pub move_count: usize,
    /// The most recently applied move, handed to the next player as context.
    pub last_move: Option<Move>,
}

impl GameState {
    pub fn new(board_size: usize) -> Self {
        GameState {
            board: Board::new(board_size),
            to_move: PlayerId::Player1,
            move_count: 0,
            last_move: None,
        }
    }

    /// Validates and applies `mv` for the side to move.
    ///
    /// On success returns the move kind and the winner, if the move ended the
    /// game. The turn only passes when nobody has won. A rejected move leaves
    /// the state untouched.
    pub fn play(&mut self, mv: &Move) -> Result<(MoveKind, Option<PlayerId>), Fault> {
        let player = self.to_move;
        let kind = classify_move(&self.board, player, mv)?;
        apply_move(&mut self.board, player, mv, kind).map_err(|_| Fault::OutOfBounds)?;
        self.move_count += 1;
        self.last_move = Some(*mv);

        let winner = check_win(&self.board, player);
        if winner.is_none() {
            self.to_move = player.opponent();
        }
        Ok((kind, winner))
    }

    pub fn piece_count(&self, player: PlayerId) -> u32 {
        self.board.count(player)
    }

    /// Pieces on the board plus pieces captured equals what both sides started with.
    pub fn is_conserved(&self) -> bool {
        let on_board: u32 = PlayerId::both().iter().map(|p| self.board.count(*p)).sum();
        let captured: u32 = PlayerId::both().iter().map(|p| self.board.captured(*p)).sum();
        on_board + captured == 2 * self.board.initial_pieces()
    }
}

/// 対局結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Win(PlayerId),
    Fault { player: PlayerId, fault: Fault },
}

impl MatchOutcome {
    /// The player credited with the match, by play or by forfeit.
    pub fn winner(&self) -> PlayerId {
        match self {
            MatchOutcome::Win(p) => *p,
            MatchOutcome::Fault { player, .. } => player.opponent(),
        }
    }

    pub fn points(&self, player: PlayerId) -> u32 {
        match self {
            MatchOutcome::Win(w) if *w == player => WIN_POINTS,
            MatchOutcome::Win(_) => 0,
            MatchOutcome::Fault { player: f, .. } if *f == player => 0,
            MatchOutcome::Fault { .. } => FORFEIT_POINTS,
        }
    }

    /// Score change as `[player1, player2]`.
    pub fn score_delta(&self) -> [u32; 2] {
        [
            self.points(PlayerId::Player1),
            self.points(PlayerId::Player2),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub outcome: MatchOutcome,
    pub moves: usize,
    pub final_move: Option<Move>,
    pub elapsed: Duration,
    pub final_board: Board,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_and_forfeit_score_differently() {
        let win = MatchOutcome::Win(PlayerId::Player2);
        assert_eq!(win.score_delta(), [0, 2]);
        assert_eq!(win.winner(), PlayerId::Player2);

        let forfeit = MatchOutcome::Fault {
            player: PlayerId::Player1,
            fault: Fault::OutOfBounds,
        };
        assert_eq!(forfeit.score_delta(), [0, 1]);
        assert_eq!(forfeit.winner(), PlayerId::Player2);
    }

    #[test]
    fn rejected_move_leaves_state_alone() {
        let mut state = GameState::new(8);
        let before = state.board.clone();
        assert_eq!(
            state.play(&Move::new((6, 0), (7, 0))),
            Err(Fault::WrongDirection)
        );
        assert_eq!(state.board, before);
        assert_eq!(state.to_move, PlayerId::Player1);
        assert_eq!(state.move_count, 0);
    }

    #[test]
    fn turns_alternate_and_pieces_are_conserved() {
        let mut state = GameState::new(8);
        let (kind, winner) = state.play(&Move::new((6, 0), (5, 0))).unwrap();
        assert_eq!((kind, winner), (MoveKind::Step, None));
        assert_eq!(state.to_move, PlayerId::Player2);
        state.play(&Move::new((1, 1), (2, 1))).unwrap();
        state.play(&Move::new((5, 0), (4, 0))).unwrap();
        state.play(&Move::new((2, 1), (3, 1))).unwrap();
        let (kind, _) = state.play(&Move::new((4, 0), (3, 1))).unwrap();
        assert_eq!(kind, MoveKind::Capture);
        assert_eq!(state.move_count, 5);
        assert_eq!(state.last_move, Some(Move::new((4, 0), (3, 1))));
        assert_eq!(state.piece_count(PlayerId::Player2), 15);
        assert!(state.is_conserved());
    }
}
