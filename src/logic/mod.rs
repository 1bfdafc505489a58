use crate::core::{Board, BoardError, Cell, Fault, Move, PlayerId};
use serde::{Deserialize, Serialize};

/// 合法手の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Straight forward onto an empty cell.
    Step,
    /// Diagonal onto an empty cell.
    DiagonalAdvance,
    /// Diagonal onto an opponent's piece.
    Capture,
}

/// 指し手の判定
///
/// Checks run in a fixed order so a move with several problems always reports
/// the same fault: owner, bounds, row delta, column delta, occupancy.
pub fn classify_move(board: &Board, player: PlayerId, mv: &Move) -> Result<MoveKind, Fault> {
    // 盤外の from には自分の駒は無い
    if board.get(mv.from) != Ok(Cell::Owned(player)) {
        return Err(Fault::WrongOwner);
    }

    let target = board.get(mv.to).map_err(|_| Fault::OutOfBounds)?;

    if mv.to.row - mv.from.row != player.direction() {
        return Err(Fault::WrongDirection);
    }

    let d_col = mv.to.col - mv.from.col;
    if d_col.abs() > 1 {
        return Err(Fault::TooFarHorizontal);
    }

    match (d_col, target) {
        (0, Cell::Empty) => Ok(MoveKind::Step),
        (0, Cell::Owned(_)) => Err(Fault::OccupiedTarget),
        (_, Cell::Empty) => Ok(MoveKind::DiagonalAdvance),
        (_, Cell::Owned(owner)) if owner == player => Err(Fault::OccupiedTarget),
        (_, Cell::Owned(_)) => Ok(MoveKind::Capture),
    }
}

/// 移動適用
///
/// Expects `kind` to come from [`classify_move`] on the same board; nothing is
/// re-checked here beyond the board's own bounds.
pub fn apply_move(
    board: &mut Board,
    player: PlayerId,
    mv: &Move,
    kind: MoveKind,
) -> Result<(), BoardError> {
    board.set(mv.from, Cell::Empty)?;
    board.set(mv.to, Cell::Owned(player))?;
    if kind == MoveKind::Capture {
        board.record_capture(player);
    }
    Ok(())
}

/// 勝敗判定 (手を指した直後のプレイヤーについて)
pub fn check_win(board: &Board, player_just_moved: PlayerId) -> Option<PlayerId> {
    let goal = player_just_moved.goal_row(board.size());
    let reached = board
        .positions_of(player_just_moved)
        .any(|pos| pos.row == goal);
    let wiped_out = board.count(player_just_moved.opponent()) == 0;

    if reached || wiped_out {
        Some(player_just_moved)
    } else {
        None
    }
}

/// 合法手生成
pub fn legal_moves(board: &Board, player: PlayerId) -> Vec<(Move, MoveKind)> {
    let mut moves = Vec::new();
    for from in board.positions_of(player) {
        for d_col in [-1, 0, 1] {
            let mv = Move {
                from,
                to: from.offset(player.direction(), d_col),
            };
            if let Ok(kind) = classify_move(board, player, &mv) {
                moves.push((mv, kind));
            }
        }
    }
    moves
}

pub fn has_legal_move(board: &Board, player: PlayerId) -> bool {
    board.positions_of(player).any(|from| {
        [-1, 0, 1].into_iter().any(|d_col| {
            let mv = Move {
                from,
                to: from.offset(player.direction(), d_col),
            };
            classify_move(board, player, &mv).is_ok()
        })
    })
}

/// 評価関数
///
/// Material counts most, then how far the pieces have advanced. A position
/// already won for either side dominates everything else.
pub fn evaluate(board: &Board, player: PlayerId) -> i32 {
    if let Some(winner) = check_win(board, player).or_else(|| check_win(board, player.opponent())) {
        return if winner == player { 100_000 } else { -100_000 };
    }

    let n = board.size() as i32;
    let progress = |p: PlayerId| -> i32 {
        board
            .positions_of(p)
            .map(|pos| {
                let start = if p == PlayerId::Player1 { n - 1 } else { 0 };
                (pos.row - start).abs()
            })
            .sum()
    };

    let material = board.count(player) as i32 - board.count(player.opponent()) as i32;
    material * 100 + (progress(player) - progress(player.opponent())) * 10
}
