use crate::core::{Move, PlayerId};

/// プレイヤー操作のtrait
///
/// One instance plays exactly one match. Every call may be abandoned by the
/// evaluator once its deadline passes, so implementations must not rely on
/// being called again after a slow answer.
pub trait Agent: Send {
    fn name(&self) -> &str;

    /// Prepare a fresh game playing as `color`.
    fn start(&mut self, color: PlayerId) -> anyhow::Result<()>;

    /// Pick the next move. `last_opponent_move` is `None` only on the first
    /// call of a game. `Ok(None)` means "I have no legal move".
    fn next_move(&mut self, last_opponent_move: Option<Move>) -> anyhow::Result<Option<Move>>;

    /// Result notification. Errors are logged by the caller and otherwise ignored.
    fn finish(&mut self, _winner: PlayerId, _final_move: Option<Move>) -> anyhow::Result<()> {
        Ok(())
    }
}
