/// Everything that ends a match against the player who caused it.
///
/// The first five come out of the rule engine; the rest are raised by the
/// match evaluator around agent calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("source cell is not the mover's piece")]
    WrongOwner,
    #[error("destination is outside the board")]
    OutOfBounds,
    #[error("move does not advance exactly one row forward")]
    WrongDirection,
    #[error("move shifts more than one column")]
    TooFarHorizontal,
    #[error("destination is occupied")]
    OccupiedTarget,
    #[error("reported no move while legal moves exist")]
    SpuriousNoMove,
    #[error("no legal move available")]
    NoLegalMoves,
    #[error("agent call exceeded its deadline")]
    Timeout,
    #[error("agent failed: {0}")]
    AgentError(String),
}

