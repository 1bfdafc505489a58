use super::deadline::{call_with_deadline, CallFailure};
use super::{GameState, MatchOutcome, MatchRecord};
use crate::core::{Fault, Move, PlayerId};
use crate::logic::has_legal_move;
use crate::player::Agent;
use log::{debug, info, trace, warn};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub board_size: usize,
    /// Deadline for every single agent call.
    pub move_timeout: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            board_size: 8,
            move_timeout: Duration::from_secs(2),
        }
    }
}

/// 対局の進行段階
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchPhase {
    NotStarted,
    Initializing,
    AwaitingMove(PlayerId),
    Applying(PlayerId, Move),
    Ended(MatchOutcome),
}

/// The two agents of a match. A seat goes empty once its agent is lost to a
/// timed-out or panicked call.
struct Seats {
    agents: [Option<Box<dyn Agent>>; 2],
    names: [String; 2],
}

impl Seats {
    fn name(&self, player: PlayerId) -> &str {
        &self.names[player.index()]
    }

    /// Puts the agent back after a call, unless the call lost it.
    fn reseat<T>(
        &mut self,
        player: PlayerId,
        result: Result<(Box<dyn Agent>, T), CallFailure>,
    ) -> Result<T, Fault> {
        match result {
            Ok((agent, value)) => {
                self.agents[player.index()] = Some(agent);
                Ok(value)
            }
            Err(CallFailure { agent, fault }) => {
                self.agents[player.index()] = agent;
                Err(fault)
            }
        }
    }
}

/// Plays single matches between two agents.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEvaluator {
    pub config: MatchConfig,
}

impl MatchEvaluator {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Plays one match, `p1` as Player1 and `p2` as Player2.
    ///
    /// Never fails: every agent misbehaviour ends the match as a fault
    /// against that agent.
    pub async fn run(&self, p1: Box<dyn Agent>, p2: Box<dyn Agent>) -> MatchRecord {
        let started = Instant::now();
        let mut seats = Seats {
            names: [p1.name().to_string(), p2.name().to_string()],
            agents: [Some(p1), Some(p2)],
        };
        let mut state = GameState::new(self.config.board_size);

        let outcome = self.play_out(&mut seats, &mut state).await;

        match &outcome {
            MatchOutcome::Win(winner) => info!(
                "{} ({}) beats {} after {} moves",
                seats.name(*winner),
                winner,
                seats.name(winner.opponent()),
                state.move_count
            ),
            MatchOutcome::Fault { player, fault } => warn!(
                "{} ({}) forfeits after {} moves: {}",
                seats.name(*player),
                player,
                state.move_count,
                fault
            ),
        }
        trace!("final position:\n{}", state.board);

        self.notify(&mut seats, &outcome, state.last_move).await;

        MatchRecord {
            outcome,
            moves: state.move_count,
            final_move: state.last_move,
            elapsed: started.elapsed(),
            final_board: state.board,
        }
    }

    async fn play_out(&self, seats: &mut Seats, state: &mut GameState) -> MatchOutcome {
        let mut phase = MatchPhase::NotStarted;
        loop {
            phase = match phase {
                MatchPhase::NotStarted => MatchPhase::Initializing,
                MatchPhase::Initializing => {
                    let mut next = MatchPhase::AwaitingMove(PlayerId::Player1);
                    for player in PlayerId::both() {
                        if let Err(fault) = self.start_agent(seats, player).await {
                            next = MatchPhase::Ended(MatchOutcome::Fault { player, fault });
                            break;
                        }
                    }
                    next
                }
                MatchPhase::AwaitingMove(player) => {
                    match self.request_move(seats, player, state.last_move).await {
                        Ok(Some(mv)) => MatchPhase::Applying(player, mv),
                        Ok(None) => {
                            let fault = if has_legal_move(&state.board, player) {
                                Fault::SpuriousNoMove
                            } else {
                                Fault::NoLegalMoves
                            };
                            MatchPhase::Ended(MatchOutcome::Fault { player, fault })
                        }
                        Err(fault) => MatchPhase::Ended(MatchOutcome::Fault { player, fault }),
                    }
                }
                MatchPhase::Applying(player, mv) => match state.play(&mv) {
                    Ok((kind, winner)) => {
                        debug!("#{} {} {} {:?}", state.move_count, player, mv, kind);
                        match winner {
                            Some(w) => MatchPhase::Ended(MatchOutcome::Win(w)),
                            None => MatchPhase::AwaitingMove(player.opponent()),
                        }
                    }
                    Err(fault) => {
                        debug!("{} submitted {}: {}", player, mv, fault);
                        MatchPhase::Ended(MatchOutcome::Fault { player, fault })
                    }
                },
                MatchPhase::Ended(outcome) => return outcome,
            };
        }
    }

    async fn start_agent(&self, seats: &mut Seats, player: PlayerId) -> Result<(), Fault> {
        let agent = seats.agents[player.index()]
            .take()
            .ok_or_else(|| Fault::AgentError("agent unavailable".to_string()))?;
        debug!("starting {} as {}", seats.name(player), player);
        let result =
            call_with_deadline(agent, self.config.move_timeout, move |a| a.start(player)).await;
        seats.reseat(player, result)
    }

    async fn request_move(
        &self,
        seats: &mut Seats,
        player: PlayerId,
        last_move: Option<Move>,
    ) -> Result<Option<Move>, Fault> {
        let agent = seats.agents[player.index()]
            .take()
            .ok_or_else(|| Fault::AgentError("agent unavailable".to_string()))?;
        let result = call_with_deadline(agent, self.config.move_timeout, move |a| {
            a.next_move(last_move)
        })
        .await;
        seats.reseat(player, result)
    }

    /// Best-effort `finish` to every agent still seated.
    async fn notify(&self, seats: &mut Seats, outcome: &MatchOutcome, final_move: Option<Move>) {
        let winner = outcome.winner();
        for player in PlayerId::both() {
            let Some(agent) = seats.agents[player.index()].take() else {
                debug!("{} lost its agent, skipping finish", player);
                continue;
            };
            match call_with_deadline(agent, self.config.move_timeout, move |a| {
                a.finish(winner, final_move)
            })
            .await
            {
                Ok((agent, ())) => seats.agents[player.index()] = Some(agent),
                Err(failure) => {
                    warn!("finish for {} failed: {}", seats.name(player), failure.fault)
                }
            }
        }
    }
}
