use crate::config::{ConfigError, TournamentConfig};
use crate::core::PlayerId;
use crate::game::{MatchEvaluator, MatchOutcome};
use crate::player::{AgentContext, AgentHandle};
use log::info;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// One scheduled match. `player1`/`player2` index into the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub index: usize,
    pub player1: usize,
    pub player2: usize,
    /// Agent seeds for this match, `[player1, player2]`.
    pub seeds: [u64; 2],
}

/// Every unordered pair `trials` times, colors alternating per trial, in a
/// shuffled order.
///
/// The first trial's orientation follows the parity of the pair, so an odd
/// trial count still spreads Player1 over the whole roster.
pub fn schedule(roster_len: usize, trials: usize, rng: &mut impl Rng) -> Vec<Fixture> {
    let mut pairs = Vec::new();
    for a in 0..roster_len {
        for b in (a + 1)..roster_len {
            for trial in 0..trials {
                if (a + b + trial) % 2 == 0 {
                    pairs.push((a, b));
                } else {
                    pairs.push((b, a));
                }
            }
        }
    }
    pairs.shuffle(rng);
    pairs
        .into_iter()
        .enumerate()
        .map(|(index, (player1, player2))| Fixture {
            index,
            player1,
            player2,
            seeds: [rng.gen(), rng.gen()],
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStats {
    pub score: u32,
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    /// Matches this agent forfeited.
    pub faults: u32,
    /// Wins handed over by an opponent's fault.
    pub forfeit_wins: u32,
}

/// 成績表
///
/// Shared by all running matches; each result is booked for both
/// participants under one lock.
#[derive(Debug, Default)]
pub struct ScoreTable {
    entries: Mutex<HashMap<String, AgentStats>>,
}

impl ScoreTable {
    pub fn new<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let entries = ids
            .into_iter()
            .map(|id| (id.to_string(), AgentStats::default()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn record(&self, player1: &str, player2: &str, outcome: &MatchOutcome) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (player, id) in [(PlayerId::Player1, player1), (PlayerId::Player2, player2)] {
            let stats = entries.entry(id.to_string()).or_default();
            stats.matches += 1;
            stats.score += outcome.points(player);
            match outcome {
                MatchOutcome::Win(w) if *w == player => stats.wins += 1,
                MatchOutcome::Win(_) => stats.losses += 1,
                MatchOutcome::Fault { player: f, .. } if *f == player => stats.faults += 1,
                MatchOutcome::Fault { .. } => stats.forfeit_wins += 1,
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<AgentStats> {
        self.snapshot().get(id).copied()
    }

    pub fn snapshot(&self) -> HashMap<String, AgentStats> {
        match self.entries.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsEntry {
    pub rank: usize,
    pub agent: String,
    pub kind: String,
    #[serde(flatten)]
    pub stats: AgentStats,
}

/// Final ranking by score. Equal scores share a rank and keep roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standings {
    pub entries: Vec<StandingsEntry>,
}

impl Standings {
    pub fn from_table(roster: &[AgentHandle], table: &ScoreTable) -> Self {
        let snapshot = table.snapshot();
        let mut entries: Vec<StandingsEntry> = roster
            .iter()
            .map(|h| StandingsEntry {
                rank: 0,
                agent: h.id.clone(),
                kind: h.kind.clone(),
                stats: snapshot.get(&h.id).copied().unwrap_or_default(),
            })
            .collect();
        entries.sort_by(|a, b| b.stats.score.cmp(&a.stats.score));

        let scores: Vec<u32> = entries.iter().map(|e| e.stats.score).collect();
        for entry in &mut entries {
            entry.rank = 1 + scores.iter().filter(|s| **s > entry.stats.score).count();
        }
        Standings { entries }
    }

    pub fn get(&self, agent: &str) -> Option<&StandingsEntry> {
        self.entries.iter().find(|e| e.agent == agent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub index: usize,
    pub player1: String,
    pub player2: String,
    pub winner: String,
    /// `None` for a win over the board, otherwise the fault that ended it.
    pub fault: Option<String>,
    pub moves: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TournamentReport {
    pub standings: Standings,
    pub matches: Vec<MatchSummary>,
}

/// Round-robin over a roster.
pub struct TournamentRunner {
    config: TournamentConfig,
    roster: Vec<AgentHandle>,
    evaluator: MatchEvaluator,
}

impl TournamentRunner {
    pub fn new(config: TournamentConfig, roster: Vec<AgentHandle>) -> Result<Self, ConfigError> {
        config.validate()?;
        let evaluator = MatchEvaluator::new(config.match_config());
        Ok(Self {
            config,
            roster,
            evaluator,
        })
    }

    pub fn roster(&self) -> &[AgentHandle] {
        &self.roster
    }

    pub fn fixtures(&self, seed: u64) -> Vec<Fixture> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        schedule(self.roster.len(), self.config.trials, &mut rng)
    }

    pub async fn run(&self) -> anyhow::Result<TournamentReport> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let fixtures = self.fixtures(seed);
        info!(
            "{} agents, {} matches, {}x{} board, {} ms per call, seed {}",
            self.roster.len(),
            fixtures.len(),
            self.config.board_size,
            self.config.board_size,
            self.config.move_timeout_ms,
            seed
        );

        let table = Arc::new(ScoreTable::new(self.roster.iter().map(|h| h.id.as_str())));
        let semaphore = Arc::new(Semaphore::new(self.config.parallel));
        let mut tasks = JoinSet::new();

        for fixture in fixtures {
            let permit = Arc::clone(&semaphore).acquire_owned().await?;
            let first = self.roster[fixture.player1].clone();
            let second = self.roster[fixture.player2].clone();
            let evaluator = self.evaluator;
            let table = Arc::clone(&table);
            let board_size = self.config.board_size;

            tasks.spawn(async move {
                let _permit = permit;
                let p1 = first.instantiate(&AgentContext {
                    board_size,
                    seed: fixture.seeds[0],
                });
                let p2 = second.instantiate(&AgentContext {
                    board_size,
                    seed: fixture.seeds[1],
                });
                let record = evaluator.run(p1, p2).await;
                table.record(&first.id, &second.id, &record.outcome);

                let winner = match record.outcome.winner() {
                    PlayerId::Player1 => first.id.clone(),
                    PlayerId::Player2 => second.id.clone(),
                };
                let fault = match &record.outcome {
                    MatchOutcome::Win(_) => None,
                    MatchOutcome::Fault { fault, .. } => Some(fault.to_string()),
                };
                MatchSummary {
                    index: fixture.index,
                    player1: first.id,
                    player2: second.id,
                    winner,
                    fault,
                    moves: record.moves,
                }
            });
        }

        let mut matches = Vec::new();
        while let Some(summary) = tasks.join_next().await {
            matches.push(summary?);
        }
        matches.sort_by_key(|m| m.index);

        let standings = Standings::from_table(&self.roster, &table);
        if let Some(top) = standings.entries.first() {
            info!("leader: {} with {} points", top.agent, top.stats.score);
        }
        Ok(TournamentReport { standings, matches })
    }
}
