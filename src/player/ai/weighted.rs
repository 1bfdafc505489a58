use super::LocalBoard;
use crate::core::{Move, PlayerId};
use crate::logic::{apply_move, evaluate, MoveKind};
use crate::player::{Agent, AgentContext};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Samples moves from a softmax over the position each move leads to.
pub struct WeightedAgent {
    pub name: String,
    /// Measured in pieces: 1.0 makes a one-piece swing e times more likely.
    pub temperature: f64,
    local: LocalBoard,
    rng: ChaCha8Rng,
}

impl WeightedAgent {
    pub fn new(name: &str, ctx: &AgentContext) -> Self {
        Self {
            name: name.to_string(),
            temperature: 0.5,
            local: LocalBoard::new(ctx.board_size),
            rng: ChaCha8Rng::seed_from_u64(ctx.seed),
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Softmax-like probability distribution from scores
    fn get_probabilities(&self, moves: &[(Move, MoveKind)]) -> anyhow::Result<Vec<f64>> {
        let me = self.local.me;
        let mut scores = Vec::with_capacity(moves.len());
        for (mv, kind) in moves {
            let mut next = self.local.board.clone();
            apply_move(&mut next, me, mv, *kind)?;
            scores.push(evaluate(&next, me) as f64 / 100.0);
        }

        let max_score = scores.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let exps: Vec<f64> = scores
            .iter()
            .map(|&s| ((s - max_score) / self.temperature.max(1e-6)).exp())
            .collect();
        let sum_exp: f64 = exps.iter().sum();

        Ok(exps.iter().map(|&e| e / sum_exp).collect())
    }
}

impl Agent for WeightedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self, color: PlayerId) -> anyhow::Result<()> {
        self.local.start(color);
        Ok(())
    }

    fn next_move(&mut self, last_opponent_move: Option<Move>) -> anyhow::Result<Option<Move>> {
        self.local.observe(last_opponent_move)?;

        let moves = self.local.my_moves();
        if moves.is_empty() {
            return Ok(None);
        }

        let probs = self.get_probabilities(&moves)?;

        // Weighted selection
        let mut chosen = moves[moves.len() - 1].0;
        let mut r = self.rng.gen::<f64>();
        for (i, &p) in probs.iter().enumerate() {
            if r < p {
                chosen = moves[i].0;
                break;
            }
            r -= p;
        }

        let me = self.local.me;
        self.local.play(me, &chosen)?;
        Ok(Some(chosen))
    }
}
