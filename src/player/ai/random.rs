use super::LocalBoard;
use crate::core::{Move, PlayerId};
use crate::logic::MoveKind;
use crate::player::{Agent, AgentContext};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Takes a random capture when one exists, otherwise any random legal move.
pub struct RandomAgent {
    pub name: String,
    local: LocalBoard,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(name: &str, ctx: &AgentContext) -> Self {
        RandomAgent {
            name: name.to_string(),
            local: LocalBoard::new(ctx.board_size),
            rng: ChaCha8Rng::seed_from_u64(ctx.seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self, color: PlayerId) -> anyhow::Result<()> {
        self.local.start(color);
        Ok(())
    }

    fn next_move(&mut self, last_opponent_move: Option<Move>) -> anyhow::Result<Option<Move>> {
        self.local.observe(last_opponent_move)?;

        let (captures, regular): (Vec<_>, Vec<_>) = self
            .local
            .my_moves()
            .into_iter()
            .partition(|(_, kind)| *kind == MoveKind::Capture);

        let pool = if captures.is_empty() { regular } else { captures };
        let chosen = pool.choose(&mut self.rng).map(|(mv, _)| *mv);

        if let Some(mv) = &chosen {
            let me = self.local.me;
            self.local.play(me, mv)?;
        }
        Ok(chosen)
    }
}
