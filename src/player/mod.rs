pub mod ai;
pub mod controller;
pub mod registry;

#[cfg(test)]
pub(crate) mod scripted;

pub use ai::{RandomAgent, WeightedAgent};
pub use controller::Agent;
pub use registry::{load_roster, LoadError};

use std::fmt;
use std::sync::Arc;

/// What a factory gets to know when building an agent for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentContext {
    pub board_size: usize,
    /// Per-match seed, so randomized agents replay identically for a fixed
    /// tournament seed.
    pub seed: u64,
}

pub type AgentFactory = Arc<dyn Fn(&AgentContext) -> Box<dyn Agent> + Send + Sync>;

/// A tournament participant.
#[derive(Clone)]
pub struct AgentHandle {
    /// Unique within a roster; keys the score table.
    pub id: String,
    pub kind: String,
    factory: AgentFactory,
}

impl AgentHandle {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, factory: AgentFactory) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            factory,
        }
    }

    /// Convenience for wiring an agent type directly, without the registry.
    pub fn from_fn<F, A>(id: impl Into<String>, f: F) -> Self
    where
        F: Fn(&AgentContext) -> A + Send + Sync + 'static,
        A: Agent + 'static,
    {
        let id = id.into();
        Self::new(
            id.clone(),
            id,
            Arc::new(move |ctx: &AgentContext| Box::new(f(ctx)) as Box<dyn Agent>),
        )
    }

    pub fn instantiate(&self, ctx: &AgentContext) -> Box<dyn Agent> {
        (self.factory)(ctx)
    }
}

impl fmt::Debug for AgentHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AgentHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
