//! Test agents with scripted behaviour.

use super::ai::LocalBoard;
use super::{Agent, AgentContext, AgentHandle};
use crate::core::{Move, PlayerId};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Step {
    Play(Move),
    NoMove,
    Fail,
    Panic,
    Sleep(Duration),
}

pub type FinishLog = Arc<Mutex<Vec<(String, PlayerId, Option<Move>)>>>;

/// Plays its script, then the first legal move it finds.
pub struct ScriptedAgent {
    name: String,
    start: Option<Step>,
    script: VecDeque<Step>,
    fail_finish: bool,
    finished: FinishLog,
    local: LocalBoard,
}

impl ScriptedAgent {
    pub fn new(name: &str, board_size: usize) -> Self {
        Self {
            name: name.to_string(),
            start: None,
            script: VecDeque::new(),
            fail_finish: false,
            finished: Arc::default(),
            local: LocalBoard::new(board_size),
        }
    }

    pub fn script(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.script = steps.into_iter().collect();
        self
    }

    pub fn on_start(mut self, step: Step) -> Self {
        self.start = Some(step);
        self
    }

    pub fn failing_finish(mut self) -> Self {
        self.fail_finish = true;
        self
    }

    pub fn log_to(mut self, log: &FinishLog) -> Self {
        self.finished = Arc::clone(log);
        self
    }

    fn fallback(&mut self) -> anyhow::Result<Option<Move>> {
        let chosen = self.local.my_moves().first().map(|(mv, _)| *mv);
        if let Some(mv) = &chosen {
            let me = self.local.me;
            self.local.play(me, mv)?;
        }
        Ok(chosen)
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self, color: PlayerId) -> anyhow::Result<()> {
        self.local.start(color);
        match self.start.take() {
            None | Some(Step::Play(_)) | Some(Step::NoMove) => Ok(()),
            Some(Step::Fail) => anyhow::bail!("{} refuses to start", self.name),
            Some(Step::Panic) => panic!("{} crashed in start", self.name),
            Some(Step::Sleep(d)) => {
                std::thread::sleep(d);
                Ok(())
            }
        }
    }

    fn next_move(&mut self, last_opponent_move: Option<Move>) -> anyhow::Result<Option<Move>> {
        self.local.observe(last_opponent_move)?;
        match self.script.pop_front() {
            None => self.fallback(),
            Some(Step::Play(mv)) => {
                // keep the local copy right when the move is legal
                let me = self.local.me;
                let _ = self.local.play(me, &mv);
                Ok(Some(mv))
            }
            Some(Step::NoMove) => Ok(None),
            Some(Step::Fail) => anyhow::bail!("{} gave up", self.name),
            Some(Step::Panic) => panic!("{} crashed", self.name),
            Some(Step::Sleep(d)) => {
                std::thread::sleep(d);
                self.fallback()
            }
        }
    }

    fn finish(&mut self, winner: PlayerId, final_move: Option<Move>) -> anyhow::Result<()> {
        if let Ok(mut log) = self.finished.lock() {
            log.push((self.name.clone(), winner, final_move));
        }
        if self.fail_finish {
            anyhow::bail!("{} cannot take the news", self.name);
        }
        Ok(())
    }
}

/// A roster entry whose every instance plays the first legal move.
pub fn first_legal(id: &str) -> AgentHandle {
    let name = id.to_string();
    AgentHandle::from_fn(id, move |ctx: &AgentContext| {
        ScriptedAgent::new(&name, ctx.board_size)
    })
}

/// A roster entry whose every instance fails its first move.
pub fn broken(id: &str) -> AgentHandle {
    let name = id.to_string();
    AgentHandle::from_fn(id, move |ctx: &AgentContext| {
        ScriptedAgent::new(&name, ctx.board_size).script([Step::Fail])
    })
}
