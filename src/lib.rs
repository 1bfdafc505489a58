//! Breakthrough rules engine, match evaluator and round-robin tournament.

pub mod config;
pub mod core;
pub mod display;
pub mod game;
pub mod logic;
pub mod player;
pub mod tournament;


pub use crate::config::TournamentConfig;
pub use crate::core::{Board, Cell, Fault, Move, PlayerId, Position};
pub use crate::game::{GameState, MatchConfig, MatchEvaluator, MatchOutcome, MatchRecord};
pub use crate::logic::MoveKind;
pub use crate::player::{Agent, AgentContext, AgentFactory, AgentHandle};
pub use crate::tournament::{Standings, TournamentReport, TournamentRunner};
