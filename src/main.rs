use breakthrough_arena::config::TournamentConfig;
use breakthrough_arena::display::{render_json, render_standings};
use breakthrough_arena::player::registry::load_roster;
use breakthrough_arena::tournament::TournamentRunner;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CONFIG: &str = "arena.json";

#[derive(Debug, Parser)]
#[command(name = "breakthrough-arena", about = "Round-robin Breakthrough tournament between built-in agents")]
struct Args {
    /// Agents to enter, as `kind` or `alias=kind` (repeatable or comma-separated)
    #[arg(long = "agent", short = 'a', value_delimiter = ',', required = true)]
    agents: Vec<String>,

    /// JSON config file; command-line flags override its values.
    /// Without it `arena.json` in the working directory is used when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board size N (N x N)
    #[arg(long)]
    board_size: Option<usize>,

    /// Per-call deadline in seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Matches per pairing
    #[arg(long)]
    trials: Option<usize>,

    /// Matches to run at the same time
    #[arg(long)]
    parallel: Option<usize>,

    /// Seed for scheduling and agent randomness
    #[arg(long)]
    seed: Option<u64>,

    /// Print the standings as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn tournament_config(&self) -> anyhow::Result<TournamentConfig> {
        let mut config = match &self.config {
            Some(path) => TournamentConfig::load(path)?,
            None => TournamentConfig::load_or_default(DEFAULT_CONFIG)?,
        };
        if let Some(n) = self.board_size {
            config.board_size = n;
        }
        if let Some(secs) = self.timeout {
            if !secs.is_finite() || secs <= 0.0 {
                anyhow::bail!("timeout must be a positive number of seconds");
            }
            config.move_timeout_ms = (secs * 1000.0).round().max(1.0) as u64;
        }
        if let Some(t) = self.trials {
            config.trials = t;
        }
        if let Some(p) = self.parallel {
            config.parallel = p;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.tournament_config()?;

    // 対局前に全エージェントを解決する
    let roster = load_roster(&args.agents)?;
    info!(
        "roster: {}",
        roster
            .iter()
            .map(|h| format!("{} ({})", h.id, h.kind))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let runner = TournamentRunner::new(config.clone(), roster)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(runner.run());
    // abandoned agent calls must not keep the process alive
    runtime.shutdown_timeout(Duration::from_secs(1));
    let report = report?;

    if args.json {
        println!("{}", render_json(&report, &config)?);
    } else {
        print!("{}", render_standings(&report.standings, true));
    }
    Ok(())
}
