use crate::config::TournamentConfig;
use crate::tournament::{Standings, TournamentReport};
use crossterm::style::Stylize;
use serde::Serialize;
use std::fmt::Write;

/// Plain-text standings table.
pub fn render_standings(standings: &Standings, styled: bool) -> String {
    let width = standings
        .entries
        .iter()
        .map(|e| e.agent.len())
        .max()
        .unwrap_or(0)
        .max("agent".len());

    let mut out = String::new();
    let header = format!(
        "{:>4}  {:<width$}  {:>5}  {:>4}  {:>4}  {:>4}  {:>7}",
        "rank",
        "agent",
        "score",
        "W",
        "L",
        "F",
        "matches",
        width = width
    );
    if styled {
        let _ = writeln!(out, "{}", header.clone().bold());
    } else {
        let _ = writeln!(out, "{}", header);
    }
    for e in &standings.entries {
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  {:>5}  {:>4}  {:>4}  {:>4}  {:>7}",
            e.rank,
            e.agent,
            e.stats.score,
            e.stats.wins + e.stats.forfeit_wins,
            e.stats.losses,
            e.stats.faults,
            e.stats.matches,
            width = width
        );
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    config: &'a TournamentConfig,
    #[serde(flatten)]
    report: &'a TournamentReport,
}

pub fn render_json(report: &TournamentReport, config: &TournamentConfig) -> anyhow::Result<String> {
    let doc = JsonReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        config,
        report,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::{AgentStats, StandingsEntry};

    fn standings() -> Standings {
        Standings {
            entries: vec![
                StandingsEntry {
                    rank: 1,
                    agent: "weighted".into(),
                    kind: "weighted".into(),
                    stats: AgentStats {
                        score: 5,
                        matches: 3,
                        wins: 2,
                        losses: 0,
                        faults: 0,
                        forfeit_wins: 1,
                    },
                },
                StandingsEntry {
                    rank: 2,
                    agent: "r".into(),
                    kind: "random".into(),
                    stats: AgentStats {
                        matches: 3,
                        losses: 2,
                        faults: 1,
                        ..AgentStats::default()
                    },
                },
            ],
        }
    }

    #[test]
    fn table_lists_agents_in_order() {
        let text = render_standings(&standings(), false);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("score"));
        assert!(lines[1].trim_start().starts_with("1  weighted"));
        assert!(lines[2].contains(" r "));
    }

    #[test]
    fn json_report_has_timestamp_and_standings() {
        let report = TournamentReport {
            standings: standings(),
            matches: Vec::new(),
        };
        let json = render_json(&report, &TournamentConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["generated_at"].is_string());
        assert_eq!(value["config"]["board_size"], 8);
        assert_eq!(value["standings"]["entries"][0]["agent"], "weighted");
        assert_eq!(value["standings"]["entries"][0]["score"], 5);
    }
}
