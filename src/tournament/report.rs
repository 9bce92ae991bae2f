use super::{depth_means, GameRecord, Termination, TournamentConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tally {
    pub agent: String,
    pub won: usize,
    pub lost: usize,
}

/// Results of every test agent against one CPU agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpponentRow {
    pub opponent: String,
    pub results: Vec<Tally>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinRate {
    pub agent: String,
    /// Percentage of games won, 0 to 100.
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentReport {
    pub games: usize,
    pub rows: Vec<OpponentRow>,
    /// Sorted best first.
    pub win_rates: Vec<WinRate>,
    /// Games lost on time, by either side.
    pub timeouts: usize,
    /// Games lost by returning an illegal move, by either side.
    pub forfeits: usize,
    pub average_timeout_depths: BTreeMap<String, f64>,
}

pub(crate) fn tally(config: &TournamentConfig, records: &[GameRecord]) -> TournamentReport {
    let mut grid = vec![vec![(0usize, 0usize); config.test_agents.len()]; config.cpu_agents.len()];
    let (mut timeouts, mut forfeits) = (0, 0);
    for r in records {
        let cell = &mut grid[r.cpu][r.test];
        if r.test_won { cell.0 += 1; } else { cell.1 += 1; }
        match r.outcome.termination {
            Termination::Timeout => timeouts += 1,
            Termination::Forfeit => forfeits += 1,
            Termination::Normal => {}
        }
    }

    let rows = config
        .cpu_agents
        .iter()
        .zip(&grid)
        .map(|(cpu, cells)| OpponentRow {
            opponent: cpu.name.clone(),
            results: config
                .test_agents
                .iter()
                .zip(cells)
                .map(|(test, &(won, lost))| Tally { agent: test.name.clone(), won, lost })
                .collect(),
        })
        .collect();

    let mut win_rates: Vec<WinRate> = config
        .test_agents
        .iter()
        .enumerate()
        .map(|(t, spec)| {
            let (won, played) = grid.iter().fold((0, 0), |(w, p), row| (w + row[t].0, p + row[t].0 + row[t].1));
            let rate = if played == 0 { 0.0 } else { 100.0 * won as f64 / played as f64 };
            WinRate { agent: spec.name.clone(), rate }
        })
        .collect();
    win_rates.sort_by(|a, b| b.rate.total_cmp(&a.rate));

    TournamentReport {
        games: records.len(),
        rows,
        win_rates,
        timeouts,
        forfeits,
        average_timeout_depths: depth_means(records, config),
    }
}

impl fmt::Display for TournamentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let agents: Vec<&str> = self
            .rows
            .first()
            .map(|row| row.results.iter().map(|t| t.agent.as_str()).collect())
            .unwrap_or_default();

        write!(f, "{:>7}  {:>12}", "Match #", "Opponent")?;
        for name in &agents { write!(f, "  {name:^13}")?; }
        writeln!(f)?;
        write!(f, "{:>7}  {:>12}", "", "")?;
        for _ in &agents { write!(f, "  {:^13}", "Won | Lost")?; }
        writeln!(f)?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{:>7}  {:>12}", i + 1, row.opponent)?;
            for t in &row.results { write!(f, "  {:>5} | {:<5}", t.won, t.lost)?; }
            writeln!(f)?;
        }
        writeln!(f, "{}", "-".repeat(23 + 15 * agents.len()))?;

        writeln!(f, "Win rates ({} games):", self.games)?;
        for w in &self.win_rates { writeln!(f, "  {:<12} {:>6.1}%", w.agent, w.rate)?; }
        if self.timeouts > 0 { writeln!(f, "{} games ended on a timeout.", self.timeouts)?; }
        if self.forfeits > 0 { writeln!(f, "{} games ended in a forfeit.", self.forfeits)?; }

        writeln!(f, "Average timeout depth:")?;
        for (name, depth) in &self.average_timeout_depths {
            if *depth < 0.0 {
                writeln!(f, "  {name:<12} none")?;
            } else {
                writeln!(f, "  {name:<12} {depth:.2}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentSpec;
    use crate::board::{Move, Player};
    use crate::tournament::MatchOutcome;

    fn record(test_seat: Player, winner: Player, termination: Termination) -> GameRecord {
        let outcome = MatchOutcome {
            winner,
            termination,
            history: vec![Move::new(0, 0)],
            average_timeout_depths: [-1.0, -1.0],
        };
        GameRecord { cpu: 0, test: 0, test_won: winner == test_seat, test_seat, outcome }
    }

    #[test]
    fn counts_terminations_on_both_sides() {
        let config = TournamentConfig {
            test_agents: vec![AgentSpec::random("Test")],
            cpu_agents: vec![AgentSpec::random("Cpu")],
            ..TournamentConfig::default()
        };
        let records = [
            // Cpu overran its clock.
            record(Player::One, Player::One, Termination::Timeout),
            // Cpu returned an illegal move.
            record(Player::Two, Player::Two, Termination::Forfeit),
            // Test agent forfeited.
            record(Player::One, Player::Two, Termination::Forfeit),
            record(Player::Two, Player::One, Termination::Normal),
        ];
        let report = tally(&config, &records);
        assert_eq!(report.timeouts, 1);
        assert_eq!(report.forfeits, 2);
        assert_eq!(report.rows[0].results[0], Tally { agent: "Test".into(), won: 2, lost: 2 });
        assert_eq!(report.win_rates[0].rate, 50.0);
        assert!(report.to_string().contains("1 games ended on a timeout"));
    }
}
