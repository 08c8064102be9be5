//! Output formatting utilities for CLI.

use formica::game::Player;
use formica::runner::MatchResult;
use serde::Serialize;

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult {
    /// Spawn seed used.
    pub(super) seed: u64,
    /// Winner player number (null on tie or truncation).
    pub(super) winner: Option<u8>,
    /// Whether the match reached a terminal outcome.
    pub(super) finished: bool,
    /// Delivered food per player.
    pub(super) scores: [u32; 2],
    /// Total turns played.
    pub(super) turns_played: u32,
    /// Total unit actions applied.
    pub(super) actions_taken: u32,
}

impl JsonMatchResult {
    /// Create from a match result.
    pub(super) fn from_match_result(result: &MatchResult) -> Self {
        Self {
            seed: result.seed,
            winner: result.outcome.winner().map(Player::number),
            finished: result.outcome.is_terminal(),
            scores: result.scores,
            turns_played: result.turns_played,
            actions_taken: result.actions_taken,
        }
    }
}

/// Format a match result as human-readable text.
pub(super) fn format_text(result: &MatchResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Match Result (seed: {})\n", result.seed));
    output.push_str(&format!("  {}\n", result.outcome));
    output.push_str(&format!("  Turns: {}\n", result.turns_played));
    output.push_str(&format!("  Actions: {}\n\n", result.actions_taken));

    for player in Player::both() {
        output.push_str(&format!(
            "  {player}: {} food delivered\n",
            result.scores[player.index()]
        ));
    }

    output
}

/// Aggregated statistics over a series of matches.
#[derive(Debug, Default)]
pub(super) struct SeriesStats {
    /// Total matches played.
    pub(super) matches_played: u64,
    /// Win count per player.
    pub(super) wins: [u64; 2],
    /// Tie count.
    pub(super) ties: u64,
    /// Total score per player.
    total_scores: [u64; 2],
    /// Total turns across all matches.
    total_turns: u64,
}

impl SeriesStats {
    /// Add a match result to the stats.
    pub(super) fn add_result(&mut self, result: &MatchResult) {
        self.matches_played += 1;
        self.total_turns += u64::from(result.turns_played);

        match result.outcome.winner() {
            Some(player) => self.wins[player.index()] += 1,
            None => self.ties += 1,
        }
        for player in Player::both() {
            self.total_scores[player.index()] += u64::from(result.scores[player.index()]);
        }
    }

    /// Win rate for a player (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn win_rate(&self, player: Player) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.wins[player.index()] as f64 / self.matches_played as f64
    }

    /// Average delivered food for a player.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_score(&self, player: Player) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.total_scores[player.index()] as f64 / self.matches_played as f64
    }

    /// Average match length in turns.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_turns(&self) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.matches_played as f64
    }
}

/// JSON-serializable series summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonSeriesResult {
    /// Total matches played.
    matches_played: u64,
    /// Per-player statistics.
    players: Vec<JsonSeriesPlayer>,
    /// Number of ties.
    ties: u64,
    /// Average match length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-player series stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonSeriesPlayer {
    /// Player number (1 or 2).
    player: u8,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average delivered food.
    avg_score: f64,
}

impl JsonSeriesResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(stats: &SeriesStats) -> Self {
        let players = Player::both()
            .into_iter()
            .map(|player| JsonSeriesPlayer {
                player: player.number(),
                wins: stats.wins[player.index()],
                win_rate: stats.win_rate(player),
                avg_score: stats.avg_score(player),
            })
            .collect();

        Self {
            matches_played: stats.matches_played,
            players,
            ties: stats.ties,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format series stats as human-readable text.
#[allow(clippy::cast_precision_loss)]
pub(super) fn format_series_text(stats: &SeriesStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Series Results ({} matches)\n", stats.matches_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for player in Player::both() {
        let wins = stats.wins[player.index()];
        let rate = stats.win_rate(player) * 100.0;
        output.push_str(&format!("  {player}: {rate:.1}% ({wins} wins)\n"));
    }
    let tie_rate = if stats.matches_played == 0 {
        0.0
    } else {
        stats.ties as f64 / stats.matches_played as f64 * 100.0
    };
    output.push_str(&format!("  Ties: {} ({tie_rate:.1}%)\n\n", stats.ties));

    output.push_str("Average Food Delivered:\n");
    for player in Player::both() {
        output.push_str(&format!("  {player}: {:.1}\n", stats.avg_score(player)));
    }

    output.push_str(&format!("\nAverage Match Length: {:.0} turns\n", stats.avg_turns()));

    output
}

/// Format series results as CSV, one match per row.
pub(super) fn format_series_csv(results: &[MatchResult]) -> String {
    let mut output = String::new();

    output.push_str("seed,winner,p1_score,p2_score,turns,actions\n");
    for result in results {
        let winner = result
            .outcome
            .winner()
            .map_or_else(|| "tie".to_string(), |p| p.number().to_string());
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            result.seed,
            winner,
            result.scores[0],
            result.scores[1],
            result.turns_played,
            result.actions_taken
        ));
    }

    output
}
