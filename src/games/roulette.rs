use rand::seq::SliceRandom;
use rand::Rng;

use super::stats::{leaderboard, Stats};

pub const MIN_PLAYERS: usize = 2;
const BAR_WIDTH: u64 = 20;

/// Uniform pick; `None` when there aren't enough players for a round.
pub fn pick_victim<'a, T, R: Rng + ?Sized>(players: &'a [T], rng: &mut R) -> Option<&'a T> {
    if players.len() < MIN_PLAYERS {
        return None;
    }
    players.choose(rng)
}

/// Horizontal bar chart of games played (`█`) and disconnects (`▒`),
/// scaled to the busiest player.
pub fn render_chart(stats: &Stats) -> String {
    let rows = leaderboard(stats);
    let max = rows
        .iter()
        .map(|(_, r)| r.games_played)
        .max()
        .unwrap_or(0)
        .max(1);
    let name_width = rows
        .iter()
        .map(|(_, r)| r.display_name.chars().count())
        .max()
        .unwrap_or(0)
        .min(16);

    let scale = |n: u64| -> usize { ((n * BAR_WIDTH + max - 1) / max) as usize };

    let mut out = String::new();
    for (_, record) in rows {
        let name: String = record.display_name.chars().take(name_width).collect();
        out.push_str(&format!(
            "{name:<name_width$} │{} {}\n{:<name_width$} │{} {}\n",
            "█".repeat(scale(record.games_played)),
            record.games_played,
            "",
            "▒".repeat(scale(record.times_disconnected)),
            record.times_disconnected,
        ));
    }
    out.push_str("\n█ games played   ▒ times disconnected");
    out
}
