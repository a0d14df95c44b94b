use chrono::Local;

use engine::constants::LEADERBOARD_LIMIT;
use engine::validation::sanitize_player_name;
use engine::ScoreEntry;

pub(crate) const DATE_FORMAT: &str = "%d.%m.%Y";

/// Appends a freshly stamped entry, keeps the list sorted by score
/// descending, and trims it to the top ten.
pub(crate) fn push_entry(entries: &mut Vec<ScoreEntry>, player: &str, score: u32) {
    entries.push(ScoreEntry {
        player: sanitize_player_name(player),
        score,
        recorded_on: Local::now().format(DATE_FORMAT).to_string(),
    });
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_LIMIT);
}
