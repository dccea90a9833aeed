use crate::clock::Clock;
use crate::dates::to_day_key;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Upper bound on the backward walk, roughly ten years.
pub const MAX_STREAK_DAYS: u32 = 3650;

/// Consecutive completed days ending at `today`. Zero when today itself is not
/// completed, whatever came before it.
pub fn calc_streak(completed: &BTreeSet<String>, today: NaiveDate) -> u32 {
    if completed.is_empty() {
        return 0;
    }

    let mut streak = 0;
    let mut cursor = today;
    while streak < MAX_STREAK_DAYS && completed.contains(&to_day_key(cursor)) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

pub fn current_streak(completed: &BTreeSet<String>, clock: &dyn Clock) -> u32 {
    calc_streak(completed, clock.today())
}
