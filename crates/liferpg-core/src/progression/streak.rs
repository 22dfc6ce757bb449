//! Daily streak counting.

use chrono::NaiveDate;

/// Streak length after completing on `today`.
///
/// `previous` is the streak and the last day it was extended, if any.
/// Completing twice on one day keeps the streak; completing on the next
/// day extends it; any gap restarts at 1.
pub fn next_streak(previous: Option<(u32, NaiveDate)>, today: NaiveDate) -> u32 {
    let Some((streak, last)) = previous else {
        return 1;
    };

    match (today - last).num_days() {
        0 => streak.max(1),
        1 => streak + 1,
        _ => 1,
    }
}
