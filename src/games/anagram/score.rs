use std::time::Duration;

pub const MAX_POINTS: u32 = 10;
pub const MIN_POINTS: u32 = 1;

/// Points for a correct answer: one less per whole second taken, never below [`MIN_POINTS`].
pub fn score(elapsed: Duration) -> u32 {
    let seconds = u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX);
    MAX_POINTS.saturating_sub(seconds).max(MIN_POINTS)
}
