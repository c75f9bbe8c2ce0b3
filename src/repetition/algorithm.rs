//! Review scheduling
//!
//! Fixed exponential backoff: 5 minutes, 1 hour, 1 day, 3 days, 7 days.
//! The rehearsal count indexes the table and is clamped to its last entry.

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Review intervals in milliseconds, indexed by rehearsal count
pub const REVIEW_INTERVALS_MS: [i64; 5] = [5 * MINUTE_MS, HOUR_MS, DAY_MS, 3 * DAY_MS, 7 * DAY_MS];

/// Successful reviews needed before a pair stops being tracked
pub const GRADUATION_REHEARSALS: u32 = 5;

/// Session failures of the same pair before it is persisted
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 2;

/// Calculate when a pair should next be reviewed
pub fn calculate_next_review(rehearsal_count: u32, now: i64) -> i64 {
    let index = (rehearsal_count as usize).min(REVIEW_INTERVALS_MS.len() - 1);
    now + REVIEW_INTERVALS_MS[index]
}

/// Format a duration in milliseconds to a short human-readable string
pub fn format_interval(millis: i64) -> String {
    if millis <= 0 {
        "now".to_string()
    } else if millis < HOUR_MS {
        format!("{}m", (millis + MINUTE_MS - 1) / MINUTE_MS)
    } else if millis < DAY_MS {
        format!("{}h", millis / HOUR_MS)
    } else if millis < 7 * DAY_MS {
        format!("{}d", millis / DAY_MS)
    } else {
        format!("{}w", millis / (7 * DAY_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: i64 = 1_700_000_000_000;

    #[test]
    fn test_first_interval_is_five_minutes() {
        assert_eq!(calculate_next_review(0, T), T + 300_000);
    }

    #[test]
    fn test_interval_clamps_to_seven_days() {
        assert_eq!(calculate_next_review(4, T), T + 604_800_000);
        assert_eq!(calculate_next_review(10, T), T + 604_800_000);
    }

    #[test]
    fn test_intervals_widen() {
        let mut previous = 0;
        for count in 0..5 {
            let next = calculate_next_review(count, 0);
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(-5), "now");
        assert_eq!(format_interval(30_000), "1m");
        assert_eq!(format_interval(5 * MINUTE_MS), "5m");
        assert_eq!(format_interval(HOUR_MS), "1h");
        assert_eq!(format_interval(DAY_MS), "1d");
        assert_eq!(format_interval(3 * DAY_MS), "3d");
        assert_eq!(format_interval(7 * DAY_MS), "1w");
    }
}
