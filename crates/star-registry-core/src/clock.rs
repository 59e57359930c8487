//! Wall-clock time in Unix seconds.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::warn;

/// Current time in Unix seconds.
///
/// A clock set before the Unix epoch reads as 0 and logs a warning; every
/// freshness check fails until the clock is corrected.
pub fn now_secs() -> i64 {
    unix_secs(SystemTime::now())
}

/// Seconds between the Unix epoch and `time`, clamped to 0 for earlier times.
pub fn unix_secs(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(e) => {
            warn!(
                behind_epoch_secs = e.duration().as_secs(),
                "system clock reads before the Unix epoch, using 0"
            );
            0
        }
    }
}
