use chrono::{DateTime, TimeZone, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Period length in whole milliseconds. `None` for non-positive, NaN or
/// overflowing periods.
pub fn period_millis(period_days: f64) -> Option<i64> {
    let ms = (period_days * MILLIS_PER_DAY).round();
    if !ms.is_finite() || ms < 1.0 || ms >= i64::MAX as f64 {
        return None;
    }
    Some(ms as i64)
}

/// Smallest `epoch + k * period` strictly after `now`, with `k >= 1`.
///
/// Arithmetic is done on `i64` milliseconds, so periods of hundreds of
/// thousands of days stay exact. An epoch in the future yields
/// `epoch + period`, never the epoch itself.
pub fn next_cycle<Tz: TimeZone>(
    epoch: DateTime<Utc>,
    period_days: f64,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let period = period_millis(period_days)?;
    let epoch_ms = epoch.timestamp_millis();
    let elapsed = now.timestamp_millis().checked_sub(epoch_ms)?;

    // floor + 1 rather than ceil: an exact multiple of the period is "now",
    // which is not in the future.
    let periods = (elapsed.div_euclid(period) + 1).max(1);

    let target_ms = periods
        .checked_mul(period)
        .and_then(|offset| epoch_ms.checked_add(offset))?;
    let target = DateTime::<Utc>::from_timestamp_millis(target_ms)?;
    Some(target.with_timezone(&now.timezone()))
}
