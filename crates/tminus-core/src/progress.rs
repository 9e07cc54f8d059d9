//! Decorative progress estimates.
//!
//! These drive the per-category gauges only. They are coarse by nature and
//! carry no guarantee beyond staying within `0.0..=1.0`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::projection::{period_millis, WORKDAY_END_HOUR};

const WORKDAY_START_HOUR: u32 = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProgressEstimate {
    /// Seconds since local midnight over 86 400.
    DayFraction,
    /// Elapsed share of the current calendar year.
    YearFraction,
    /// Share of the 09:00-17:00 window on weekdays; zero on weekends.
    Workday,
    /// Time since the last aligned cycle instant over the period.
    Cycle {
        epoch: DateTime<Utc>,
        period_days: f64,
    },
    /// Fixed placeholder for events without a meaningful cycle start.
    Static { fraction: f64 },
}

impl ProgressEstimate {
    pub fn estimate<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> f64 {
        let raw = match self {
            ProgressEstimate::DayFraction => {
                f64::from(now.num_seconds_from_midnight()) / 86_400.0
            }
            ProgressEstimate::YearFraction => year_fraction(now),
            ProgressEstimate::Workday => workday_fraction(now),
            ProgressEstimate::Cycle { epoch, period_days } => {
                cycle_fraction(*epoch, *period_days, now)
            }
            ProgressEstimate::Static { fraction } => *fraction,
        };
        clamp_unit(raw)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

fn year_fraction<Tz: TimeZone>(now: &DateTime<Tz>) -> f64 {
    let year = now.year();
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year + 1, 1, 1),
    ) else {
        return 0.0;
    };
    let start = start.and_time(NaiveTime::MIN);
    let end = end.and_time(NaiveTime::MIN);
    let elapsed = (now.naive_local() - start).num_seconds() as f64;
    let total = (end - start).num_seconds() as f64;
    elapsed / total
}

fn workday_fraction<Tz: TimeZone>(now: &DateTime<Tz>) -> f64 {
    if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
        return 0.0;
    }
    let start = f64::from(WORKDAY_START_HOUR * 3600);
    let end = f64::from(WORKDAY_END_HOUR * 3600);
    (f64::from(now.num_seconds_from_midnight()) - start) / (end - start)
}

fn cycle_fraction<Tz: TimeZone>(epoch: DateTime<Utc>, period_days: f64, now: &DateTime<Tz>) -> f64 {
    let Some(period) = period_millis(period_days) else {
        return 0.0;
    };
    let elapsed = now.timestamp_millis() - epoch.timestamp_millis();
    if elapsed < 0 {
        return 0.0;
    }
    elapsed.rem_euclid(period) as f64 / period as f64
}
