use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone};

use super::localize;

/// Feb 29 recurs at least once in any 8 consecutive years (e.g. 2096 -> 2104).
const MAX_YEARS_AHEAD: i32 = 8;

/// Next local midnight of `month`/`day` (1-based month) strictly after `now`.
///
/// This year's date is used while its midnight is still ahead, otherwise the
/// following year's. Feb 29 resolves to the next leap year. Dates that exist
/// in no year (April 31, month 13) yield `None`.
pub fn next_annual_date<Tz: TimeZone>(
    month: u32,
    day: u32,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let this_year = now.year();

    for year in this_year..=this_year.checked_add(MAX_YEARS_AHEAD)? {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        let target = localize(&tz, date.and_time(NaiveTime::MIN))?;
        if target > *now {
            return Some(target);
        }
    }
    None
}
