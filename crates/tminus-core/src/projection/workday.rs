use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Weekday};

use super::localize;

/// Local hour at which the workday ends.
pub const WORKDAY_END_HOUR: u32 = 17;

/// Next Monday-Friday instant at [`WORKDAY_END_HOUR`]:00:00 local, strictly
/// after `now`.
pub fn next_workday_end<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let end = NaiveTime::from_hms_opt(WORKDAY_END_HOUR, 0, 0)?;

    let mut date = now.date_naive();
    if localize(&tz, date.and_time(end))? <= *now {
        date = date.succ_opt()?;
    }
    while is_weekend(date) {
        date = date.succ_opt()?;
    }
    localize(&tz, date.and_time(end))
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
