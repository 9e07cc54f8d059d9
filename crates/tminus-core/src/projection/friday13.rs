use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Weekday};

use super::localize;

/// Any 14 consecutive months contain a Friday the 13th.
const MAX_MONTHS_AHEAD: usize = 15;

/// Next local midnight of a Friday the 13th strictly after `now`.
///
/// Scans forward month by month from this month's 13th (next month's when
/// today is already past the 13th) and takes the first 13th that is a
/// Friday and still ahead.
pub fn next_friday13<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut month = MonthCursor::new(today.year(), today.month());
    if today.day() > 13 {
        month.advance();
    }

    for _ in 0..MAX_MONTHS_AHEAD {
        let date = NaiveDate::from_ymd_opt(month.year, month.month, 13)?;
        if date.weekday() == Weekday::Fri {
            let target = localize(&tz, date.and_time(NaiveTime::MIN))?;
            if target > *now {
                return Some(target);
            }
        }
        month.advance();
    }
    None
}

struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    fn advance(&mut self) {
        if self.month == 12 {
            self.year += 1;
            self.month = 1;
        } else {
            self.month += 1;
        }
    }
}
