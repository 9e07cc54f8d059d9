use chrono::{DateTime, TimeZone, Utc};

use super::one_day_after;
use crate::geo::Coordinates;
use crate::solar::{SolarPhase, SunPositionProvider};

/// Next instant `phase` occurs at `coordinates`.
///
/// Reads today's record (today being `now`'s local date). If today's value
/// is missing, answers `now + 1 day`. If it is not after `now`, tomorrow's
/// record is queried instead; today's value is never shifted forward.
pub fn next_solar_phase<Tz, P>(
    phase: SolarPhase,
    coordinates: Coordinates,
    now: &DateTime<Tz>,
    provider: &P,
) -> Option<DateTime<Tz>>
where
    Tz: TimeZone,
    P: SunPositionProvider + ?Sized,
{
    let field = phase.field();
    let now_utc = now.with_timezone(&Utc);
    let today = now.date_naive();

    let Some(today_at) = provider.solar_day(today, coordinates).get(field) else {
        tracing::debug!(?phase, %today, "no solar value for today, falling back to +1 day");
        return one_day_after(now);
    };
    if today_at > now_utc {
        return Some(today_at.with_timezone(&now.timezone()));
    }

    let tomorrow = today.succ_opt()?;
    match provider.solar_day(tomorrow, coordinates).get(field) {
        Some(at) if at > now_utc => Some(at.with_timezone(&now.timezone())),
        _ => {
            tracing::debug!(?phase, %tomorrow, "no usable solar value for tomorrow, falling back to +1 day");
            one_day_after(now)
        }
    }
}
