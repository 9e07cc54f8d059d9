//! Date-projection engine.
//!
//! Each recurrence policy maps the evaluation instant (plus policy
//! parameters) to the next occurrence of an event. Every projector is pure
//! and returns an instant strictly after `now`. `None` means no instant
//! exists: the date never occurs in the calendar, or the result falls outside
//! the representable range.
//!
//! Projectors are generic over [`TimeZone`]; calendar decisions (midnight,
//! 17:00, day of week) are taken in `now`'s zone.

mod annual;
mod cycle;
mod friday13;
mod solar;
mod workday;

pub use annual::next_annual_date;
pub use cycle::{next_cycle, period_millis};
pub use friday13::next_friday13;
pub use solar::next_solar_phase;
pub use workday::{next_workday_end, WORKDAY_END_HOUR};

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::solar::{SolarPhase, SunPositionProvider};

/// Everything a projection may read besides its own parameters.
pub struct ProjectionContext<'a, Tz: TimeZone> {
    pub now: DateTime<Tz>,
    pub coordinates: Coordinates,
    pub provider: &'a dyn SunPositionProvider,
}

impl<'a, Tz: TimeZone> ProjectionContext<'a, Tz> {
    pub fn new(
        now: DateTime<Tz>,
        coordinates: Coordinates,
        provider: &'a dyn SunPositionProvider,
    ) -> Self {
        Self {
            now,
            coordinates,
            provider,
        }
    }
}

/// A recurrence policy together with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum Projection {
    /// Next occurrence of a solar phase at the context coordinates.
    Solar { phase: SolarPhase },
    /// `epoch + k * period_days`, fractional days allowed.
    Cycle {
        epoch: DateTime<Utc>,
        period_days: f64,
    },
    /// A calendar date recurring every year. `month` is 1-based.
    Annual { month: u32, day: u32 },
    /// Next weekday at [`WORKDAY_END_HOUR`].
    WorkdayEnd,
    /// Next 13th of a month falling on a Friday.
    Friday13,
}

impl Projection {
    pub fn project<Tz: TimeZone>(&self, ctx: &ProjectionContext<'_, Tz>) -> Option<DateTime<Tz>> {
        let now = &ctx.now;
        let target = match *self {
            Projection::Solar { phase } => {
                next_solar_phase(phase, ctx.coordinates, now, ctx.provider)
            }
            Projection::Cycle { epoch, period_days } => next_cycle(epoch, period_days, now),
            Projection::Annual { month, day } => next_annual_date(month, day, now),
            Projection::WorkdayEnd => next_workday_end(now),
            Projection::Friday13 => next_friday13(now),
        };
        tracing::debug!(
            policy = self.name(),
            now = %now.with_timezone(&Utc),
            result = ?target.as_ref().map(|t| t.with_timezone(&Utc)),
            "projected"
        );
        target
    }

    pub fn name(&self) -> &'static str {
        match self {
            Projection::Solar { .. } => "solar",
            Projection::Cycle { .. } => "cycle",
            Projection::Annual { .. } => "annual",
            Projection::WorkdayEnd => "workday-end",
            Projection::Friday13 => "friday-13",
        }
    }

    /// Whether the result only depends on the observer location.
    pub fn is_location_dependent(&self) -> bool {
        matches!(self, Projection::Solar { .. })
    }
}

/// Resolve a local wall-clock time in `tz`. Ambiguous times take the earlier
/// instant; times inside a DST gap are pushed one hour forward.
pub(crate) fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        let shifted = naive.checked_add_signed(Duration::hours(1))?;
        tz.from_local_datetime(&shifted).earliest()
    })
}

/// The "data unavailable" answer shared by the projectors.
pub(crate) fn one_day_after<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    now.clone().checked_add_signed(Duration::days(1))
}
