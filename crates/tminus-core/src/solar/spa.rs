//! Default sun-position provider backed by the NREL SPA implementation in
//! `solar-positioning`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use solar_positioning::{spa, Horizon, SunriseResult};

use super::{SolarDay, SunPositionProvider};
use crate::geo::Coordinates;

/// Delta T (TT - UT) in seconds, adequate for the 2020s.
const DELTA_T_SECONDS: f64 = 69.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpaProvider;

impl SpaProvider {
    pub fn new() -> Self {
        Self
    }

    /// Returns (rise, transit, set) for the given horizon.
    fn rise_transit_set(
        &self,
        date: NaiveDate,
        coordinates: Coordinates,
        horizon: Horizon,
    ) -> (
        Option<DateTime<Utc>>,
        Option<DateTime<Utc>>,
        Option<DateTime<Utc>>,
    ) {
        let (Ok(month), Ok(day)) = (date.month().try_into(), date.day().try_into()) else {
            return (None, None, None);
        };
        let result = spa::sunrise_sunset_utc_for_horizon(
            date.year(),
            month,
            day,
            coordinates.latitude(),
            coordinates.longitude(),
            DELTA_T_SECONDS,
            horizon,
        );

        match result {
            Ok(SunriseResult::RegularDay {
                sunrise,
                transit,
                sunset,
            }) => (
                at_hours(date, sunrise.hours()),
                at_hours(date, transit.hours()),
                at_hours(date, sunset.hours()),
            ),
            Ok(SunriseResult::AllDay { transit }) | Ok(SunriseResult::AllNight { transit }) => {
                (None, at_hours(date, transit.hours()), None)
            }
            Err(e) => {
                tracing::debug!(%date, error = %e, "sun position calculation failed");
                (None, None, None)
            }
        }
    }
}

impl SunPositionProvider for SpaProvider {
    fn solar_day(&self, date: NaiveDate, coordinates: Coordinates) -> SolarDay {
        let (sunrise, solar_noon, sunset) =
            self.rise_transit_set(date, coordinates, Horizon::SunriseSunset);
        let (dawn, _, dusk) = self.rise_transit_set(date, coordinates, Horizon::CivilTwilight);
        SolarDay {
            sunrise,
            sunset,
            solar_noon,
            dawn,
            dusk,
        }
    }
}

/// `hours` is measured from UTC midnight of `date` and may fall outside 0..24.
fn at_hours(date: NaiveDate, hours: f64) -> Option<DateTime<Utc>> {
    if !hours.is_finite() {
        return None;
    }
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    let offset = Duration::try_milliseconds((hours * 3_600_000.0).round() as i64)?;
    midnight.checked_add_signed(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_day_orders_phases() {
        let sf = Coordinates::new(37.7749, -122.4194).unwrap();
        let date = NaiveDate::from_ymd_opt(2023, 6, 21).unwrap();
        let day = SpaProvider::new().solar_day(date, sf);

        let dawn = day.dawn.unwrap();
        let sunrise = day.sunrise.unwrap();
        let noon = day.solar_noon.unwrap();
        let sunset = day.sunset.unwrap();
        let dusk = day.dusk.unwrap();
        assert!(dawn < sunrise);
        assert!(sunrise < noon);
        assert!(noon < sunset);
        assert!(sunset < dusk);
        // Summer solstice day length in San Francisco is roughly 14h 46m.
        let length = (sunset - sunrise).num_minutes();
        assert!((870..=900).contains(&length), "day length {length}");
    }

    #[test]
    fn polar_day_has_no_sunrise() {
        let svalbard = Coordinates::new(78.2232, 15.6267).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let day = SpaProvider::new().solar_day(date, svalbard);
        assert!(day.sunrise.is_none());
        assert!(day.sunset.is_none());
        assert!(day.dusk.is_none());
        assert!(day.solar_noon.is_some());
    }

    #[test]
    fn at_hours_rejects_nan() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(at_hours(date, f64::NAN).is_none());
        let late = at_hours(date, 26.5).unwrap();
        assert_eq!(late.to_rfc3339(), "2024-01-02T02:30:00+00:00");
    }
}
