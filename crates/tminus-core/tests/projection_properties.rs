//! Property tests for the projection policies.
//!
//! Every policy must answer strictly after `now`, be a pure function of its
//! inputs, and never move backwards as `now` advances.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use proptest::prelude::*;
use tminus_core::geo::Coordinates;
use tminus_core::projection::{
    next_annual_date, next_cycle, next_friday13, next_solar_phase, next_workday_end, period_millis,
};
use tminus_core::solar::{SolarDay, SolarPhase, SunPositionProvider};

/// Sunrise 06:00, noon 12:00, sunset 18:00 UTC; twilight half an hour out.
struct FixedSun;

impl SunPositionProvider for FixedSun {
    fn solar_day(&self, date: NaiveDate, _coordinates: Coordinates) -> SolarDay {
        let at = |h: u32, m: u32| Some(date.and_hms_opt(h, m, 0).unwrap().and_utc());
        SolarDay {
            dawn: at(5, 30),
            sunrise: at(6, 0),
            solar_noon: at(12, 0),
            sunset: at(18, 0),
            dusk: at(18, 30),
        }
    }
}

/// A provider that never knows anything.
struct DarkSun;

impl SunPositionProvider for DarkSun {
    fn solar_day(&self, _date: NaiveDate, _coordinates: Coordinates) -> SolarDay {
        SolarDay::default()
    }
}

// 1971..2099, whole seconds, any whole-hour offset.
fn instant() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (31_536_000i64..4_070_908_800i64, -12i32..=14i32).prop_map(|(secs, hours)| {
        let offset = FixedOffset::east_opt(hours * 3600).unwrap();
        Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&offset)
    })
}

fn phase() -> impl Strategy<Value = SolarPhase> {
    prop::sample::select(SolarPhase::ALL.to_vec())
}

fn month_day() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=12, 1u32..=28)
}

proptest! {
    #[test]
    fn annual_is_future_midnight((month, day) in month_day(), now in instant()) {
        let next = next_annual_date(month, day, &now).unwrap();
        prop_assert!(next > now);
        prop_assert_eq!((next.month(), next.day()), (month, day));
        prop_assert_eq!(next.time(), NaiveTime::MIN);
        prop_assert!(next - now <= Duration::days(366));
    }

    #[test]
    fn annual_is_monotonic((month, day) in month_day(), now in instant(), step in 0i64..10_000_000) {
        let later = now + Duration::seconds(step);
        prop_assert!(
            next_annual_date(month, day, &later).unwrap() >= next_annual_date(month, day, &now).unwrap()
        );
    }

    #[test]
    fn cycle_is_minimal_future_multiple(
        epoch_secs in 0i64..2_000_000_000,
        period_days in 0.01f64..50_000.0,
        now in instant(),
    ) {
        let epoch = Utc.timestamp_opt(epoch_secs, 0).unwrap();
        let next = next_cycle(epoch, period_days, &now).unwrap().with_timezone(&Utc);
        let period = period_millis(period_days).unwrap();

        prop_assert!(next > now);
        prop_assert!(next > epoch);
        prop_assert_eq!((next - epoch).num_milliseconds() % period, 0);
        // One period earlier is either not after now or is the epoch itself.
        let previous = next - Duration::milliseconds(period);
        prop_assert!(previous <= now || previous == epoch);
    }

    #[test]
    fn cycle_is_monotonic(period_days in 0.5f64..1000.0, now in instant(), step in 0i64..100_000_000) {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let later = now + Duration::seconds(step);
        prop_assert!(
            next_cycle(epoch, period_days, &later).unwrap() >= next_cycle(epoch, period_days, &now).unwrap()
        );
    }

    #[test]
    fn workday_end_is_future_weekday_at_five(now in instant()) {
        let next = next_workday_end(&now).unwrap();
        prop_assert!(next > now);
        prop_assert!(!matches!(next.weekday(), Weekday::Sat | Weekday::Sun));
        prop_assert_eq!(next.time(), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        prop_assert!(next - now <= Duration::days(3));
    }

    #[test]
    fn workday_end_is_monotonic(now in instant(), step in 0i64..1_000_000) {
        let later = now + Duration::seconds(step);
        prop_assert!(next_workday_end(&later).unwrap() >= next_workday_end(&now).unwrap());
    }

    #[test]
    fn friday13_is_future_friday_the_13th(now in instant()) {
        let next = next_friday13(&now).unwrap();
        prop_assert!(next > now);
        prop_assert_eq!(next.day(), 13);
        prop_assert_eq!(next.weekday(), Weekday::Fri);
        prop_assert!(next - now <= Duration::days(430));
    }

    #[test]
    fn solar_is_future(phase in phase(), now in instant()) {
        let next = next_solar_phase(phase, Coordinates::DEFAULT, &now, &FixedSun).unwrap();
        prop_assert!(next > now);
        prop_assert!(next - now <= Duration::days(2));
    }

    #[test]
    fn solar_without_data_is_one_day_ahead(phase in phase(), now in instant()) {
        let next = next_solar_phase(phase, Coordinates::DEFAULT, &now, &DarkSun).unwrap();
        prop_assert_eq!(next, now + Duration::days(1));
    }

    #[test]
    fn projections_are_pure(now in instant(), (month, day) in month_day()) {
        prop_assert_eq!(next_annual_date(month, day, &now), next_annual_date(month, day, &now));
        prop_assert_eq!(next_workday_end(&now), next_workday_end(&now));
        prop_assert_eq!(next_friday13(&now), next_friday13(&now));
        let epoch = Utc.with_ymd_and_hms(2024, 4, 8, 18, 17, 0).unwrap();
        prop_assert_eq!(next_cycle(epoch, 6585.3, &now), next_cycle(epoch, 6585.3, &now));
    }
}

#[test]
fn annual_leap_day_skips_to_next_leap_year() {
    let now = DateTime::parse_from_rfc3339("2024-03-01T00:00:00+00:00").unwrap();
    let next = next_annual_date(2, 29, &now).unwrap();
    assert_eq!(next.to_rfc3339(), "2028-02-29T00:00:00+00:00");
}

#[test]
fn cycle_ignores_epoch_in_future() {
    let epoch = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
    let now = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
    let next = next_cycle(epoch, 10.0, &now).unwrap();
    assert_eq!(next.with_timezone(&Utc), epoch + Duration::days(10));
}
