//! Integration tests that drive every catalog entry through its projection
//! with the real sun-position provider.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use tminus_core::catalog::{Catalog, Category};
use tminus_core::countdown::Countdown;
use tminus_core::geo::Coordinates;
use tminus_core::projection::ProjectionContext;
use tminus_core::solar::{SolarPhase, SpaProvider, SunPositionProvider};

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).unwrap()
}

fn project(catalog: &Catalog, id: &str, now: DateTime<FixedOffset>, coords: Coordinates) -> DateTime<Utc> {
    let provider = SpaProvider::new();
    let ctx = ProjectionContext::new(now, coords, &provider);
    catalog
        .project(id, &ctx)
        .unwrap()
        .unwrap_or_else(|| panic!("{id} produced no instant"))
        .with_timezone(&Utc)
}

#[test]
fn test_every_entry_projects_into_the_future() {
    let catalog = Catalog::default();
    let places = [
        Coordinates::DEFAULT,
        Coordinates::new(51.5074, -0.1278).unwrap(),
        Coordinates::new(-33.8688, 151.2093).unwrap(),
        Coordinates::new(78.2232, 15.6267).unwrap(),
    ];
    let instants = [
        at("2024-06-01T12:00:00+05:30"),
        at("2024-12-21T23:59:59+00:00"),
        at("2025-03-09T02:30:00-08:00"),
    ];

    for coords in places {
        for now in instants {
            for entry in catalog.entries() {
                let target = project(&catalog, &entry.id, now, coords);
                assert!(target > now, "{} at {now} -> {target}", entry.id);
                let countdown = Countdown::between(Some(&target), &now);
                assert!(countdown.is_remaining(), "{}: {countdown}", entry.id);
            }
        }
    }
}

#[test]
fn test_cycle_entries_land_on_known_instants() {
    let catalog = Catalog::default();
    let now = at("2024-06-01T12:00:00+00:00");
    let coords = Coordinates::DEFAULT;

    assert_eq!(
        project(&catalog, "halley", now, coords).to_rfc3339(),
        "2061-05-29T07:12:00+00:00"
    );
    assert_eq!(
        project(&catalog, "saros-139", now, coords).to_rfc3339(),
        "2042-04-20T01:29:00+00:00"
    );
    assert_eq!(
        project(&catalog, "millennium", now, coords).to_rfc3339(),
        "3000-01-08T00:00:00+00:00"
    );
    let moon = project(&catalog, "full-moon", now, coords);
    assert_eq!(moon.timestamp_millis(), 1_718_965_352_780);
}

#[test]
fn test_calendar_entries_follow_local_midnight() {
    let catalog = Catalog::default();
    let now = at("2024-06-01T12:00:00+09:00");
    let christmas = project(&catalog, "christmas", now, Coordinates::DEFAULT);
    assert_eq!(
        christmas.with_timezone(now.offset()).to_rfc3339(),
        "2024-12-25T00:00:00+09:00"
    );
}

#[test]
fn test_blue_hour_reads_dusk() {
    let provider = SpaProvider::new();
    let coords = Coordinates::new(48.8566, 2.3522).unwrap();
    let now = at("2024-06-01T06:00:00+00:00");
    let date = now.date_naive();

    let catalog = Catalog::default();
    let blue = project(&catalog, "blue-hour", now, coords);
    let sunset = project(&catalog, "sunset", now, coords);
    let dusk = provider.solar_day(date, coords).dusk.unwrap();

    assert_eq!(blue, dusk);
    assert!(blue > sunset);
    assert!(blue - sunset < Duration::hours(2));
}

#[test]
fn test_solar_entries_depend_on_location() {
    let catalog = Catalog::default();
    let now = at("2024-06-01T00:00:00+00:00");
    let london = project(&catalog, "sunset", now, Coordinates::new(51.5074, -0.1278).unwrap());
    let tokyo = project(&catalog, "sunset", now, Coordinates::new(35.6762, 139.6503).unwrap());
    assert_ne!(london, tokyo);

    for entry in catalog.by_category(Category::Atmospheric) {
        assert!(entry.projection.is_location_dependent(), "{}", entry.id);
    }
    assert_eq!(SolarPhase::ALL.len(), catalog.by_category(Category::Atmospheric).count());
}
