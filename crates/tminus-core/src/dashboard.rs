//! Dashboard session state.
//!
//! The single state container of a session: the catalog, the observer
//! location cell and the current selection. It is a plain state machine -- no
//! timers, no I/O. The caller decides when to tick.
//!
//! ## Flow
//!
//! ```text
//! select(id) -> projects once, stores the target
//! tick()     -> subtracts now from the stored target
//! refresh()  -> tick(), projecting again first if the target has passed
//! apply_location(fix) -> swaps coordinates, relabels, re-projects solar selections
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::countdown::Countdown;
use crate::error::Result;
use crate::events::Event;
use crate::geo::{Coordinates, LocationFix, NetworkStatus};
use crate::projection::ProjectionContext;
use crate::solar::SunPositionProvider;

/// The currently selected event and its projected target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub event_id: String,
    pub target: Option<DateTime<Utc>>,
    pub projected_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    catalog: Catalog,
    location: LocationFix,
    selection: Option<Selection>,
}

impl Dashboard {
    /// Start with the given location (usually [`LocationFix::pending`]).
    pub fn new(location: LocationFix) -> Self {
        Self {
            catalog: Catalog::build(&location.label),
            location,
            selection: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn location(&self) -> &LocationFix {
        &self.location
    }

    pub fn coordinates(&self) -> Coordinates {
        self.location.coordinates
    }

    pub fn network_status(&self) -> NetworkStatus {
        self.location.status
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Select `id` and project it once.
    ///
    /// # Errors
    /// [`crate::CoreError::UnknownEvent`] if `id` is not in the catalog; the
    /// previous selection is kept.
    pub fn select<Tz: TimeZone>(
        &mut self,
        id: &str,
        now: &DateTime<Tz>,
        provider: &dyn SunPositionProvider,
    ) -> Result<Event> {
        let descriptor = self.catalog.require(id)?;
        let ctx = ProjectionContext::new(now.clone(), self.location.coordinates, provider);
        let target = descriptor
            .project_next(&ctx)
            .map(|t| t.with_timezone(&Utc));

        tracing::info!(event = id, projected = ?target, "event selected");

        let event = Event::EventSelected {
            event_id: descriptor.id.clone(),
            title: descriptor.title.clone(),
            category: descriptor.category,
            target,
            at: now.with_timezone(&Utc),
        };
        self.selection = Some(Selection {
            event_id: id.to_string(),
            target,
            projected_at: now.with_timezone(&Utc),
        });
        Ok(event)
    }

    /// Countdown for the current selection, `None` when nothing is selected.
    pub fn tick<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<Event> {
        let selection = self.selection.as_ref()?;
        let countdown = Countdown::between(selection.target.as_ref(), now);
        let progress = self
            .catalog
            .get(&selection.event_id)
            .and_then(|d| d.estimate_progress(now));
        Some(Event::CountdownTick {
            event_id: selection.event_id.clone(),
            countdown,
            progress,
            at: now.with_timezone(&Utc),
        })
    }

    /// Per-refresh entry point for live displays.
    ///
    /// Same as [`Dashboard::tick`] while the stored target is ahead. Once it
    /// has passed, the selection is projected again and the fresh
    /// `EventSelected` precedes the tick.
    pub fn refresh<Tz: TimeZone>(
        &mut self,
        now: &DateTime<Tz>,
        provider: &dyn SunPositionProvider,
    ) -> Vec<Event> {
        let Some(selection) = self.selection.as_ref() else {
            return Vec::new();
        };
        let passed = selection
            .target
            .is_some_and(|t| t <= now.with_timezone(&Utc));
        let mut events = Vec::new();
        if passed {
            let id = selection.event_id.clone();
            tracing::debug!(event = %id, "target passed, projecting again");
            if let Ok(event) = self.select(&id, now, provider) {
                events.push(event);
            }
        }
        events.extend(self.tick(now));
        events
    }

    /// Replace the location cell with a lookup result.
    ///
    /// Returns the `LocationResolved` event, followed by a fresh
    /// `EventSelected` when the current selection depends on the location.
    pub fn apply_location<Tz: TimeZone>(
        &mut self,
        fix: LocationFix,
        now: &DateTime<Tz>,
        provider: &dyn SunPositionProvider,
    ) -> Vec<Event> {
        self.catalog.relabel(&fix.label);
        let moved = fix.coordinates != self.location.coordinates;
        self.location = fix;

        let mut events = vec![Event::LocationResolved {
            label: self.location.label.clone(),
            coordinates: self.location.coordinates,
            status: self.location.status,
            at: now.with_timezone(&Utc),
        }];

        let reproject = self.selection.as_ref().and_then(|s| {
            let descriptor = self.catalog.get(&s.event_id)?;
            (moved && descriptor.projection.is_location_dependent()).then(|| s.event_id.clone())
        });
        if let Some(id) = reproject {
            if let Ok(event) = self.select(&id, now, provider) {
                events.push(event);
            }
        }
        events
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(LocationFix::pending())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::SolarDay;
    use chrono::{Duration, FixedOffset, NaiveDate};

    /// Sunset at 18:00 UTC, four minutes earlier per degree east.
    struct LongitudeSun;

    impl SunPositionProvider for LongitudeSun {
        fn solar_day(&self, date: NaiveDate, coordinates: Coordinates) -> SolarDay {
            let midnight = date.and_hms_opt(0, 0, 0).unwrap().and_utc();
            let shift = Duration::minutes((coordinates.longitude() * 4.0) as i64);
            SolarDay {
                sunset: Some(midnight + Duration::hours(18) - shift),
                ..SolarDay::default()
            }
        }
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn select_then_tick() {
        let mut dash = Dashboard::default();
        let now = at("2024-06-01T00:00:00+00:00");
        let event = dash.select("new-year", &now, &LongitudeSun).unwrap();
        match event {
            Event::EventSelected { target, .. } => {
                assert_eq!(target.unwrap().to_rfc3339(), "2025-01-01T00:00:00+00:00")
            }
            other => panic!("unexpected event {other:?}"),
        }

        let later = now + Duration::seconds(1);
        match dash.tick(&later).unwrap() {
            Event::CountdownTick {
                countdown, progress, ..
            } => {
                assert!(countdown.is_remaining());
                assert!(progress.is_some());
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn tick_without_selection_is_none() {
        let dash = Dashboard::default();
        assert!(dash.tick(&at("2024-06-01T00:00:00+00:00")).is_none());
    }

    #[test]
    fn unknown_selection_keeps_previous() {
        let mut dash = Dashboard::default();
        let now = at("2024-06-01T00:00:00+00:00");
        dash.select("christmas", &now, &LongitudeSun).unwrap();
        assert!(dash.select("nope", &now, &LongitudeSun).is_err());
        assert_eq!(dash.selection().unwrap().event_id, "christmas");
    }

    #[test]
    fn tick_reports_reached_once_target_passes() {
        let mut dash = Dashboard::default();
        let now = at("2024-12-31T23:59:58+00:00");
        dash.select("new-year", &now, &LongitudeSun).unwrap();
        match dash.tick(&(now + Duration::seconds(5))).unwrap() {
            Event::CountdownTick { countdown, .. } => assert_eq!(countdown, Countdown::Reached),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn refresh_projects_again_after_target_passes() {
        let greenwich = Coordinates::new(51.48, 0.0).unwrap();
        let mut dash = Dashboard::new(LocationFix::resolved(greenwich, "Greenwich", "GB"));
        let now = at("2024-06-01T17:59:58+00:00");
        dash.select("sunset", &now, &LongitudeSun).unwrap();
        let first = dash.selection().unwrap().target.unwrap();
        assert_eq!(first.to_rfc3339(), "2024-06-01T18:00:00+00:00");

        let later = now + Duration::hours(6);
        let events = dash.refresh(&later, &LongitudeSun);
        assert_eq!(events.len(), 2);
        match &events[0] {
            Event::EventSelected { target, .. } => {
                assert_eq!(target.unwrap().to_rfc3339(), "2024-06-02T18:00:00+00:00")
            }
            other => panic!("unexpected event {other:?}"),
        }
        match &events[1] {
            Event::CountdownTick { countdown, .. } => assert!(countdown.is_remaining()),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn refresh_only_ticks_while_target_is_ahead() {
        let mut dash = Dashboard::default();
        let now = at("2024-06-01T12:00:00+00:00");
        assert!(dash.refresh(&now, &LongitudeSun).is_empty());
        dash.select("christmas", &now, &LongitudeSun).unwrap();
        let events = dash.refresh(&(now + Duration::seconds(1)), &LongitudeSun);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::CountdownTick { .. }));
    }

    #[test]
    fn location_change_reprojects_solar_selection() {
        let mut dash = Dashboard::default();
        let now = at("2024-06-01T06:00:00+00:00");
        dash.select("sunset", &now, &LongitudeSun).unwrap();
        let before = dash.selection().unwrap().target;

        let fix = LocationFix::resolved(Coordinates::new(0.0, 15.0).unwrap(), "Null Island", "");
        let events = dash.apply_location(fix, &now, &LongitudeSun);

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::LocationResolved { .. }));
        let after = dash.selection().unwrap().target;
        assert_ne!(before, after);
        assert_eq!(dash.network_status(), NetworkStatus::Online);
        assert!(dash
            .catalog()
            .get("sunset")
            .unwrap()
            .subtitle
            .contains("NULL ISLAND"));
    }

    #[test]
    fn location_change_leaves_calendar_selection_alone() {
        let mut dash = Dashboard::default();
        let now = at("2024-06-01T06:00:00+00:00");
        dash.select("halloween", &now, &LongitudeSun).unwrap();
        let events = dash.apply_location(LocationFix::offline(), &now, &LongitudeSun);
        assert_eq!(events.len(), 1);
        assert_eq!(dash.network_status(), NetworkStatus::Offline);
    }
}
