//! The fixed event catalog.
//!
//! Descriptors are plain data: a projection policy and an optional progress
//! estimate instead of closures over outer state, so a catalog can be shared
//! freely. Only the atmospheric entries mention the observer location; they
//! are rebuilt by [`Catalog::relabel`] while their ids stay put.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::progress::ProgressEstimate;
use crate::projection::{Projection, ProjectionContext};
use crate::solar::SolarPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Atmospheric,
    Chronological,
    Cosmic,
    Anomalous,
    DeepTime,
}

/// How a category is drawn. One strategy per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visualization {
    SolarArc,
    CalendarGrid,
    OrbitRing,
    GlitchField,
    StrataBars,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Atmospheric,
        Category::Chronological,
        Category::Cosmic,
        Category::Anomalous,
        Category::DeepTime,
    ];

    pub fn visualization(self) -> Visualization {
        match self {
            Category::Atmospheric => Visualization::SolarArc,
            Category::Chronological => Visualization::CalendarGrid,
            Category::Cosmic => Visualization::OrbitRing,
            Category::Anomalous => Visualization::GlitchField,
            Category::DeepTime => Visualization::StrataBars,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Atmospheric => "atmospheric",
            Category::Chronological => "chronological",
            Category::Cosmic => "cosmic",
            Category::Anomalous => "anomalous",
            Category::DeepTime => "deep-time",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                crate::error::ValidationError::InvalidValue {
                    field: "category".into(),
                    message: format!("unknown category '{s}'"),
                }
                .into()
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub subtitle: String,
    /// CSS-style hex color.
    pub color: String,
    pub projection: Projection,
    #[serde(default)]
    pub progress: Option<ProgressEstimate>,
}

impl EventDescriptor {
    fn new(
        id: &str,
        category: Category,
        title: &str,
        subtitle: impl Into<String>,
        color: &str,
        projection: Projection,
        progress: Option<ProgressEstimate>,
    ) -> Self {
        Self {
            id: id.to_string(),
            category,
            title: title.to_string(),
            subtitle: subtitle.into(),
            color: color.to_string(),
            projection,
            progress,
        }
    }

    pub fn project_next<Tz: TimeZone>(&self, ctx: &ProjectionContext<'_, Tz>) -> Option<DateTime<Tz>> {
        self.projection.project(ctx)
    }

    /// Decorative progress in `0.0..=1.0`, if the event carries an estimator.
    pub fn estimate_progress<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<f64> {
        self.progress.as_ref().map(|p| p.estimate(now))
    }

    pub fn visualization(&self) -> Visualization {
        self.category.visualization()
    }
}

/// Ordered, immutable list of descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    location_label: String,
    entries: Vec<EventDescriptor>,
}

impl Catalog {
    pub fn build(location_label: &str) -> Self {
        let mut entries = atmospheric(location_label);
        entries.extend(chronological());
        entries.extend(cosmic());
        entries.extend(anomalous());
        entries.extend(deep_time());
        Self {
            location_label: location_label.to_string(),
            entries,
        }
    }

    pub fn location_label(&self) -> &str {
        &self.location_label
    }

    pub fn entries(&self) -> &[EventDescriptor] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&EventDescriptor> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Like [`Catalog::get`] but reports unknown ids as an error.
    pub fn require(&self, id: &str) -> Result<&EventDescriptor> {
        self.get(id)
            .ok_or_else(|| CoreError::UnknownEvent(id.to_string()))
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &EventDescriptor> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn project<Tz: TimeZone>(
        &self,
        id: &str,
        ctx: &ProjectionContext<'_, Tz>,
    ) -> Result<Option<DateTime<Tz>>> {
        Ok(self.require(id)?.project_next(ctx))
    }

    /// Rebuild the location-dependent descriptors for a new label. Returns
    /// `false` when the label is unchanged and nothing was rebuilt.
    pub fn relabel(&mut self, location_label: &str) -> bool {
        if self.location_label == location_label {
            return false;
        }
        let fresh = atmospheric(location_label);
        for entry in self.entries.iter_mut() {
            if let Some(updated) = fresh.iter().find(|f| f.id == entry.id) {
                *entry = updated.clone();
            }
        }
        self.location_label = location_label.to_string();
        tracing::debug!(label = location_label, "atmospheric events relabeled");
        true
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::build(crate::geo::PLACEHOLDER_LABEL)
    }
}

/// Catalog epoch from a literal date. An invalid date is logged and pinned to
/// the Unix epoch.
fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(|| {
            tracing::error!(year, month, day, hour, minute, "invalid catalog epoch");
            DateTime::<Utc>::default()
        })
}

fn cycle(epoch: DateTime<Utc>, period_days: f64) -> (Projection, Option<ProgressEstimate>) {
    (
        Projection::Cycle { epoch, period_days },
        Some(ProgressEstimate::Cycle { epoch, period_days }),
    )
}

fn atmospheric(label: &str) -> Vec<EventDescriptor> {
    let solar = |phase| Projection::Solar { phase };
    let day = Some(ProgressEstimate::DayFraction);
    vec![
        EventDescriptor::new(
            "sunrise",
            Category::Atmospheric,
            "SUNRISE",
            format!("Solar ascent over {label}"),
            "#ffb347",
            solar(SolarPhase::Sunrise),
            day.clone(),
        ),
        EventDescriptor::new(
            "solar-noon",
            Category::Atmospheric,
            "SOLAR NOON",
            format!("Zenith transit above {label}"),
            "#fff176",
            solar(SolarPhase::SolarNoon),
            day.clone(),
        ),
        EventDescriptor::new(
            "sunset",
            Category::Atmospheric,
            "SUNSET",
            format!("Solar descent beyond {label}"),
            "#ff7043",
            solar(SolarPhase::Sunset),
            day.clone(),
        ),
        EventDescriptor::new(
            "first-light",
            Category::Atmospheric,
            "FIRST LIGHT",
            format!("Civil dawn breaks over {label}"),
            "#b39ddb",
            solar(SolarPhase::FirstLight),
            day.clone(),
        ),
        EventDescriptor::new(
            "blue-hour",
            Category::Atmospheric,
            "BLUE HOUR",
            format!("Civil dusk settles on {label}"),
            "#4fc3f7",
            solar(SolarPhase::BlueHour),
            day,
        ),
    ]
}

fn chronological() -> Vec<EventDescriptor> {
    let annual = |month, day| Projection::Annual { month, day };
    let year = Some(ProgressEstimate::YearFraction);
    vec![
        EventDescriptor::new(
            "new-year",
            Category::Chronological,
            "NEW YEAR",
            "Calendar rollover",
            "#e0e0e0",
            annual(1, 1),
            year.clone(),
        ),
        EventDescriptor::new(
            "leap-day",
            Category::Chronological,
            "LEAP DAY",
            "February 29, the correction day",
            "#aed581",
            annual(2, 29),
            year.clone(),
        ),
        EventDescriptor::new(
            "halloween",
            Category::Chronological,
            "HALLOWEEN",
            "The veil thins",
            "#ff9800",
            annual(10, 31),
            year.clone(),
        ),
        EventDescriptor::new(
            "winter-solstice-eve",
            Category::Chronological,
            "SOLSTICE EVE",
            "Longest night, northern calendar",
            "#90caf9",
            annual(12, 21),
            year.clone(),
        ),
        EventDescriptor::new(
            "christmas",
            Category::Chronological,
            "CHRISTMAS",
            "December 25",
            "#ef5350",
            annual(12, 25),
            year,
        ),
        EventDescriptor::new(
            "workday-end",
            Category::Chronological,
            "END OF SHIFT",
            "Next weekday at 17:00",
            "#66bb6a",
            Projection::WorkdayEnd,
            Some(ProgressEstimate::Workday),
        ),
    ]
}

fn cosmic() -> Vec<EventDescriptor> {
    let (full_moon, full_moon_progress) = cycle(utc(2000, 1, 21, 4, 40), 29.530589);
    let (saros, saros_progress) = cycle(utc(2024, 4, 8, 18, 17), 6585.3);
    let (halley, halley_progress) = cycle(utc(1986, 2, 9, 0, 0), 27_503.3);
    vec![
        EventDescriptor::new(
            "full-moon",
            Category::Cosmic,
            "FULL MOON",
            "Synodic month, 29.53 days",
            "#eceff1",
            full_moon,
            full_moon_progress,
        ),
        EventDescriptor::new(
            "saros-139",
            Category::Cosmic,
            "SAROS 139",
            "Total solar eclipse recurrence",
            "#ffd54f",
            saros,
            saros_progress,
        ),
        EventDescriptor::new(
            "halley",
            Category::Cosmic,
            "HALLEY'S COMET",
            "Perihelion return, ~75.3 years",
            "#80deea",
            halley,
            halley_progress,
        ),
    ]
}

fn anomalous() -> Vec<EventDescriptor> {
    let (echo, echo_progress) = cycle(utc(2019, 3, 14, 0, 0), 413.4);
    vec![
        EventDescriptor::new(
            "friday-13",
            Category::Anomalous,
            "FRIDAY THE 13TH",
            "Calendar misalignment detected",
            "#d50000",
            Projection::Friday13,
            Some(ProgressEstimate::Static { fraction: 0.13 }),
        ),
        EventDescriptor::new(
            "signal-echo",
            Category::Anomalous,
            "SIGNAL ECHO",
            "Unexplained 413.4-day recurrence",
            "#00e676",
            echo,
            echo_progress,
        ),
    ]
}

fn deep_time() -> Vec<EventDescriptor> {
    let (millennium, millennium_progress) = cycle(utc(2000, 1, 1, 0, 0), 365_250.0);
    vec![
        EventDescriptor::new(
            "millennium",
            Category::DeepTime,
            "NEXT MILLENNIUM",
            "365 250 days from 2000-01-01",
            "#bcaaa4",
            millennium,
            millennium_progress,
        ),
        EventDescriptor::new(
            "precession",
            Category::DeepTime,
            "GREAT YEAR",
            "Axial precession, ~25 772 years",
            "#9575cd",
            Projection::Cycle {
                epoch: utc(2000, 1, 1, 0, 0),
                period_days: 9_413_223.0,
            },
            Some(ProgressEstimate::Static { fraction: 0.001 }),
        ),
    ]
}
