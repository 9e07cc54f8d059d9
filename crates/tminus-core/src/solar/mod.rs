//! Solar phases and the sun-position provider seam.
//!
//! The engine never computes solar geometry itself. It asks a
//! [`SunPositionProvider`] for a day's phase instants and only decides
//! between today and tomorrow.

mod spa;

pub use spa::SpaProvider;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Phases a solar event can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolarPhase {
    Sunrise,
    Sunset,
    SolarNoon,
    /// Morning civil twilight.
    FirstLight,
    /// Served from the provider's dusk field.
    BlueHour,
}

/// Provider field a phase is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarField {
    Sunrise,
    Sunset,
    SolarNoon,
    Dawn,
    Dusk,
}

impl SolarPhase {
    pub const ALL: [SolarPhase; 5] = [
        SolarPhase::Sunrise,
        SolarPhase::SolarNoon,
        SolarPhase::Sunset,
        SolarPhase::FirstLight,
        SolarPhase::BlueHour,
    ];

    /// The provider field backing this phase. Blue hour has no native field
    /// and reads evening civil twilight.
    pub fn field(self) -> SolarField {
        match self {
            SolarPhase::Sunrise => SolarField::Sunrise,
            SolarPhase::Sunset => SolarField::Sunset,
            SolarPhase::SolarNoon => SolarField::SolarNoon,
            SolarPhase::FirstLight => SolarField::Dawn,
            SolarPhase::BlueHour => SolarField::Dusk,
        }
    }
}

/// Phase instants for one calendar day. A field is `None` when the provider
/// has no value (polar day/night, numeric failure).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarDay {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub solar_noon: Option<DateTime<Utc>>,
    pub dawn: Option<DateTime<Utc>>,
    pub dusk: Option<DateTime<Utc>>,
}

impl SolarDay {
    pub fn get(&self, field: SolarField) -> Option<DateTime<Utc>> {
        match field {
            SolarField::Sunrise => self.sunrise,
            SolarField::Sunset => self.sunset,
            SolarField::SolarNoon => self.solar_noon,
            SolarField::Dawn => self.dawn,
            SolarField::Dusk => self.dusk,
        }
    }
}

/// External capability: solar phase instants for a date at a location.
pub trait SunPositionProvider: Send + Sync {
    fn solar_day(&self, date: NaiveDate, coordinates: Coordinates) -> SolarDay;
}

impl<P: SunPositionProvider + ?Sized> SunPositionProvider for &P {
    fn solar_day(&self, date: NaiveDate, coordinates: Coordinates) -> SolarDay {
        (**self).solar_day(date, coordinates)
    }
}
