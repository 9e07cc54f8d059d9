use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::countdown::Countdown;
use crate::geo::{Coordinates, NetworkStatus};

/// Every dashboard state change produces an Event.
/// The front end renders them; `--json` prints them one per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A new event was selected and projected once.
    EventSelected {
        event_id: String,
        title: String,
        category: Category,
        /// `None` when the projection produced no instant.
        target: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
    /// The selected id is not in the catalog; the previous selection stays.
    SelectionRejected {
        event_id: String,
        reason: String,
        at: DateTime<Utc>,
    },
    /// One-second refresh of the remaining time.
    CountdownTick {
        event_id: String,
        countdown: Countdown,
        progress: Option<f64>,
        at: DateTime<Utc>,
    },
    /// The geolocation lookup finished (successfully or with the fallback).
    LocationResolved {
        label: String,
        coordinates: Coordinates,
        status: NetworkStatus,
        at: DateTime<Utc>,
    },
    TickerStopped {
        at: DateTime<Utc>,
    },
}
