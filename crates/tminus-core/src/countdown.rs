//! Remaining-time breakdown shown once per second.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// What the display should show for a projected target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum Countdown {
    Remaining {
        days: i64,
        hours: u32,
        minutes: u32,
        seconds: u32,
        total_seconds: i64,
    },
    /// Less than one whole second ahead of now (stale projection); the display syncs.
    Reached,
    /// The projection produced no instant.
    TemporalError,
}

impl Countdown {
    pub fn between<T: TimeZone, N: TimeZone>(
        target: Option<&DateTime<T>>,
        now: &DateTime<N>,
    ) -> Self {
        let Some(target) = target else {
            return Countdown::TemporalError;
        };
        // Whole seconds only; under one second left reads as reached.
        let total_seconds = (target.with_timezone(&Utc) - now.with_timezone(&Utc)).num_seconds();
        if total_seconds <= 0 {
            return Countdown::Reached;
        }
        Self::from_seconds(total_seconds)
    }

    fn from_seconds(total_seconds: i64) -> Self {
        let days = total_seconds / 86_400;
        let rest = total_seconds % 86_400;
        Countdown::Remaining {
            days,
            hours: (rest / 3600) as u32,
            minutes: ((rest % 3600) / 60) as u32,
            seconds: (rest % 60) as u32,
            total_seconds,
        }
    }

    pub fn is_remaining(&self) -> bool {
        matches!(self, Countdown::Remaining { .. })
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
                ..
            } => write!(f, "{days}d {hours:02}h {minutes:02}m {seconds:02}s"),
            Countdown::Reached => f.write_str("EVENT REACHED // SYNCING"),
            Countdown::TemporalError => f.write_str("TEMPORAL ERROR"),
        }
    }
}
