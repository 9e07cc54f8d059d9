//! The live countdown loop.
//!
//! Three sources are multiplexed on one task:
//!
//! - a repeating interval that recomputes the remaining time and projects
//!   again once the stored target has passed,
//! - a command channel; a new selection projects once and restarts the
//!   interval,
//! - the one-shot geolocation result, consumed at most once.
//!
//! Events go out on an mpsc channel. The loop ends on `Stop`, when the
//! command channel closes, or when nobody listens for events anymore.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use crate::clock::Clock;
use crate::dashboard::Dashboard;
use crate::events::Event;
use crate::geo::LocationFix;
use crate::solar::SunPositionProvider;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerCommand {
    Select(String),
    Stop,
}

pub struct Ticker<C, P> {
    dashboard: Dashboard,
    clock: C,
    provider: P,
    period: Duration,
}

impl<C, P> Ticker<C, P>
where
    C: Clock,
    P: SunPositionProvider,
{
    pub fn new(dashboard: Dashboard, clock: C, provider: P) -> Self {
        Self {
            dashboard,
            clock,
            provider,
            period: DEFAULT_TICK,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        if !period.is_zero() {
            self.period = period;
        }
        self
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Run until stopped. Returns the final dashboard state.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<TickerCommand>,
        mut location: Option<oneshot::Receiver<LocationFix>>,
        events: mpsc::Sender<Event>,
    ) -> Dashboard {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let outgoing: Vec<Event> = tokio::select! {
                _ = interval.tick() => {
                    let now = self.clock.now();
                    self.dashboard.refresh(&now, &self.provider)
                }
                command = commands.recv() => match command {
                    Some(TickerCommand::Select(id)) => {
                        interval.reset();
                        self.handle_select(&id)
                    }
                    Some(TickerCommand::Stop) | None => break,
                },
                fix = next_fix(&mut location), if location.is_some() => {
                    location = None;
                    let now = self.clock.now();
                    self.dashboard.apply_location(fix, &now, &self.provider)
                }
            };

            for event in outgoing {
                if events.send(event).await.is_err() {
                    tracing::debug!("event receiver dropped, stopping ticker");
                    return self.dashboard;
                }
            }
        }

        let at = self.clock.now().with_timezone(&Utc);
        let _ = events.send(Event::TickerStopped { at }).await;
        self.dashboard
    }

    fn handle_select(&mut self, id: &str) -> Vec<Event> {
        let now = self.clock.now();
        match self.dashboard.select(id, &now, &self.provider) {
            Ok(selected) => {
                let mut out = vec![selected];
                out.extend(self.dashboard.tick(&now));
                out
            }
            Err(e) => {
                tracing::warn!(event = id, error = %e, "selection rejected");
                vec![Event::SelectionRejected {
                    event_id: id.to_string(),
                    reason: e.to_string(),
                    at: now.with_timezone(&Utc),
                }]
            }
        }
    }
}

/// Await the lookup result. A dropped sender counts as a failed lookup.
async fn next_fix(location: &mut Option<oneshot::Receiver<LocationFix>>) -> LocationFix {
    match location {
        Some(rx) => rx.await.unwrap_or_else(|_| LocationFix::offline()),
        None => std::future::pending().await,
    }
}
