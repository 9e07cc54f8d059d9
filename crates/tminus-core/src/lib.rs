//! # T-Minus Core Library
//!
//! This library provides the core logic for the T-Minus countdown dashboard.
//! It follows a CLI-first approach: the `tminus` binary is a thin front end
//! over the same projection engine, dashboard state and ticker found here.
//!
//! ## Architecture
//!
//! - **Projection**: pure functions that answer "when does this happen next,
//!   strictly after now?" for solar phases, fixed-period cycles, annual
//!   dates, workday ends and Friday-the-13ths
//! - **Catalog**: the fixed list of tracked events, each bound to one
//!   projection policy and an optional progress estimator
//! - **Geo**: the observer location cell and the one-shot IP lookup
//! - **Dashboard / Ticker**: session state plus the async loop that turns
//!   selections and location results into [`Event`]s
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Projection`]: policy value bound to every catalog entry
//! - [`Catalog`]: event descriptors grouped by [`Category`]
//! - [`Dashboard`]: selection and location state machine
//! - [`Ticker`]: once-per-second countdown loop
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod clock;
pub mod countdown;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod geo;
pub mod progress;
pub mod projection;
pub mod solar;
pub mod storage;
pub mod ticker;

pub use catalog::{Catalog, Category, EventDescriptor, Visualization};
pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::Countdown;
pub use dashboard::{Dashboard, Selection};
pub use error::{ConfigError, CoreError, GeoError, Result, ValidationError};
pub use events::Event;
pub use geo::{Coordinates, GeoLocator, LocationFix, NetworkStatus};
pub use progress::ProgressEstimate;
pub use projection::{Projection, ProjectionContext};
pub use solar::{SolarDay, SolarPhase, SpaProvider, SunPositionProvider};
pub use storage::Config;
pub use ticker::{Ticker, TickerCommand};
