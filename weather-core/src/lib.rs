//! Core library for the `weather-panel` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider and its error taxonomy
//! - The refresh cycle: primary lookup, reference-city aggregation, local clocks
//! - Panel state, its reducer, and the render-ready view model
//!
//! It is used by `weather-panel`, but can also be reused by other front ends.

pub mod aggregate;
pub mod clock;
pub mod config;
pub mod model;
pub mod provider;
pub mod runtime;
pub mod state;
pub mod theme;
pub mod view;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use model::{REFERENCE_CITIES, ReferenceCity, WeatherObservation};
pub use provider::{ProviderError, WeatherProvider};
pub use runtime::Panel;
pub use state::{Event, PanelState};
pub use view::PanelView;
