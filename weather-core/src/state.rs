//! Panel state as one record, advanced by a pure reducer.
//!
//! Every refresh cycle gets a new id. Results carry the id of the cycle that
//! produced them, and anything older than the current cycle is dropped, so
//! overlapping cycles can never interleave their results.

use crate::{
    model::{AggregatedTable, LocalTimeTable, WeatherObservation},
    provider::ProviderError,
    theme::{self, Gradient},
};

pub type CycleId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    pub selected_city: String,
    pub cycle: CycleId,
    /// Primary lookup in flight.
    pub loading: bool,
    pub primary: Option<WeatherObservation>,
    pub theme: Gradient,
    pub times: LocalTimeTable,
    pub aggregated: AggregatedTable,
}

impl PanelState {
    /// Fresh state for `city`. Nothing has been fetched yet; the first
    /// refresh is requested through [`PanelState::initial_command`].
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            selected_city: city.into(),
            cycle: 0,
            loading: false,
            primary: None,
            theme: Gradient::default(),
            times: LocalTimeTable::new(),
            aggregated: AggregatedTable::new(),
        }
    }

    /// Kick off cycle 1 for the startup city.
    pub fn initial_command(&self) -> Transition {
        start_cycle(self, self.selected_city.clone())
    }
}

#[derive(Debug)]
pub enum Event {
    /// Raw text from the city input.
    InputChanged(String),
    PrimaryLoaded {
        cycle: CycleId,
        result: Result<WeatherObservation, ProviderError>,
    },
    TimesComputed {
        cycle: CycleId,
        table: LocalTimeTable,
    },
    AggregationCompleted {
        cycle: CycleId,
        table: AggregatedTable,
    },
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh { cycle: CycleId, city: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PanelState,
    pub command: Option<Command>,
}

impl Transition {
    fn unchanged(state: &PanelState) -> Self {
        Self {
            state: state.clone(),
            command: None,
        }
    }

    fn to(state: PanelState) -> Self {
        Self {
            state,
            command: None,
        }
    }

    pub fn changed_from(&self, previous: &PanelState) -> bool {
        &self.state != previous
    }
}

fn start_cycle(state: &PanelState, city: String) -> Transition {
    let cycle = state.cycle + 1;
    let next = PanelState {
        selected_city: city.clone(),
        cycle,
        loading: true,
        ..state.clone()
    };

    Transition {
        state: next,
        command: Some(Command::Refresh { cycle, city }),
    }
}

fn is_stale(state: &PanelState, cycle: CycleId, what: &'static str) -> bool {
    let stale = cycle != state.cycle;
    if stale {
        tracing::debug!(message = "dropping result from superseded cycle", what, cycle, current = state.cycle);
    }
    stale
}

pub fn reduce(state: &PanelState, event: Event) -> Transition {
    match event {
        Event::InputChanged(raw) => {
            let city = raw.trim();
            if city.is_empty() || city == state.selected_city {
                return Transition::unchanged(state);
            }
            start_cycle(state, city.to_string())
        }

        Event::PrimaryLoaded { cycle, result } => {
            if is_stale(state, cycle, "primary") {
                return Transition::unchanged(state);
            }

            let next = match result {
                Ok(observation) => PanelState {
                    loading: false,
                    theme: theme::gradient_for(&observation.condition),
                    primary: Some(observation),
                    ..state.clone()
                },
                Err(e) => {
                    tracing::warn!(message = "failed to fetch weather", city = %state.selected_city, error = %e);
                    PanelState {
                        loading: false,
                        primary: None,
                        ..state.clone()
                    }
                }
            };
            Transition::to(next)
        }

        Event::TimesComputed { cycle, table } => {
            if is_stale(state, cycle, "times") {
                return Transition::unchanged(state);
            }
            Transition::to(PanelState {
                times: table,
                ..state.clone()
            })
        }

        Event::AggregationCompleted { cycle, table } => {
            if is_stale(state, cycle, "aggregation") {
                return Transition::unchanged(state);
            }
            Transition::to(PanelState {
                aggregated: table,
                ..state.clone()
            })
        }
    }
}
