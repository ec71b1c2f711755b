use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    aggregate::aggregate,
    clock::{Clock, local_time_table},
    model::ReferenceCity,
    provider::WeatherProvider,
    state::{Command, Event, PanelState, Transition, reduce},
};

/// Owns the panel state and runs the side effects the reducer asks for.
///
/// State is only ever touched by whoever holds the `Panel`; fetches run in
/// spawned tasks that report back as [`Event`]s over a channel.
#[derive(Debug)]
pub struct Panel {
    state: PanelState,
    provider: Arc<dyn WeatherProvider>,
    clock: Arc<dyn Clock>,
    cities: &'static [ReferenceCity],
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    /// Background tasks of the current cycle that have not reported yet.
    pending: usize,
}

impl Panel {
    pub fn new(
        city: impl Into<String>,
        provider: Arc<dyn WeatherProvider>,
        clock: Arc<dyn Clock>,
        cities: &'static [ReferenceCity],
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: PanelState::new(city),
            provider,
            clock,
            cities,
            tx,
            rx,
            pending: 0,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// True once every fetch of the current cycle has reported back.
    pub fn is_settled(&self) -> bool {
        self.pending == 0
    }

    /// Start the first refresh cycle for the startup city.
    pub fn start(&mut self) {
        let transition = self.state.initial_command();
        self.apply(transition);
    }

    /// Feed one event through the reducer. Returns whether the state changed.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let reports_current = matches!(
            &event,
            Event::PrimaryLoaded { cycle, .. } | Event::AggregationCompleted { cycle, .. }
                if *cycle == self.state.cycle
        );
        if reports_current {
            self.pending = self.pending.saturating_sub(1);
        }

        let transition = reduce(&self.state, event);

        let changed = transition.changed_from(&self.state);
        self.apply(transition);
        changed
    }

    /// Wait for the next event from a background fetch and apply it.
    ///
    /// Returns `None` only if the channel is closed, which cannot happen while
    /// the panel holds its own sender.
    pub async fn next_event(&mut self) -> Option<bool> {
        let event = self.rx.recv().await?;
        Some(self.dispatch(event))
    }

    /// Drain events until the current cycle has fully reported back.
    pub async fn settle(&mut self) {
        while !self.is_settled() {
            if self.next_event().await.is_none() {
                break;
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        self.state = transition.state;
        if let Some(command) = transition.command {
            self.run(command);
        }
    }

    fn run(&mut self, command: Command) {
        match command {
            Command::Refresh { cycle, city } => {
                tracing::info!(message = "refreshing panel", city = %city, cycle);

                // Results from older cycles are dropped by the reducer, so only
                // this cycle's two fetches count towards settling.
                self.pending = 2;

                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = provider.current(&city).await;
                    let _ = tx.send(Event::PrimaryLoaded { cycle, result });
                });

                let provider = Arc::clone(&self.provider);
                let tx = self.tx.clone();
                let cities = self.cities;
                tokio::spawn(async move {
                    let table = aggregate(provider.as_ref(), cities).await;
                    let _ = tx.send(Event::AggregationCompleted { cycle, table });
                });

                // No I/O involved, so the clock table is applied inline.
                let table = local_time_table(self.cities, self.clock.now());
                let transition = reduce(&self.state, Event::TimesComputed { cycle, table });
                self.state = transition.state;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock,
        model::{REFERENCE_CITIES, WeatherObservation},
        provider::ProviderError,
        theme::Condition,
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    #[derive(Debug)]
    struct StaticProvider;

    #[async_trait]
    impl WeatherProvider for StaticProvider {
        async fn current(&self, city: &str) -> Result<WeatherObservation, ProviderError> {
            match city {
                "Paris" => Ok(WeatherObservation::new("Rain", 15.2)),
                "Atlantis" => Err(ProviderError::Malformed("city not found".into())),
                _ => Ok(WeatherObservation::new("Clear", 25.0)),
            }
        }
    }

    fn panel(city: &str) -> Panel {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap());
        Panel::new(city, Arc::new(StaticProvider), Arc::new(clock), &REFERENCE_CITIES)
    }

    #[tokio::test]
    async fn first_cycle_fills_everything() {
        let mut panel = panel("Paris");
        panel.start();
        assert!(panel.state().loading);
        assert_eq!(panel.state().times.len(), REFERENCE_CITIES.len());

        panel.settle().await;
        let state = panel.state();
        assert!(!state.loading);
        assert_eq!(state.primary, Some(WeatherObservation::new("Rain", 15.2)));
        assert_eq!(state.theme, Condition::Rain.gradient());
        assert_eq!(state.aggregated.len(), REFERENCE_CITIES.len());
    }

    #[tokio::test]
    async fn new_input_starts_new_cycle() {
        let mut panel = panel("Paris");
        panel.start();
        panel.settle().await;

        assert!(panel.dispatch(Event::InputChanged("Atlantis".into())));
        assert_eq!(panel.state().cycle, 2);
        panel.settle().await;

        assert_eq!(panel.state().selected_city, "Atlantis");
        assert_eq!(panel.state().primary, None);
        assert_eq!(panel.state().theme, Condition::Rain.gradient());
    }

    #[tokio::test]
    async fn overlapping_cycles_only_show_latest() {
        let mut panel = panel("Mumbai");
        panel.start();
        panel.dispatch(Event::InputChanged("Paris".into()));
        panel.settle().await;

        // Cycle 1 results may still be in the channel; they must not win.
        while let Ok(event) = panel.rx.try_recv() {
            panel.dispatch(event);
        }
        assert_eq!(panel.state().cycle, 2);
        assert_eq!(panel.state().primary, Some(WeatherObservation::new("Rain", 15.2)));
    }

    #[tokio::test]
    async fn blank_input_does_nothing() {
        let mut panel = panel("Paris");
        panel.start();
        panel.settle().await;

        assert!(!panel.dispatch(Event::InputChanged("   ".into())));
        assert_eq!(panel.state().cycle, 1);
        assert!(panel.is_settled());
    }

    #[tokio::test]
    async fn retyping_current_city_does_not_refetch() {
        let mut panel = panel("Paris");
        panel.start();
        panel.settle().await;

        assert!(!panel.dispatch(Event::InputChanged(" Paris ".into())));
        assert_eq!(panel.state().cycle, 1);
        assert!(panel.is_settled());
        assert!(panel.rx.try_recv().is_err());
    }
}
