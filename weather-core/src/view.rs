use crate::{
    model::{ReferenceCity, WeatherObservation},
    state::PanelState,
    theme::{self, Gradient, Icon, LOADING_ASSET},
};

pub const TITLE: &str = "Weather Application with API";

/// Shown next to the city input.
pub const INPUT_PROMPT: &str = "Enter city name to get the temperature";

/// Middle section of the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum MainCard {
    Loading { asset: &'static str },
    Weather {
        city: String,
        condition: String,
        temperature_c: f64,
        icon: Icon,
    },
    /// Nothing to show: the last lookup failed or none has completed.
    Empty,
}

/// Footer tile for one reference city. Missing data stays blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub name: &'static str,
    pub local_time: Option<String>,
    pub observation: Option<WeatherObservation>,
    pub icon: Icon,
    pub gradient: Gradient,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub title: &'static str,
    pub background: Gradient,
    pub main: MainCard,
    pub tiles: Vec<Tile>,
}

impl PanelView {
    pub fn from_state(state: &PanelState, cities: &[ReferenceCity]) -> Self {
        let main = if state.loading {
            MainCard::Loading {
                asset: LOADING_ASSET,
            }
        } else {
            match &state.primary {
                Some(obs) => MainCard::Weather {
                    city: state.selected_city.clone(),
                    condition: obs.condition.clone(),
                    temperature_c: obs.temperature_c,
                    icon: theme::icon_for(&obs.condition),
                },
                None => MainCard::Empty,
            }
        };

        let tiles = cities
            .iter()
            .map(|city| {
                let observation = state.aggregated.get(city.name).cloned();
                let label = observation.as_ref().map_or("Clear", |o| o.condition.as_str());
                Tile {
                    name: city.name,
                    local_time: state.times.get(city.name).cloned(),
                    icon: theme::icon_for(label),
                    gradient: theme::gradient_for(label),
                    observation,
                }
            })
            .collect();

        Self {
            title: TITLE,
            background: state.theme,
            main,
            tiles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::REFERENCE_CITIES, theme::Condition};

    fn settled(primary: Option<WeatherObservation>) -> PanelState {
        PanelState {
            loading: false,
            primary,
            ..PanelState::new("Paris")
        }
    }

    #[test]
    fn header_carries_title_and_theme() {
        let state = PanelState {
            theme: Condition::Rain.gradient(),
            ..settled(None)
        };
        let view = PanelView::from_state(&state, &REFERENCE_CITIES);
        assert_eq!(view.title, "Weather Application with API");
        assert_eq!(view.background, Condition::Rain.gradient());
    }

    #[test]
    fn loading_shows_indicator() {
        let state = PanelState {
            loading: true,
            ..settled(Some(WeatherObservation::new("Rain", 15.2)))
        };
        let view = PanelView::from_state(&state, &REFERENCE_CITIES);
        assert_eq!(view.main, MainCard::Loading { asset: "loading.gif" });
    }

    #[test]
    fn weather_card_uses_condition_icon() {
        let view = PanelView::from_state(
            &settled(Some(WeatherObservation::new("Rain", 15.2))),
            &REFERENCE_CITIES,
        );
        assert_eq!(
            view.main,
            MainCard::Weather {
                city: "Paris".into(),
                condition: "Rain".into(),
                temperature_c: 15.2,
                icon: Icon::Rainy,
            }
        );
    }

    #[test]
    fn no_observation_renders_empty() {
        let view = PanelView::from_state(&settled(None), &REFERENCE_CITIES);
        assert_eq!(view.main, MainCard::Empty);
    }

    #[test]
    fn tiles_follow_reference_order_and_fall_back_to_clear() {
        let mut state = settled(None);
        state
            .aggregated
            .insert("Tokyo".into(), WeatherObservation::new("Snow", -1.0));
        state.times.insert("Tokyo".into(), "09:00 PM".into());

        let view = PanelView::from_state(&state, &REFERENCE_CITIES);
        let names: Vec<_> = view.tiles.iter().map(|t| t.name).collect();
        let expected: Vec<_> = REFERENCE_CITIES.iter().map(|c| c.name).collect();
        assert_eq!(names, expected);

        let tokyo = view.tiles.iter().find(|t| t.name == "Tokyo").unwrap();
        assert_eq!(tokyo.icon, Icon::Snowy);
        assert_eq!(tokyo.gradient, Condition::Snow.gradient());
        assert_eq!(tokyo.local_time.as_deref(), Some("09:00 PM"));

        let london = view.tiles.iter().find(|t| t.name == "London").unwrap();
        assert_eq!(london.observation, None);
        assert_eq!(london.local_time, None);
        assert_eq!(london.icon, Icon::Sunny);
        assert_eq!(london.gradient, Condition::Clear.gradient());
    }
}
