use ansi_term::{Colour, Style};
use weather_panel_core::{
    theme::Rgb,
    view::{MainCard, PanelView, Tile},
};

const NAME_WIDTH: usize = 10;

fn rgb(c: Rgb) -> Colour {
    Colour::RGB(c.0, c.1, c.2)
}

fn paint(text: &str, style: Style, color: bool) -> String {
    if color {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Lay the panel out as lines of text, optionally coloured with the theme gradients.
pub fn render(view: &PanelView, color: bool) -> String {
    let header = Colour::Black.on(rgb(view.background.from)).bold();
    let mut out = format!("{}\n\n", paint(&format!("  {}  ", view.title), header, color));

    match &view.main {
        MainCard::Loading { asset } => {
            out.push_str(&format!("  loading... ({asset})\n"));
        }
        MainCard::Weather {
            city,
            condition,
            temperature_c,
            icon,
        } => {
            let accent = Style::new().fg(rgb(view.background.to)).bold();
            out.push_str(&format!("  {}\n", paint(city, accent, color)));
            out.push_str(&format!("  {} {}\n", icon.glyph(), condition));
            out.push_str(&format!("  Temperature: {temperature_c}°C\n"));
        }
        MainCard::Empty => {}
    }

    out.push('\n');
    for tile in &view.tiles {
        out.push_str(&tile_line(tile, color));
        out.push('\n');
    }

    out
}

fn tile_line(tile: &Tile, color: bool) -> String {
    let name = format!("{:<width$}", tile.name, width = NAME_WIDTH);
    let time = tile.local_time.as_deref().unwrap_or("");
    let (condition, temp) = match &tile.observation {
        Some(obs) => (obs.condition.clone(), obs.temperature_c.to_string()),
        None => (String::new(), String::new()),
    };

    let name_style = Style::new().fg(rgb(tile.gradient.from)).bold();
    format!(
        "  {} {:<8} {} {} | {}°C",
        paint(&name, name_style, color),
        time,
        tile.icon.glyph(),
        condition,
        temp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_panel_core::{
        PanelState, REFERENCE_CITIES, WeatherObservation, theme::LOADING_ASSET,
    };

    fn view(state: &PanelState) -> PanelView {
        PanelView::from_state(state, &REFERENCE_CITIES)
    }

    #[test]
    fn renders_weather_card_and_tiles() {
        let mut state = PanelState::new("Paris");
        state.primary = Some(WeatherObservation::new("Rain", 15.2));
        state
            .aggregated
            .insert("Tokyo".into(), WeatherObservation::new("Snow", -1.5));
        state.times.insert("Tokyo".into(), "09:00 PM".into());

        let out = render(&view(&state), false);

        assert!(out.starts_with("  Weather Application with API  \n\n"));
        assert!(out.contains("  Paris\n"));
        assert!(out.contains("☂ Rain"));
        assert!(out.contains("Temperature: 15.2°C"));
        assert!(out.contains("Tokyo      09:00 PM ❄ Snow | -1.5°C"));
        assert_eq!(out.lines().filter(|l| l.contains("°C")).count(), 1 + REFERENCE_CITIES.len());
    }

    #[test]
    fn missing_tile_data_is_blank() {
        let out = render(&view(&PanelState::new("Paris")), false);
        assert!(out.contains("London              ☀  | °C"), "{out}");
    }

    #[test]
    fn loading_shows_indicator() {
        let state = PanelState {
            loading: true,
            ..PanelState::new("Paris")
        };
        let out = render(&view(&state), false);
        assert!(out.contains(LOADING_ASSET));
        assert!(!out.contains("Temperature:"));
    }

    #[test]
    fn color_adds_escape_codes() {
        let out = render(&view(&PanelState::new("Paris")), true);
        assert!(out.contains("\u{1b}["));
    }
}
