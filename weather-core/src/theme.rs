//! Static lookup tables from provider condition labels to presentation.
//!
//! Both lookups are total: a label the tables do not know yields the
//! [`Condition::Clear`] entry, so an unexpected provider string never
//! leaves the panel without an icon or a background.

use std::fmt;

/// The condition labels the panel has artwork for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Condition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Snow,
    Haze,
    Mist,
}

impl Condition {
    pub const fn all() -> &'static [Condition] {
        &[
            Condition::Clear,
            Condition::Clouds,
            Condition::Rain,
            Condition::Snow,
            Condition::Haze,
            Condition::Mist,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Rain => "Rain",
            Condition::Snow => "Snow",
            Condition::Haze => "Haze",
            Condition::Mist => "Mist",
        }
    }

    /// Exact, case-sensitive match on the provider label.
    pub fn from_label(label: &str) -> Option<Self> {
        Condition::all().iter().copied().find(|c| c.as_str() == label)
    }

    /// Like [`Condition::from_label`] but falls back to `Clear`.
    pub fn from_label_or_clear(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }

    pub fn icon(&self) -> Icon {
        match self {
            Condition::Clear => Icon::Sunny,
            Condition::Clouds | Condition::Haze | Condition::Mist => Icon::Cloudy,
            Condition::Rain => Icon::Rainy,
            Condition::Snow => Icon::Snowy,
        }
    }

    pub fn gradient(&self) -> Gradient {
        match self {
            Condition::Clear => Gradient::new(Rgb(0xf3, 0xb0, 0x7c), Rgb(0xfc, 0xd2, 0x83)),
            Condition::Clouds => Gradient::new(Rgb(0x57, 0xd6, 0xd4), Rgb(0xf7, 0x1e, 0xec)),
            Condition::Rain => Gradient::new(Rgb(0x5b, 0xc8, 0xfb), Rgb(0x80, 0xea, 0xff)),
            Condition::Snow => Gradient::new(Rgb(0xaf, 0xf2, 0xff), Rgb(0xff, 0xff, 0xff)),
            Condition::Haze => Gradient::new(Rgb(0xa3, 0xd3, 0xf3), Rgb(0xd6, 0xe6, 0xf2)),
            Condition::Mist => Gradient::new(Rgb(0xdd, 0xdd, 0xdd), Rgb(0xee, 0xee, 0xee)),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon for a provider label, falling back to the `Clear` icon.
pub fn icon_for(label: &str) -> Icon {
    Condition::from_label_or_clear(label).icon()
}

/// Background gradient for a provider label, falling back to the `Clear` gradient.
pub fn gradient_for(label: &str) -> Gradient {
    Condition::from_label_or_clear(label).gradient()
}

/// Artwork for one broad weather category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

/// Asset shown while the primary lookup is in flight.
pub const LOADING_ASSET: &str = "loading.gif";

impl Icon {
    pub fn asset(&self) -> &'static str {
        match self {
            Icon::Sunny => "sunny.png",
            Icon::Cloudy => "cloudy.png",
            Icon::Rainy => "rainy.png",
            Icon::Snowy => "snowy.png",
        }
    }

    /// Single-glyph stand-in for the asset in a terminal.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sunny => "☀",
            Icon::Cloudy => "☁",
            Icon::Rainy => "☂",
            Icon::Snowy => "❄",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Two-stop, left-to-right background gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gradient {
    pub from: Rgb,
    pub to: Rgb,
}

impl Gradient {
    pub const fn new(from: Rgb, to: Rgb) -> Self {
        Self { from, to }
    }

    /// CSS descriptor, e.g. `linear-gradient(to right, #5bc8fb, #80eaff)`.
    pub fn css(&self) -> String {
        format!("linear-gradient(to right, {}, {})", self.from, self.to)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Condition::Clear.gradient()
    }
}
