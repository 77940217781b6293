//! Named palettes

use crate::colors::DefaultSlideColors;

/// Built-in palettes selectable by id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    Light,
    Dark,
}

impl ThemePreset {
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Light, ThemePreset::Dark]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ThemePreset::Light => "light",
            ThemePreset::Dark => "dark",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.id().eq_ignore_ascii_case(id))
    }

    pub fn colors(&self) -> DefaultSlideColors {
        match self {
            ThemePreset::Light => DefaultSlideColors::light(),
            ThemePreset::Dark => DefaultSlideColors::dark(),
        }
    }
}
