//! Colour strategy for the slide widget

use serde::Deserialize;
use slidekit_core::{Color, ConfigError};

/// Colours the widget asks for while rendering.
///
/// Every method is a pure function of its arguments; the widget may call
/// them any number of times per frame.
pub trait SlideColors: Send + Sync {
    /// Track background at `fraction` of the way to completion
    fn track_color(&self, fraction: f32) -> Color;

    /// Hint text colour; typically fades out as the thumb advances
    fn hint_color(&self, fraction: f32) -> Color;

    /// Thumb background
    fn thumb_color(&self) -> Color;

    /// Arrow icon drawn on the thumb
    fn icon_color(&self, fraction: f32) -> Color;

    /// Spinner drawn on the thumb while committed
    fn indicator_color(&self) -> Color;
}

/// Linear interpolation between a resting and a completed palette
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultSlideColors {
    pub track_start: Color,
    pub track_end: Color,
    pub hint: Color,
    pub thumb: Color,
    pub icon_start: Color,
    pub icon_end: Color,
    pub indicator: Color,
}

impl DefaultSlideColors {
    pub fn light() -> Self {
        Self {
            track_start: Color::from_hex(0xE0E0E0),
            track_end: Color::from_hex(0x2E7D32),
            hint: Color::from_hex(0x212121),
            thumb: Color::WHITE,
            icon_start: Color::from_hex(0x616161),
            icon_end: Color::from_hex(0x2E7D32),
            indicator: Color::from_hex(0x2E7D32),
        }
    }

    pub fn dark() -> Self {
        Self {
            track_start: Color::from_hex(0x2C2C2C),
            track_end: Color::from_hex(0x81C784),
            hint: Color::from_hex(0xEEEEEE),
            thumb: Color::from_hex(0x121212),
            icon_start: Color::from_hex(0xBDBDBD),
            icon_end: Color::from_hex(0x81C784),
            indicator: Color::from_hex(0x81C784),
        }
    }

    /// Load a palette from TOML. Missing keys fall back to [`Self::light`].
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: RawPalette = toml::from_str(input)?;
        let mut colors = Self::light();
        let slots: [(&Option<String>, &mut Color); 7] = [
            (&raw.track_start, &mut colors.track_start),
            (&raw.track_end, &mut colors.track_end),
            (&raw.hint, &mut colors.hint),
            (&raw.thumb, &mut colors.thumb),
            (&raw.icon_start, &mut colors.icon_start),
            (&raw.icon_end, &mut colors.icon_end),
            (&raw.indicator, &mut colors.indicator),
        ];
        for (text, slot) in slots {
            if let Some(text) = text {
                *slot = Color::parse_hex(text).ok_or_else(|| ConfigError::Color(text.clone()))?;
            }
        }
        tracing::debug!("loaded slide palette from toml");
        Ok(colors)
    }
}

impl Default for DefaultSlideColors {
    fn default() -> Self {
        Self::light()
    }
}

impl SlideColors for DefaultSlideColors {
    fn track_color(&self, fraction: f32) -> Color {
        Color::lerp(&self.track_start, &self.track_end, fraction)
    }

    fn hint_color(&self, fraction: f32) -> Color {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.hint.with_alpha(self.hint.a * (1.0 - fraction))
    }

    fn thumb_color(&self) -> Color {
        self.thumb
    }

    fn icon_color(&self, fraction: f32) -> Color {
        Color::lerp(&self.icon_start, &self.icon_end, fraction)
    }

    fn indicator_color(&self) -> Color {
        self.indicator
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPalette {
    track_start: Option<String>,
    track_end: Option<String>,
    hint: Option<String>,
    thumb: Option<String>,
    icon_start: Option<String>,
    icon_end: Option<String>,
    indicator: Option<String>,
}
