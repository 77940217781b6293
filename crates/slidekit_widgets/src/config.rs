//! Slide widget configuration
//!
//! Loaded from code or TOML:
//!
//! ```toml
//! fractional_threshold = 0.85
//! velocity_threshold = 60.0
//! orientation = "horizontal"
//! thumb_size = 56.0
//!
//! [track_padding]
//! left = 8.0
//! top = 8.0
//! right = 8.0
//! bottom = 8.0
//!
//! [settle]
//! kind = "spring"
//! stiffness = 1500.0
//! damping = 77.5
//! ```

use serde::{Deserialize, Serialize};
use slidekit_animation::SettleSpec;
use slidekit_core::{ConfigError, DragExtent, EdgeInsets, Orientation, Size};

/// Fraction of the track past which a slow release commits
pub const DEFAULT_FRACTIONAL_THRESHOLD: f32 = 0.85;

/// Release speed (logical px/s) that commits regardless of position
pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 60.0;

/// Default thumb edge length (logical px)
pub const DEFAULT_THUMB_SIZE: f32 = 56.0;

/// Default padding between the track edge and the thumb (logical px)
pub const DEFAULT_TRACK_PADDING: f32 = 8.0;

/// Slide widget configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideConfig {
    /// Commit threshold as a fraction of the track length
    pub fractional_threshold: f32,
    /// Forward release velocity that overrides the positional test
    pub velocity_threshold: f32,
    /// Axis the thumb travels along
    pub orientation: Orientation,
    /// Thumb edge length along the drag axis
    pub thumb_size: f32,
    /// Padding around the track
    pub track_padding: EdgeInsets,
    /// How the thumb settles onto an anchor
    pub settle: SettleSpec,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            fractional_threshold: DEFAULT_FRACTIONAL_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            orientation: Orientation::Horizontal,
            thumb_size: DEFAULT_THUMB_SIZE,
            track_padding: EdgeInsets::uniform(DEFAULT_TRACK_PADDING),
            settle: SettleSpec::default(),
        }
    }
}

impl SlideConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: SlideConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ft = self.fractional_threshold;
        if !(ft.is_finite() && ft > 0.0 && ft <= 1.0) {
            return Err(ConfigError::FractionalThreshold(ft));
        }
        let vt = self.velocity_threshold;
        if !(vt.is_finite() && vt > 0.0) {
            return Err(ConfigError::VelocityThreshold(vt));
        }
        if !(self.thumb_size.is_finite() && self.thumb_size >= 0.0) {
            return Err(ConfigError::Geometry {
                field: "thumb_size",
                value: self.thumb_size,
            });
        }
        if !self.track_padding.is_valid() {
            return Err(ConfigError::Geometry {
                field: "track_padding",
                value: self.orientation.padding_along(self.track_padding),
            });
        }
        if !self.settle.is_valid() {
            return Err(ConfigError::Settle(format!("{:?}", self.settle)));
        }
        Ok(())
    }

    /// Track extent for a container of `container` size
    pub fn extent(&self, container: Size) -> DragExtent {
        DragExtent::compute(
            container,
            self.thumb_size,
            self.track_padding,
            self.orientation,
        )
    }

    /// Set the commit threshold
    pub fn fractional_threshold(mut self, threshold: f32) -> Self {
        self.fractional_threshold = threshold;
        self
    }

    /// Set the velocity threshold
    pub fn velocity_threshold(mut self, threshold: f32) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    /// Set the drag axis
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the thumb size
    pub fn thumb_size(mut self, size: f32) -> Self {
        self.thumb_size = size;
        self
    }

    /// Set the track padding
    pub fn track_padding(mut self, padding: EdgeInsets) -> Self {
        self.track_padding = padding;
        self
    }

    /// Set the settle animation
    pub fn settle(mut self, settle: SettleSpec) -> Self {
        self.settle = settle;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidekit_animation::{Easing, SpringConfig};

    #[test]
    fn defaults_match_documented_values() {
        let config = SlideConfig::default();
        assert_eq!(config.fractional_threshold, 0.85);
        assert_eq!(config.velocity_threshold, 60.0);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_and_defaults_mix() {
        let config = SlideConfig::from_toml_str(
            r#"
            fractional_threshold = 0.7
            orientation = "vertical"

            [track_padding]
            top = 4.0

            [settle]
            kind = "tween"
            duration_ms = 250
            easing = "linear"
            "#,
        )
        .unwrap();

        assert_eq!(config.fractional_threshold, 0.7);
        assert_eq!(config.velocity_threshold, DEFAULT_VELOCITY_THRESHOLD);
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.track_padding.top, 4.0);
        assert_eq!(config.track_padding.left, 0.0);
        assert_eq!(
            config.settle,
            SettleSpec::Tween {
                duration_ms: 250,
                easing: Easing::Linear
            }
        );
    }

    #[test]
    fn undamped_spring_is_rejected() {
        let config =
            SlideConfig::default().settle(SettleSpec::Spring(SpringConfig::new(400.0, 0.0, 1.0)));
        assert!(matches!(config.validate(), Err(ConfigError::Settle(_))));
    }

    #[test]
    fn spring_settle_from_toml() {
        let config = SlideConfig::from_toml_str(
            r#"
            [settle]
            kind = "spring"
            stiffness = 800.0
            damping = 40.0
            "#,
        )
        .unwrap();
        match config.settle {
            SettleSpec::Spring(spring) => {
                assert_eq!(spring.stiffness, 800.0);
                assert_eq!(spring.mass, 1.0);
            }
            other => panic!("expected spring, got {other:?}"),
        }
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let err = SlideConfig::default()
            .fractional_threshold(1.5)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::FractionalThreshold(_)));

        let err = SlideConfig::default()
            .velocity_threshold(0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::VelocityThreshold(_)));

        let err = SlideConfig::default()
            .thumb_size(-1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Geometry { field: "thumb_size", .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            SlideConfig::from_toml_str("threshold = 0.5"),
            Err(ConfigError::Parse(_))
        ));
    }
}
