//! Drag axis geometry
//!
//! The thumb travels along a track whose length is the container's main-axis
//! size minus the thumb and the padding on that axis. A container too small
//! for its thumb yields an empty track rather than an error.

use serde::{Deserialize, Serialize};

/// Axis the thumb travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Size of `size` along this axis
    pub fn main_axis(&self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Size of `size` across this axis
    pub fn cross_axis(&self, size: Size) -> f32 {
        match self {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    /// Total padding along this axis
    pub fn padding_along(&self, insets: EdgeInsets) -> f32 {
        match self {
            Orientation::Horizontal => insets.left + insets.right,
            Orientation::Vertical => insets.top + insets.bottom,
        }
    }

    /// Project a 2D pointer delta onto this axis
    pub fn project(&self, dx: f32, dy: f32) -> f32 {
        match self {
            Orientation::Horizontal => dx,
            Orientation::Vertical => dy,
        }
    }
}

/// Width and height in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Padding around the track, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }

    /// True if every side is finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Range `[0, track_length]` the thumb offset may occupy
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragExtent {
    track_length: f32,
}

impl DragExtent {
    /// An empty track: both anchors share coordinate 0
    pub const EMPTY: DragExtent = DragExtent { track_length: 0.0 };

    /// Track with an explicit length. Negative or non-finite lengths collapse to 0.
    pub fn new(track_length: f32) -> Self {
        Self {
            track_length: sanitize_length(track_length),
        }
    }

    /// Track for a container of `container` size holding a thumb of `thumb_size`
    pub fn compute(
        container: Size,
        thumb_size: f32,
        padding: EdgeInsets,
        orientation: Orientation,
    ) -> Self {
        let raw = orientation.main_axis(container)
            - (thumb_size + orientation.padding_along(padding));
        if raw < 0.0 {
            tracing::trace!(
                raw,
                "container smaller than thumb and padding, collapsing track"
            );
        }
        Self::new(raw)
    }

    pub fn track_length(&self) -> f32 {
        self.track_length
    }

    pub fn is_empty(&self) -> bool {
        self.track_length <= 0.0
    }

    /// Clamp an offset into `[0, track_length]`. NaN maps to 0.
    pub fn clamp(&self, offset: f32) -> f32 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.track_length)
    }

    /// Offset normalized to `[0, 1]`; an empty track reports 0
    pub fn normalize(&self, offset: f32) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        (self.clamp(offset) / self.track_length).clamp(0.0, 1.0)
    }
}

fn sanitize_length(length: f32) -> f32 {
    if length.is_finite() {
        length.max(0.0)
    } else {
        0.0
    }
}
