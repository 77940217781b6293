//! Rendering slots
//!
//! The widget never draws. Each frame it builds an immutable
//! [`SlideSnapshot`] and hands it to a [`ThumbRenderer`] and a
//! [`HintRenderer`], which return plain [`DrawCommand`] lists for the host
//! to execute. Closures of the right shape work as renderers:
//!
//! ```rust
//! use slidekit_widgets::{DrawCommand, SlideSnapshot, ThumbRenderer, VisualOutput};
//!
//! let square = |snapshot: &SlideSnapshot| -> VisualOutput {
//!     let mut out = VisualOutput::new();
//!     out.push(DrawCommand::RoundedRect {
//!         rect: snapshot.thumb_rect(),
//!         radius: 4.0,
//!         color: snapshot.thumb_color,
//!     });
//!     out
//! };
//! # fn takes(_: impl ThumbRenderer) {}
//! # takes(square);
//! ```

use slidekit_core::{Color, EdgeInsets, Orientation, Size};
use smallvec::SmallVec;

/// A point in logical pixels relative to the widget origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Icons the default thumb can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    ArrowForward,
    ArrowDownward,
    Check,
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RoundedRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Color,
    },
    Icon {
        glyph: Glyph,
        center: Point,
        size: f32,
        color: Color,
    },
    /// Indeterminate progress indicator
    Spinner {
        center: Point,
        radius: f32,
        color: Color,
    },
    Text {
        content: String,
        center: Point,
        color: Color,
    },
}

/// Output of one renderer slot
pub type VisualOutput = SmallVec<[DrawCommand; 4]>;

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSnapshot {
    /// Caller-owned committed flag as last observed
    pub committed: bool,
    /// Proximity to completion in `[0, 1]`
    pub fraction: f32,
    pub offset: f32,
    pub track_length: f32,
    pub orientation: Orientation,
    pub thumb_size: f32,
    pub padding: EdgeInsets,
    pub container: Size,
    pub hint_text: String,
    pub track_color: Color,
    pub hint_color: Color,
    pub thumb_color: Color,
    pub icon_color: Color,
    pub indicator_color: Color,
}

impl SlideSnapshot {
    /// Whole widget area
    pub fn track_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.container.width, self.container.height)
    }

    /// Thumb square at the current offset, centred on the cross axis
    pub fn thumb_rect(&self) -> Rect {
        let size = self.thumb_size;
        match self.orientation {
            Orientation::Horizontal => Rect::new(
                self.padding.left + self.offset,
                (self.container.height - size) / 2.0,
                size,
                size,
            ),
            Orientation::Vertical => Rect::new(
                (self.container.width - size) / 2.0,
                self.padding.top + self.offset,
                size,
                size,
            ),
        }
    }

    /// Rounded track background in the fraction-dependent colour
    pub fn track_background(&self) -> DrawCommand {
        DrawCommand::RoundedRect {
            rect: self.track_rect(),
            radius: self.orientation.cross_axis(self.container) / 2.0,
            color: self.track_color,
        }
    }
}

/// Draws the thumb
pub trait ThumbRenderer: Send {
    fn render(&self, snapshot: &SlideSnapshot) -> VisualOutput;
}

/// Draws the hint behind the thumb
pub trait HintRenderer: Send {
    fn render(&self, snapshot: &SlideSnapshot) -> VisualOutput;
}

impl<F> ThumbRenderer for F
where
    F: Fn(&SlideSnapshot) -> VisualOutput + Send,
{
    fn render(&self, snapshot: &SlideSnapshot) -> VisualOutput {
        self(snapshot)
    }
}

impl<F> HintRenderer for F
where
    F: Fn(&SlideSnapshot) -> VisualOutput + Send,
{
    fn render(&self, snapshot: &SlideSnapshot) -> VisualOutput {
        self(snapshot)
    }
}

/// Circle with a direction arrow, or a spinner once committed
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultThumb;

impl ThumbRenderer for DefaultThumb {
    fn render(&self, snapshot: &SlideSnapshot) -> VisualOutput {
        let rect = snapshot.thumb_rect();
        let center = rect.center();
        let radius = snapshot.thumb_size / 2.0;

        let mut out = VisualOutput::new();
        out.push(DrawCommand::Circle {
            center,
            radius,
            color: snapshot.thumb_color,
        });
        if snapshot.committed {
            out.push(DrawCommand::Spinner {
                center,
                radius: radius * 0.5,
                color: snapshot.indicator_color,
            });
        } else {
            let glyph = match snapshot.orientation {
                Orientation::Horizontal => Glyph::ArrowForward,
                Orientation::Vertical => Glyph::ArrowDownward,
            };
            out.push(DrawCommand::Icon {
                glyph,
                center,
                size: radius,
                color: snapshot.icon_color,
            });
        }
        out
    }
}

/// Centred hint text
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHint;

impl HintRenderer for DefaultHint {
    fn render(&self, snapshot: &SlideSnapshot) -> VisualOutput {
        let mut out = VisualOutput::new();
        if snapshot.hint_text.is_empty() || snapshot.hint_color.a <= 0.0 {
            return out;
        }
        out.push(DrawCommand::Text {
            content: snapshot.hint_text.clone(),
            center: snapshot.track_rect().center(),
            color: snapshot.hint_color,
        });
        out
    }
}
