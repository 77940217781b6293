//! SlideKit Theme
//!
//! Colours for the slide widget are a strategy: the widget only ever asks
//! for a colour as a pure function of the current slide fraction.
//!
//! ```rust
//! use slidekit_theme::{DefaultSlideColors, SlideColors};
//!
//! let colors = DefaultSlideColors::light();
//! let resting = colors.track_color(0.0);
//! let completed = colors.track_color(1.0);
//! assert_ne!(resting, completed);
//! ```
//!
//! Themes can also be loaded from TOML:
//!
//! ```toml
//! track_start = "#E0E0E0"
//! track_end = "#1B5E20"
//! hint = "#212121"
//! thumb = "#FFFFFF"
//! icon_start = "#616161"
//! icon_end = "#1B5E20"
//! indicator = "#1B5E20"
//! ```

pub mod colors;
pub mod presets;

pub use colors::{DefaultSlideColors, SlideColors};
pub use presets::ThemePreset;
