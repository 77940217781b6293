//! SlideKit Widgets
//!
//! The slide-to-confirm widget and the pieces it is assembled from:
//!
//! - [`DragStateMachine`]: two-anchor drag state, threshold and velocity commit
//! - [`FractionChangeNotifier`]: value-deduplicated fraction callbacks
//! - [`ExternalSyncController`]: reconciles the caller-owned committed flag
//! - [`SlideToConfirm`]: wires the above to events, colours and renderers
//!
//! # Example
//!
//! ```rust
//! use slidekit_core::{Event, Size};
//! use slidekit_widgets::{HintTexts, SlideConfig, SlideToConfirm};
//!
//! let mut slide = SlideToConfirm::new(
//!     SlideConfig::default(),
//!     HintTexts::new("Slide to pay", "Paying..."),
//!     false,
//! )
//! .unwrap()
//! .container(Size::new(300.0, 72.0))
//! .on_slide_completed(|| println!("confirmed"));
//!
//! slide.handle_event(&Event::drag_start(0));
//! slide.handle_event(&Event::drag(400.0, 0.0, 16));
//! slide.handle_event(&Event::drag_end(0.0, 32));
//! for _ in 0..120 {
//!     slide.tick(1.0 / 60.0);
//! }
//! assert_eq!(slide.completions(), 1);
//! ```

pub mod config;
pub mod drag;
pub mod hint;
pub mod notifier;
pub mod render;
pub mod slide;
pub mod sync;

pub use config::SlideConfig;
pub use drag::{DragStateMachine, DragThresholds, SettleCause, Settled};
pub use hint::HintTexts;
pub use notifier::FractionChangeNotifier;
pub use render::{
    DefaultHint, DefaultThumb, DrawCommand, Glyph, HintRenderer, Point, Rect, SlideSnapshot,
    ThumbRenderer, VisualOutput,
};
pub use slide::SlideToConfirm;
pub use sync::{ExternalSyncController, SyncAction};
