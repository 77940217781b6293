//! SlideKit Core
//!
//! Foundational types for the slide-to-confirm gesture engine:
//!
//! - **Events**: Single-axis drag, release and resize input
//! - **Gesture phases**: Idle / Dragging / Settling transitions
//! - **Geometry**: Orientation, container sizes and the draggable track extent
//! - **Progress**: Two-anchor progress and the proximity-to-completion fraction
//!
//! # Example
//!
//! ```rust
//! use slidekit_core::{slide_fraction, Anchor, SwipeProgress};
//!
//! let progress = SwipeProgress::between(Anchor::End, Anchor::Start, 0.25);
//! assert_eq!(slide_fraction(&progress), 0.75);
//! ```

pub mod color;
pub mod error;
pub mod events;
pub mod geometry;
pub mod phase;
pub mod progress;

pub use color::Color;
pub use error::ConfigError;
pub use events::{Event, EventData, EventType};
pub use geometry::{DragExtent, EdgeInsets, Orientation, Size};
pub use phase::{GesturePhase, StateTransitions};
pub use progress::{slide_fraction, Anchor, SwipeProgress};
