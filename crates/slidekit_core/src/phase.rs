//! Gesture phase transitions
//!
//! The thumb is always in exactly one phase. Transitions are expressed as
//! `(state, event) -> Option<state>` so callers can pattern match:
//!
//! ```
//! use slidekit_core::events::event_types::*;
//! use slidekit_core::{GesturePhase, StateTransitions};
//!
//! let phase = GesturePhase::Idle;
//! assert_eq!(phase.on_event(DRAG_START), Some(GesturePhase::Dragging));
//! assert_eq!(phase.on_event(DRAG_END), None);
//! ```

use std::hash::Hash;

use crate::events::EventType;

/// State types that map events to transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Phase of the draggable thumb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// Resting on an anchor
    #[default]
    Idle,
    /// Following the user's finger
    Dragging,
    /// Animating toward an anchor (after release or programmatically)
    Settling,
}

impl GesturePhase {
    pub fn is_dragging(&self) -> bool {
        matches!(self, GesturePhase::Dragging)
    }

    pub fn is_settling(&self) -> bool {
        matches!(self, GesturePhase::Settling)
    }
}

impl StateTransitions for GesturePhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use crate::events::event_types::*;
        match (self, event) {
            // Grabbing the thumb interrupts any settle
            (GesturePhase::Idle, DRAG_START) => Some(GesturePhase::Dragging),
            (GesturePhase::Settling, DRAG_START) => Some(GesturePhase::Dragging),
            (GesturePhase::Dragging, DRAG_END) => Some(GesturePhase::Settling),
            // Programmatic transitions replace whatever is in flight
            (_, ANIMATE) => Some(GesturePhase::Settling),
            (GesturePhase::Settling, SETTLED) => Some(GesturePhase::Idle),
            (_, UNMOUNT) => Some(GesturePhase::Idle),
            _ => None,
        }
    }
}
