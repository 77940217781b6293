//! Gesture event types
//!
//! The widget consumes a pre-recognized single-axis drag primitive. Pointer
//! recognition happens upstream; events here already carry the delta along
//! the active axis.

/// Event type identifier
pub type EventType = u32;

/// Event types understood by the slide widget
pub mod event_types {
    use super::EventType;

    /// Thumb grabbed
    pub const DRAG_START: EventType = 1;
    /// Per-frame drag movement along the active axis
    pub const DRAG: EventType = 2;
    /// Thumb released, carries the final velocity
    pub const DRAG_END: EventType = 3;
    /// Container resized
    pub const RESIZE: EventType = 10;

    // Lifecycle
    pub const MOUNT: EventType = 20;
    pub const UNMOUNT: EventType = 21;

    // Internal transitions (not delivered by platforms)
    /// Programmatic settle requested
    pub const ANIMATE: EventType = 30;
    /// Settle animation reached its target
    pub const SETTLED: EventType = 31;
}

/// An input event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Milliseconds, monotonic, platform-defined origin
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Drag {
        /// Movement along the active axis since the previous frame
        delta: f32,
        /// Instantaneous velocity along the axis (logical px/s)
        velocity: f32,
    },
    Release {
        /// Final velocity along the axis (logical px/s)
        velocity: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

impl Event {
    pub fn drag_start(timestamp: u64) -> Self {
        Self {
            event_type: event_types::DRAG_START,
            data: EventData::None,
            timestamp,
        }
    }

    pub fn drag(delta: f32, velocity: f32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::DRAG,
            data: EventData::Drag { delta, velocity },
            timestamp,
        }
    }

    pub fn drag_end(velocity: f32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::DRAG_END,
            data: EventData::Release { velocity },
            timestamp,
        }
    }

    pub fn resize(width: f32, height: f32, timestamp: u64) -> Self {
        Self {
            event_type: event_types::RESIZE,
            data: EventData::Resize { width, height },
            timestamp,
        }
    }

    pub fn unmount(timestamp: u64) -> Self {
        Self {
            event_type: event_types::UNMOUNT,
            data: EventData::None,
            timestamp,
        }
    }
}
