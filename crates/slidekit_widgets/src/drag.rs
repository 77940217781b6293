//! Two-anchor drag state machine
//!
//! The thumb rests on either the Start or the End anchor. A drag moves the
//! offset freely within the track; a release picks a target anchor from the
//! position and release velocity and settles toward it. Programmatic
//! transitions use the same settle path but never count as a commit.
//!
//! The machine never fires callbacks. Callers read the [`Settled`] value
//! returned by [`DragStateMachine::tick`] and decide what it means.

use slidekit_animation::{SettleAnimation, SettleSpec};
use slidekit_core::events::event_types;
use slidekit_core::{
    slide_fraction, Anchor, DragExtent, EventType, GesturePhase, StateTransitions, SwipeProgress,
};

use crate::config::SlideConfig;

/// What started a settle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettleCause {
    /// The user let go of the thumb
    Release,
    /// `animate_to`, an external flag change or a disable
    Programmatic,
}

/// A settle that reached its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub anchor: Anchor,
    pub cause: SettleCause,
}

impl Settled {
    /// True for a user release that landed on End
    pub fn is_commit(&self) -> bool {
        self.anchor == Anchor::End && self.cause == SettleCause::Release
    }
}

/// Commit thresholds used when resolving a release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragThresholds {
    /// Fraction of the track that must be covered for a slow release
    pub fractional: f32,
    /// Release speed that decides the target on its own
    pub velocity: f32,
}

impl DragThresholds {
    pub fn from_config(config: &SlideConfig) -> Self {
        Self {
            fractional: config.fractional_threshold,
            velocity: config.velocity_threshold,
        }
    }
}

#[derive(Debug, Clone)]
struct InFlight {
    animation: SettleAnimation,
    target: Anchor,
    cause: SettleCause,
}

/// Drag and settle state for a single thumb
#[derive(Debug, Clone)]
pub struct DragStateMachine {
    thresholds: DragThresholds,
    settle_spec: SettleSpec,
    extent: DragExtent,
    anchor: Anchor,
    offset: f32,
    phase: GesturePhase,
    in_flight: Option<InFlight>,
    enabled: bool,
}

impl DragStateMachine {
    /// Machine resting on `anchor` with an empty track
    pub fn new(config: &SlideConfig, anchor: Anchor) -> Self {
        Self {
            thresholds: DragThresholds::from_config(config),
            settle_spec: config.settle,
            extent: DragExtent::EMPTY,
            anchor,
            offset: 0.0,
            phase: GesturePhase::Idle,
            in_flight: None,
            enabled: true,
        }
    }

    /// Start a gesture. Returns false when the thumb is disabled.
    ///
    /// Grabbing the thumb mid-settle abandons the settle; the offset stays
    /// wherever the animation left it.
    pub fn begin_drag(&mut self) -> bool {
        if !self.enabled {
            tracing::trace!("drag rejected: disabled");
            return false;
        }
        if self.phase.is_dragging() {
            return true;
        }
        if let Some(in_flight) = self.in_flight.take() {
            tracing::debug!(
                target_anchor = ?in_flight.target,
                offset = self.offset,
                "settle interrupted by drag"
            );
        }
        self.transition(event_types::DRAG_START);
        true
    }

    /// Move the thumb by `delta` along the track. Returns the delta actually applied.
    pub fn drag_by(&mut self, delta: f32) -> f32 {
        if !self.phase.is_dragging() || !self.enabled || !delta.is_finite() {
            return 0.0;
        }
        let next = self.extent.clamp(self.offset + delta);
        let consumed = next - self.offset;
        self.offset = next;
        consumed
    }

    /// End the gesture and settle toward the resolved anchor
    pub fn release_drag(&mut self, velocity: f32) -> Option<Anchor> {
        if !self.phase.is_dragging() {
            return None;
        }
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let target = self.resolve_target(velocity);
        tracing::debug!(
            from = ?self.anchor,
            ?target,
            offset = self.offset,
            velocity,
            "release resolved"
        );
        self.start_settle(target, velocity, SettleCause::Release);
        self.transition(event_types::DRAG_END);
        Some(target)
    }

    /// Anchor a release at the current offset with `velocity` would settle on
    pub fn resolve_target(&self, velocity: f32) -> Anchor {
        let DragThresholds {
            fractional,
            velocity: fling,
        } = self.thresholds;
        let position = self.position();
        match self.anchor {
            Anchor::Start => {
                if velocity >= fling {
                    Anchor::End
                } else if velocity <= -fling {
                    Anchor::Start
                } else if position >= fractional {
                    Anchor::End
                } else {
                    Anchor::Start
                }
            }
            Anchor::End => {
                if velocity <= -fling {
                    Anchor::Start
                } else if velocity >= fling {
                    Anchor::End
                } else if 1.0 - position >= fractional {
                    Anchor::Start
                } else {
                    Anchor::End
                }
            }
        }
    }

    /// Settle toward `anchor` without counting as a commit.
    ///
    /// Replaces any drag or in-flight settle. Does nothing when already
    /// resting exactly on `anchor`, or when a settle is already heading
    /// there; a release toward End still counts as a commit.
    pub fn animate_to(&mut self, anchor: Anchor) {
        let coordinate = anchor.offset(self.extent.track_length());
        if let Some(in_flight) = self.in_flight.as_mut() {
            if in_flight.target == anchor {
                return;
            }
            in_flight.animation.retarget(coordinate);
            in_flight.target = anchor;
            in_flight.cause = SettleCause::Programmatic;
            tracing::debug!(?anchor, "settle retargeted");
            return;
        }
        if self.phase == GesturePhase::Idle && self.anchor == anchor && self.offset == coordinate {
            return;
        }
        tracing::debug!(?anchor, offset = self.offset, "programmatic settle");
        self.start_settle(anchor, 0.0, SettleCause::Programmatic);
        self.transition(event_types::ANIMATE);
    }

    /// Place the thumb on `anchor` immediately
    pub fn snap_to(&mut self, anchor: Anchor) {
        self.in_flight = None;
        self.anchor = anchor;
        self.offset = anchor.offset(self.extent.track_length());
        self.phase = GesturePhase::Idle;
    }

    /// Advance any in-flight settle by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Option<Settled> {
        let in_flight = self.in_flight.as_mut()?;
        let value = in_flight.animation.step(dt);
        self.offset = self.extent.clamp(value);
        if !in_flight.animation.is_finished() {
            return None;
        }

        let InFlight { target, cause, .. } = self.in_flight.take()?;
        self.anchor = target;
        self.offset = target.offset(self.extent.track_length());
        self.transition(event_types::SETTLED);
        tracing::debug!(anchor = ?target, ?cause, "settled");
        Some(Settled {
            anchor: target,
            cause,
        })
    }

    /// Apply a new track extent.
    ///
    /// A resting thumb is pinned back onto its anchor, a settle is retargeted
    /// to the anchor's new coordinate, and a dragged thumb is clamped.
    pub fn set_extent(&mut self, extent: DragExtent) {
        if extent == self.extent {
            return;
        }
        tracing::trace!(
            old = self.extent.track_length(),
            new = extent.track_length(),
            "track resized"
        );
        self.extent = extent;
        let track = extent.track_length();
        if let Some(in_flight) = self.in_flight.as_mut() {
            in_flight.animation.retarget(in_flight.target.offset(track));
            self.offset = extent.clamp(self.offset);
        } else if self.phase.is_dragging() {
            self.offset = extent.clamp(self.offset);
        } else {
            self.offset = self.anchor.offset(track);
        }
    }

    /// Enable or disable the gesture. Disabling mid-drag returns the thumb
    /// to its settled anchor.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if !enabled && self.phase.is_dragging() {
            self.animate_to(self.anchor);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drop any drag or settle without completing it
    pub fn abandon(&mut self) {
        self.in_flight = None;
        self.offset = self.extent.clamp(self.offset);
        self.transition(event_types::UNMOUNT);
    }

    /// Last anchor the thumb settled on
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Anchor of the in-flight settle, if any
    pub fn target(&self) -> Option<Anchor> {
        self.in_flight.as_ref().map(|f| f.target)
    }

    pub fn extent(&self) -> DragExtent {
        self.extent
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn progress(&self) -> SwipeProgress {
        SwipeProgress::from_offset(self.offset, self.extent, self.anchor)
    }

    /// Proximity to completion in `[0, 1]`
    pub fn fraction(&self) -> f32 {
        slide_fraction(&self.progress())
    }

    /// Offset as a share of the track. An empty track reports the anchor's own side.
    fn position(&self) -> f32 {
        if self.extent.is_empty() {
            return match self.anchor {
                Anchor::Start => 0.0,
                Anchor::End => 1.0,
            };
        }
        self.extent.normalize(self.offset)
    }

    fn start_settle(&mut self, target: Anchor, velocity: f32, cause: SettleCause) {
        let to = target.offset(self.extent.track_length());
        self.in_flight = Some(InFlight {
            animation: SettleAnimation::start(self.settle_spec, self.offset, to, velocity),
            target,
            cause,
        });
    }

    fn transition(&mut self, event: EventType) {
        if let Some(next) = self.phase.on_event(event) {
            self.phase = next;
        }
    }
}
