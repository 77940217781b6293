//! Anchors and transition progress
//!
//! Raw anchor-transition progress measures distance travelled from `from`
//! toward `to`. The slide fraction instead measures proximity to completion
//! (the End anchor), whichever direction the thumb is currently moving.

use serde::{Deserialize, Serialize};

use crate::geometry::DragExtent;

/// One of the two resting positions of the thumb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    End,
}

impl Anchor {
    pub fn opposite(&self) -> Anchor {
        match self {
            Anchor::Start => Anchor::End,
            Anchor::End => Anchor::Start,
        }
    }

    /// Resting coordinate of this anchor on a track of `track_length`
    pub fn offset(&self, track_length: f32) -> f32 {
        match self {
            Anchor::Start => 0.0,
            Anchor::End => track_length,
        }
    }

    /// Anchor matching a committed flag
    pub fn for_committed(committed: bool) -> Anchor {
        if committed {
            Anchor::End
        } else {
            Anchor::Start
        }
    }
}

/// An in-flight or settled transition between anchors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeProgress {
    pub from: Anchor,
    pub to: Anchor,
    /// Distance travelled from `from` toward `to`, in `[0, 1]`
    pub fraction: f32,
}

impl SwipeProgress {
    /// Resting on `anchor`
    pub fn settled(anchor: Anchor) -> Self {
        Self {
            from: anchor,
            to: anchor,
            fraction: 1.0,
        }
    }

    /// Transition from `from` toward `to`. The fraction is clamped; NaN becomes 0.
    pub fn between(from: Anchor, to: Anchor, fraction: f32) -> Self {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        Self { from, to, fraction }
    }

    /// Progress of a thumb at `offset` that last rested on `settled`.
    ///
    /// The transition counts as settled while the offset sits exactly on the
    /// settled anchor's coordinate, or when the track is empty.
    pub fn from_offset(offset: f32, extent: DragExtent, settled: Anchor) -> Self {
        if extent.is_empty() {
            return Self::settled(settled);
        }
        let track = extent.track_length();
        let offset = extent.clamp(offset);
        let home = settled.offset(track);
        if offset == home {
            return Self::settled(settled);
        }
        let travelled = (offset - home).abs() / track;
        Self::between(settled, settled.opposite(), travelled)
    }

    pub fn is_settled(&self) -> bool {
        self.from == self.to
    }
}

/// Proximity to completion for `progress`, in `[0, 1]`.
///
/// Settled at Start is 0 and settled at End is 1. Moving Start→End reports the
/// raw fraction; moving End→Start reports `1 - fraction`.
pub fn slide_fraction(progress: &SwipeProgress) -> f32 {
    match (progress.from, progress.to) {
        (Anchor::Start, Anchor::Start) => 0.0,
        (Anchor::End, Anchor::End) => 1.0,
        (Anchor::Start, Anchor::End) => progress.fraction,
        (Anchor::End, Anchor::Start) => 1.0 - progress.fraction,
    }
}
