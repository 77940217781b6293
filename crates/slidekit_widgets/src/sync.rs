//! Reconciles the caller-owned committed flag with the thumb
//!
//! The flag is never stored as truth here; the controller only remembers the
//! last value it saw so it can tell a change from a repeat.

use slidekit_core::Anchor;

use crate::drag::DragStateMachine;

/// What a committed-flag observation asks of the thumb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Flag unchanged
    None,
    /// First observation: place without animating
    Snap(Anchor),
    /// Flag flipped: settle programmatically
    AnimateTo(Anchor),
}

#[derive(Debug, Clone, Default)]
pub struct ExternalSyncController {
    observed: Option<bool>,
}

impl ExternalSyncController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `committed` and return the action it implies
    pub fn observe(&mut self, committed: bool) -> SyncAction {
        let previous = self.observed.replace(committed);
        match previous {
            None => SyncAction::Snap(Anchor::for_committed(committed)),
            Some(prev) if prev == committed => SyncAction::None,
            Some(_) => SyncAction::AnimateTo(Anchor::for_committed(committed)),
        }
    }

    /// Observe `committed` and drive `machine` accordingly.
    ///
    /// The gesture is enabled exactly when the flag is false.
    pub fn apply(&mut self, committed: bool, machine: &mut DragStateMachine) -> SyncAction {
        let action = self.observe(committed);
        match action {
            SyncAction::None => {}
            SyncAction::Snap(anchor) => machine.snap_to(anchor),
            SyncAction::AnimateTo(anchor) => {
                tracing::debug!(committed, ?anchor, "committed flag changed");
                machine.animate_to(anchor);
            }
        }
        machine.set_enabled(!committed);
        action
    }

    pub fn last_observed(&self) -> Option<bool> {
        self.observed
    }

    /// Forget the observed flag; the next observation snaps
    pub fn reset(&mut self) {
        self.observed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlideConfig;
    use slidekit_core::DragExtent;

    fn machine() -> DragStateMachine {
        let mut machine = DragStateMachine::new(&SlideConfig::default(), Anchor::Start);
        machine.set_extent(DragExtent::new(200.0));
        machine
    }

    #[test]
    fn first_observation_snaps() {
        let mut sync = ExternalSyncController::new();
        let mut m = machine();
        assert_eq!(sync.apply(true, &mut m), SyncAction::Snap(Anchor::End));
        assert_eq!(m.anchor(), Anchor::End);
        assert_eq!(m.offset(), 200.0);
        assert!(!m.is_animating());
        assert!(!m.is_enabled());
    }

    #[test]
    fn flips_animate_and_repeats_do_nothing() {
        let mut sync = ExternalSyncController::new();
        let mut m = machine();
        sync.apply(false, &mut m);
        assert_eq!(sync.apply(false, &mut m), SyncAction::None);
        assert!(m.is_enabled());

        assert_eq!(sync.apply(true, &mut m), SyncAction::AnimateTo(Anchor::End));
        assert_eq!(m.target(), Some(Anchor::End));
        assert!(!m.is_enabled());

        assert_eq!(sync.apply(false, &mut m), SyncAction::AnimateTo(Anchor::Start));
        assert_eq!(m.target(), Some(Anchor::Start));
        assert!(m.is_enabled());
    }

    #[test]
    fn reset_snaps_again() {
        let mut sync = ExternalSyncController::new();
        sync.observe(true);
        sync.reset();
        assert_eq!(sync.last_observed(), None);
        assert_eq!(sync.observe(true), SyncAction::Snap(Anchor::End));
    }
}
