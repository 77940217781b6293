//! Slide-to-confirm wired to a purchase store
//!
//! `CommerceSlide` owns the committed flag the underlying widget observes.
//! A completed slide sets it, locking the gesture while the store call runs.
//! A failure clears it again (unless disabled) so the user can retry; a
//! success leaves the thumb at End.

use std::sync::Arc;
use std::time::Duration;

use slidekit_core::events::event_types;
use slidekit_core::Event;
use slidekit_widgets::{Settled, SlideToConfirm};
use tokio::runtime::Handle;

use crate::action::{ActionState, AsyncActionAdapter};
use crate::purchases::{CustomerInfo, Package, PurchaseOutcome, PurchaseStore, PurchasesError};

/// What a completed slide triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommerceAction {
    Purchase(Package),
    Restore,
}

/// Value produced by a successful [`CommerceAction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommerceOutcome {
    Purchased(PurchaseOutcome),
    Restored(CustomerInfo),
}

impl CommerceOutcome {
    pub fn customer_info(&self) -> &CustomerInfo {
        match self {
            CommerceOutcome::Purchased(outcome) => &outcome.customer_info,
            CommerceOutcome::Restored(info) => info,
        }
    }
}

pub type PurchaseState = ActionState<CommerceOutcome, PurchasesError>;

pub struct CommerceSlide<S: PurchaseStore> {
    slide: SlideToConfirm,
    store: Arc<S>,
    action: CommerceAction,
    adapter: AsyncActionAdapter<CommerceOutcome, PurchasesError>,
    committed: bool,
    pending: bool,
    reset_on_failure: bool,
}

impl<S: PurchaseStore> CommerceSlide<S> {
    /// Wrap `slide`, running `action` against `store` on `handle`.
    ///
    /// The widget is reset to the uncommitted state.
    pub fn new(slide: SlideToConfirm, store: Arc<S>, action: CommerceAction, handle: Handle) -> Self {
        let mut slide = slide;
        slide.sync_committed(false);
        Self {
            slide,
            store,
            action,
            adapter: AsyncActionAdapter::new(handle),
            committed: false,
            pending: false,
            reset_on_failure: true,
        }
    }

    /// Return the thumb to Start after a failed action (default true)
    pub fn reset_on_failure(mut self, reset: bool) -> Self {
        self.reset_on_failure = reset;
        self
    }

    /// Receive every purchase state, Pending included
    pub fn on_purchase_state_changed<F>(mut self, mut callback: F) -> Self
    where
        F: FnMut(&PurchaseState) + Send + 'static,
    {
        self.adapter
            .set_on_state_changed(move |_, state| callback(state));
        self
    }

    pub fn set_action(&mut self, action: CommerceAction) {
        self.action = action;
    }

    /// Forward an input event. Unmounting also aborts the pending action.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if event.event_type == event_types::UNMOUNT {
            self.teardown();
            return true;
        }
        self.slide.handle_event(event)
    }

    /// Advance the widget, start the action on completion and apply any
    /// finished results
    pub fn tick(&mut self, dt: f32) -> Option<Settled> {
        let settled = self.slide.tick(dt);
        if self.slide.take_completed() {
            self.commit();
        }
        self.poll();
        settled
    }

    /// Run the action as if the slide had completed.
    ///
    /// Refused while a previous invocation is still pending or after teardown.
    pub fn commit(&mut self) -> bool {
        if self.slide.is_torn_down() {
            return false;
        }
        if self.pending {
            tracing::warn!(action = ?self.action, "commit refused: action still pending");
            return false;
        }
        self.set_committed(true);
        self.pending = true;

        match &self.action {
            CommerceAction::Purchase(package) => {
                tracing::info!(package = %package.identifier, "starting purchase");
                let purchase = self.store.purchase(package);
                self.adapter
                    .invoke(async move { purchase.await.map(CommerceOutcome::Purchased) });
            }
            CommerceAction::Restore => {
                tracing::info!("restoring purchases");
                let restore = self.store.restore_purchases();
                self.adapter
                    .invoke(async move { restore.await.map(CommerceOutcome::Restored) });
            }
        }
        true
    }

    /// Apply finished results. Returns the terminal states delivered.
    pub fn poll(&mut self) -> Vec<PurchaseState> {
        let states = self.adapter.poll();
        self.apply(&states);
        states
    }

    /// Block until the pending action finishes or `timeout` passes
    pub fn wait_for_result(&mut self, timeout: Duration) -> Vec<PurchaseState> {
        let states = self.adapter.wait_for_delivery(timeout);
        self.apply(&states);
        states
    }

    /// Abort the pending action and tear the widget down
    pub fn teardown(&mut self) {
        if self.pending {
            tracing::debug!(action = ?self.action, "abandoning pending action");
        }
        self.adapter.teardown();
        self.slide.teardown();
        self.pending = false;
    }

    pub fn slide(&self) -> &SlideToConfirm {
        &self.slide
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn action(&self) -> &CommerceAction {
        &self.action
    }

    fn apply(&mut self, states: &[PurchaseState]) {
        for state in states {
            match state {
                ActionState::Pending => {}
                ActionState::Success(outcome) => {
                    self.pending = false;
                    tracing::info!(
                        entitlements = outcome.customer_info().active_entitlements.len(),
                        "action succeeded"
                    );
                }
                ActionState::Failure(err) => {
                    self.pending = false;
                    tracing::warn!(error = %err, "action failed");
                    if self.reset_on_failure {
                        self.set_committed(false);
                    }
                }
            }
        }
    }

    fn set_committed(&mut self, committed: bool) {
        self.committed = committed;
        self.slide.sync_committed(committed);
    }
}

impl<S: PurchaseStore> std::fmt::Debug for CommerceSlide<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommerceSlide")
            .field("slide", &self.slide)
            .field("action", &self.action)
            .field("committed", &self.committed)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
