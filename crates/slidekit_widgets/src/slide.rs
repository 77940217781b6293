//! Slide-to-confirm widget
//!
//! Wires the drag state machine, fraction notifier and committed-flag sync
//! to input events, colours and renderer slots.
//!
//! The committed flag belongs to the caller. The widget reports a completed
//! slide through `on_slide_completed` and [`SlideToConfirm::take_completed`];
//! it is up to the caller to flip the flag and feed it back through
//! [`SlideToConfirm::sync_committed`].

use slidekit_core::events::event_types;
use slidekit_core::{Anchor, ConfigError, Event, EventData, GesturePhase, Size};
use slidekit_theme::{DefaultSlideColors, SlideColors};

use crate::config::SlideConfig;
use crate::drag::{DragStateMachine, Settled};
use crate::hint::HintTexts;
use crate::notifier::FractionChangeNotifier;
use crate::render::{
    DefaultHint, DefaultThumb, DrawCommand, HintRenderer, SlideSnapshot, ThumbRenderer,
};
use crate::sync::{ExternalSyncController, SyncAction};

type CompletedCallback = Box<dyn FnMut() + Send>;

pub struct SlideToConfirm {
    config: SlideConfig,
    machine: DragStateMachine,
    notifier: FractionChangeNotifier,
    sync: ExternalSyncController,
    hint: HintTexts,
    colors: Box<dyn SlideColors>,
    thumb_renderer: Box<dyn ThumbRenderer>,
    hint_renderer: Box<dyn HintRenderer>,
    on_completed: Option<CompletedCallback>,
    container: Size,
    /// Set on each commit, cleared by `take_completed`
    completed: bool,
    completions: u32,
    torn_down: bool,
}

impl SlideToConfirm {
    /// Create a widget resting on the anchor matching `committed`.
    ///
    /// A committed widget starts at End with the gesture disabled.
    pub fn new(config: SlideConfig, hint: HintTexts, committed: bool) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut machine = DragStateMachine::new(&config, Anchor::for_committed(committed));
        let mut sync = ExternalSyncController::new();
        sync.apply(committed, &mut machine);

        Ok(Self {
            config,
            machine,
            notifier: FractionChangeNotifier::new(),
            sync,
            hint,
            colors: Box::new(DefaultSlideColors::default()),
            thumb_renderer: Box::new(DefaultThumb),
            hint_renderer: Box::new(DefaultHint),
            on_completed: None,
            container: Size::ZERO,
            completed: false,
            completions: 0,
            torn_down: false,
        })
    }

    /// Set the container size
    pub fn container(mut self, size: Size) -> Self {
        self.set_container(size);
        self
    }

    /// Called once each time a user release settles on End
    pub fn on_slide_completed<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_completed = Some(Box::new(callback));
        self
    }

    /// Called whenever the completion fraction changes.
    ///
    /// The resting fraction is delivered once at registration.
    pub fn on_slide_fraction_changed<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.notifier.set_callback(callback);
        self.notify_fraction();
        self
    }

    /// Replace the colour strategy
    pub fn colors(mut self, colors: impl SlideColors + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    /// Replace the thumb renderer
    pub fn thumb_renderer(mut self, renderer: impl ThumbRenderer + 'static) -> Self {
        self.thumb_renderer = Box::new(renderer);
        self
    }

    /// Replace the hint renderer
    pub fn hint_renderer(mut self, renderer: impl HintRenderer + 'static) -> Self {
        self.hint_renderer = Box::new(renderer);
        self
    }

    /// Feed an input event. Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.torn_down {
            return false;
        }
        let handled = match (event.event_type, &event.data) {
            (event_types::DRAG_START, _) => self.machine.begin_drag(),
            (event_types::DRAG, EventData::Drag { delta, .. }) => {
                if self.machine.phase().is_dragging() {
                    self.machine.drag_by(*delta);
                    true
                } else {
                    false
                }
            }
            (event_types::DRAG_END, EventData::Release { velocity }) => {
                self.machine.release_drag(*velocity).is_some()
            }
            (event_types::DRAG_END, _) => self.machine.release_drag(0.0).is_some(),
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                self.set_container(Size::new(*width, *height));
                true
            }
            (event_types::UNMOUNT, _) => {
                self.teardown();
                return true;
            }
            _ => false,
        };
        self.notify_fraction();
        handled
    }

    /// Reconcile the caller-owned committed flag
    pub fn sync_committed(&mut self, committed: bool) -> SyncAction {
        if self.torn_down {
            return SyncAction::None;
        }
        let action = self.sync.apply(committed, &mut self.machine);
        self.notify_fraction();
        action
    }

    /// Advance animations by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Option<Settled> {
        if self.torn_down {
            return None;
        }
        let settled = self.machine.tick(dt);
        if let Some(settled) = settled {
            if settled.is_commit() {
                self.completions += 1;
                self.completed = true;
                tracing::info!(completions = self.completions, "slide completed");
                if let Some(callback) = self.on_completed.as_mut() {
                    callback();
                }
            }
        }
        self.notify_fraction();
        settled
    }

    /// True if a slide completed since the last call
    pub fn take_completed(&mut self) -> bool {
        std::mem::take(&mut self.completed)
    }

    /// Number of completed slides over the widget's lifetime
    pub fn completions(&self) -> u32 {
        self.completions
    }

    /// Replace the hint texts. Returns true if they changed.
    pub fn set_hint(&mut self, hint: HintTexts) -> bool {
        if self.hint == hint {
            return false;
        }
        self.hint = hint;
        true
    }

    /// Resize the widget
    pub fn set_container(&mut self, size: Size) {
        self.container = size;
        self.machine.set_extent(self.config.extent(size));
    }

    pub fn snapshot(&self) -> SlideSnapshot {
        let committed = self.is_committed();
        let fraction = self.machine.fraction();
        // The slided text replaces the faded hint at full strength
        let hint_color = if committed {
            self.colors.hint_color(0.0)
        } else {
            self.colors.hint_color(fraction)
        };
        SlideSnapshot {
            committed,
            fraction,
            offset: self.machine.offset(),
            track_length: self.machine.extent().track_length(),
            orientation: self.config.orientation,
            thumb_size: self.config.thumb_size,
            padding: self.config.track_padding,
            container: self.container,
            hint_text: self.hint.text_for(committed).to_string(),
            track_color: self.colors.track_color(fraction),
            hint_color,
            thumb_color: self.colors.thumb_color(),
            icon_color: self.colors.icon_color(fraction),
            indicator_color: self.colors.indicator_color(),
        }
    }

    /// Draw commands for the current frame, back to front
    pub fn render(&self) -> Vec<DrawCommand> {
        let snapshot = self.snapshot();
        let mut commands = vec![snapshot.track_background()];
        commands.extend(self.hint_renderer.render(&snapshot));
        commands.extend(self.thumb_renderer.render(&snapshot));
        commands
    }

    /// Stop animating and drop callbacks. Later events are ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        tracing::debug!("slide torn down");
        self.machine.abandon();
        self.notifier.clear_callback();
        self.on_completed = None;
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Committed flag as last observed from the caller
    pub fn is_committed(&self) -> bool {
        self.sync.last_observed().unwrap_or(false)
    }

    pub fn anchor(&self) -> Anchor {
        self.machine.anchor()
    }

    pub fn offset(&self) -> f32 {
        self.machine.offset()
    }

    pub fn fraction(&self) -> f32 {
        self.machine.fraction()
    }

    pub fn phase(&self) -> GesturePhase {
        self.machine.phase()
    }

    pub fn is_enabled(&self) -> bool {
        self.machine.is_enabled()
    }

    pub fn is_animating(&self) -> bool {
        self.machine.is_animating()
    }

    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    pub fn hint(&self) -> &HintTexts {
        &self.hint
    }

    pub fn size(&self) -> Size {
        self.container
    }

    pub fn machine(&self) -> &DragStateMachine {
        &self.machine
    }

    fn notify_fraction(&mut self) {
        if !self.torn_down {
            self.notifier.offer(self.machine.fraction());
        }
    }
}

impl std::fmt::Debug for SlideToConfirm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideToConfirm")
            .field("config", &self.config)
            .field("machine", &self.machine)
            .field("hint", &self.hint)
            .field("container", &self.container)
            .field("completions", &self.completions)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Glyph, VisualOutput};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    fn slide(committed: bool) -> SlideToConfirm {
        SlideToConfirm::new(
            SlideConfig::default(),
            HintTexts::new("Slide to pay", "Paying..."),
            committed,
        )
        .unwrap()
        // track = 300 - (56 + 16) = 228
        .container(Size::new(300.0, 72.0))
    }

    fn run(slide: &mut SlideToConfirm, frames: usize) {
        for _ in 0..frames {
            slide.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SlideConfig::default().fractional_threshold(0.0);
        assert!(SlideToConfirm::new(config, HintTexts::default(), false).is_err());
    }

    #[test]
    fn completion_fires_once_per_release() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let mut slide = slide(false).on_slide_completed(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        slide.handle_event(&Event::drag_start(0));
        slide.handle_event(&Event::drag(220.0, 0.0, 16));
        slide.handle_event(&Event::drag_end(0.0, 32));
        run(&mut slide, 120);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(slide.completions(), 1);
        assert!(slide.take_completed());
        assert!(!slide.take_completed());
        assert_eq!(slide.anchor(), Anchor::End);
    }

    #[test]
    fn fraction_callback_sees_terminal_values() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut slide = slide(false).on_slide_fraction_changed(move |f| sink.lock().unwrap().push(f));

        slide.handle_event(&Event::drag_start(0));
        slide.handle_event(&Event::drag(114.0, 0.0, 16));
        slide.handle_event(&Event::drag_end(0.0, 32));
        run(&mut slide, 120);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&0.0));
        assert!(seen.contains(&0.5));
        assert_eq!(seen.last(), Some(&0.0));
        assert!(seen.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn fraction_callback_receives_resting_value() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut slide = slide(true).on_slide_fraction_changed(move |f| sink.lock().unwrap().push(f));
        assert_eq!(*seen.lock().unwrap(), vec![1.0]);

        run(&mut slide, 10);
        assert_eq!(*seen.lock().unwrap(), vec![1.0]);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _slide = self::slide(false).on_slide_fraction_changed(move |f| sink.lock().unwrap().push(f));
        assert_eq!(*seen.lock().unwrap(), vec![0.0]);
    }

    #[test]
    fn committed_flag_locks_the_gesture() {
        let mut slide = slide(true);
        assert_eq!(slide.anchor(), Anchor::End);
        assert_eq!(slide.fraction(), 1.0);
        assert!(!slide.handle_event(&Event::drag_start(0)));
        slide.handle_event(&Event::drag(-200.0, 0.0, 16));
        run(&mut slide, 60);
        assert_eq!(slide.completions(), 0);
        assert_eq!(slide.offset(), 228.0);
    }

    #[test]
    fn external_commit_animates_without_completing() {
        let mut slide = slide(false);
        assert_eq!(slide.sync_committed(true), SyncAction::AnimateTo(Anchor::End));
        run(&mut slide, 120);
        assert_eq!(slide.anchor(), Anchor::End);
        assert_eq!(slide.completions(), 0);

        assert_eq!(
            slide.sync_committed(false),
            SyncAction::AnimateTo(Anchor::Start)
        );
        run(&mut slide, 120);
        assert_eq!(slide.anchor(), Anchor::Start);
        assert!(slide.is_enabled());
    }

    #[test]
    fn commit_flag_during_release_settle_still_completes() {
        let mut slide = slide(false);
        slide.handle_event(&Event::drag_start(0));
        slide.handle_event(&Event::drag(220.0, 0.0, 16));
        slide.handle_event(&Event::drag_end(0.0, 32));
        run(&mut slide, 1);
        assert!(slide.is_animating());

        assert_eq!(slide.sync_committed(true), SyncAction::AnimateTo(Anchor::End));
        run(&mut slide, 120);
        assert_eq!(slide.anchor(), Anchor::End);
        assert_eq!(slide.completions(), 1);
        assert!(!slide.is_enabled());
    }

    #[test]
    fn teardown_ignores_further_input() {
        let mut slide = slide(false);
        slide.handle_event(&Event::drag_start(0));
        slide.handle_event(&Event::drag(220.0, 0.0, 16));
        slide.handle_event(&Event::drag_end(0.0, 32));
        assert!(slide.handle_event(&Event::unmount(40)));
        assert!(slide.is_torn_down());
        run(&mut slide, 120);
        assert_eq!(slide.completions(), 0);
        assert!(!slide.handle_event(&Event::drag_start(50)));
    }

    #[test]
    fn render_layers_track_hint_thumb() {
        let slide = slide(false);
        let commands = slide.render();
        assert!(matches!(commands[0], DrawCommand::RoundedRect { .. }));
        assert!(matches!(
            &commands[1],
            DrawCommand::Text { content, .. } if content == "Slide to pay"
        ));
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Icon {
                glyph: Glyph::ArrowForward,
                ..
            })
        ));
    }

    #[test]
    fn committed_snapshot_shows_slided_text() {
        let slide = slide(true);
        let snapshot = slide.snapshot();
        assert!(snapshot.committed);
        assert_eq!(snapshot.hint_text, "Paying...");
        assert!(snapshot.hint_color.a > 0.0);
    }

    #[test]
    fn custom_renderer_replaces_thumb() {
        let slide = slide(false).thumb_renderer(|_: &SlideSnapshot| VisualOutput::new());
        assert_eq!(slide.render().len(), 2);
    }

    #[test]
    fn set_hint_reports_change() {
        let mut slide = slide(false);
        assert!(!slide.set_hint(HintTexts::new("Slide to pay", "Paying...")));
        assert!(slide.set_hint(HintTexts::new("Slide to buy", "Buying...")));
        assert_eq!(slide.hint().default_text, "Slide to buy");
    }
}
