//! Headless slide host
//!
//! Owns mounted slides by name together with the committed flag the
//! application would normally keep. The host never flips that flag on its
//! own; scenarios do it explicitly with `set_committed`.

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;
use slidekit_core::{ConfigError, Event, Size};
use slidekit_theme::ThemePreset;
use slidekit_widgets::{HintTexts, SlideConfig, SlideToConfirm, SyncAction};
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

use crate::headless_assert::{DiagnosticsSlide, DiagnosticsSnapshot};

new_key_type! {
    /// Handle to a mounted slide
    pub struct SlideId;
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("no slide mounted as '{0}'")]
    UnknownSlide(String),
    #[error("a slide is already mounted as '{0}'")]
    DuplicateSlide(String),
    #[error("invalid slide configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Per-slide mount parameters
#[derive(Debug, Clone)]
pub struct MountOptions {
    pub hint: HintTexts,
    pub committed: bool,
    pub size: Size,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            hint: HintTexts::new("Slide to confirm", "Confirmed"),
            committed: false,
            size: Size::new(300.0, 72.0),
        }
    }
}

struct HostedSlide {
    name: String,
    widget: SlideToConfirm,
    committed: bool,
    fractions: Arc<Mutex<Vec<f32>>>,
}

impl HostedSlide {
    fn inspect(&self) -> DiagnosticsSlide {
        let fractions = self
            .fractions
            .lock()
            .map(|f| f.clone())
            .unwrap_or_default();
        DiagnosticsSlide {
            anchor: self.widget.anchor(),
            fraction: self.widget.fraction(),
            offset: self.widget.offset(),
            committed: self.committed,
            enabled: self.widget.is_enabled(),
            completions: self.widget.completions(),
            fractions,
            hint_text: self.widget.hint().text_for(self.committed).to_string(),
        }
    }
}

/// Named slides driven by a logical clock
pub struct SlideHost {
    config: SlideConfig,
    theme: ThemePreset,
    slides: SlotMap<SlideId, HostedSlide>,
    names: FxHashMap<String, SlideId>,
    clock_ms: u64,
}

impl SlideHost {
    pub fn new(config: SlideConfig, theme: ThemePreset) -> Result<Self, HostError> {
        config.validate()?;
        Ok(Self {
            config,
            theme,
            slides: SlotMap::with_key(),
            names: FxHashMap::default(),
            clock_ms: 0,
        })
    }

    /// Mount a slide under `name`
    pub fn mount(&mut self, name: &str, options: MountOptions) -> Result<SlideId, HostError> {
        if self.names.contains_key(name) {
            return Err(HostError::DuplicateSlide(name.to_string()));
        }
        let fractions = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fractions);
        let widget = SlideToConfirm::new(self.config.clone(), options.hint, options.committed)?
            .colors(self.theme.colors())
            .container(options.size)
            .on_slide_fraction_changed(move |fraction| {
                if let Ok(mut seen) = sink.lock() {
                    seen.push(fraction);
                }
            });

        let id = self.slides.insert(HostedSlide {
            name: name.to_string(),
            widget,
            committed: options.committed,
            fractions,
        });
        self.names.insert(name.to_string(), id);
        tracing::debug!(name, committed = options.committed, "slide mounted");
        Ok(id)
    }

    /// Tear down and remove the slide mounted as `name`
    pub fn unmount(&mut self, name: &str) -> Result<(), HostError> {
        let id = self
            .names
            .remove(name)
            .ok_or_else(|| HostError::UnknownSlide(name.to_string()))?;
        if let Some(mut hosted) = self.slides.remove(id) {
            hosted.widget.handle_event(&Event::unmount(self.clock_ms));
            tracing::debug!(name = %hosted.name, "slide unmounted");
        }
        Ok(())
    }

    pub fn id(&self, name: &str) -> Option<SlideId> {
        self.names.get(name).copied()
    }

    pub fn slide(&self, name: &str) -> Result<&SlideToConfirm, HostError> {
        self.hosted(name).map(|hosted| &hosted.widget)
    }

    pub fn drag_start(&mut self, name: &str) -> Result<bool, HostError> {
        let event = Event::drag_start(self.clock_ms);
        Ok(self.hosted_mut(name)?.widget.handle_event(&event))
    }

    pub fn drag(&mut self, name: &str, delta: f32, velocity: f32) -> Result<bool, HostError> {
        let event = Event::drag(delta, velocity, self.clock_ms);
        Ok(self.hosted_mut(name)?.widget.handle_event(&event))
    }

    pub fn release(&mut self, name: &str, velocity: f32) -> Result<bool, HostError> {
        let event = Event::drag_end(velocity, self.clock_ms);
        Ok(self.hosted_mut(name)?.widget.handle_event(&event))
    }

    pub fn resize(&mut self, name: &str, width: f32, height: f32) -> Result<bool, HostError> {
        let event = Event::resize(width, height, self.clock_ms);
        Ok(self.hosted_mut(name)?.widget.handle_event(&event))
    }

    /// Change the caller-owned committed flag and let the slide reconcile
    pub fn set_committed(&mut self, name: &str, committed: bool) -> Result<SyncAction, HostError> {
        let hosted = self.hosted_mut(name)?;
        hosted.committed = committed;
        Ok(hosted.widget.sync_committed(committed))
    }

    /// Advance the clock and every slide by `dt_ms`
    pub fn tick(&mut self, dt_ms: u64) {
        self.clock_ms = self.clock_ms.saturating_add(dt_ms);
        let dt = dt_ms as f32 / 1000.0;
        for hosted in self.slides.values_mut() {
            if let Some(settled) = hosted.widget.tick(dt) {
                tracing::trace!(
                    name = %hosted.name,
                    anchor = ?settled.anchor,
                    cause = ?settled.cause,
                    "slide settled"
                );
            }
        }
    }

    pub fn inspect(&self, name: &str) -> Result<DiagnosticsSlide, HostError> {
        self.hosted(name).map(HostedSlide::inspect)
    }

    /// Observable state of every mounted slide
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        let slides = self
            .slides
            .values()
            .map(|hosted| (hosted.name.clone(), hosted.inspect()))
            .collect();
        DiagnosticsSnapshot { slides }
    }

    /// Mounted slide names
    pub fn names(&self) -> Vec<&str> {
        self.slides.values().map(|h| h.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    fn hosted(&self, name: &str) -> Result<&HostedSlide, HostError> {
        self.names
            .get(name)
            .and_then(|id| self.slides.get(*id))
            .ok_or_else(|| HostError::UnknownSlide(name.to_string()))
    }

    fn hosted_mut(&mut self, name: &str) -> Result<&mut HostedSlide, HostError> {
        self.names
            .get(name)
            .and_then(|id| self.slides.get_mut(*id))
            .ok_or_else(|| HostError::UnknownSlide(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidekit_core::Anchor;

    fn host() -> SlideHost {
        SlideHost::new(SlideConfig::default(), ThemePreset::Light).unwrap()
    }

    #[test]
    fn mount_rejects_duplicates() {
        let mut host = host();
        host.mount("pay", MountOptions::default()).unwrap();
        assert!(matches!(
            host.mount("pay", MountOptions::default()),
            Err(HostError::DuplicateSlide(_))
        ));
    }

    #[test]
    fn unknown_names_are_errors() {
        let mut host = host();
        assert!(matches!(
            host.drag_start("missing"),
            Err(HostError::UnknownSlide(_))
        ));
        assert!(host.unmount("missing").is_err());
    }

    #[test]
    fn slides_are_independent() {
        let mut host = host();
        host.mount("a", MountOptions::default()).unwrap();
        host.mount("b", MountOptions::default()).unwrap();

        host.drag_start("a").unwrap();
        host.drag("a", 228.0, 0.0).unwrap();
        host.release("a", 0.0).unwrap();
        for _ in 0..60 {
            host.tick(16);
        }

        assert_eq!(host.inspect("a").unwrap().anchor, Anchor::End);
        assert_eq!(host.inspect("a").unwrap().completions, 1);
        assert_eq!(host.inspect("b").unwrap().anchor, Anchor::Start);
        assert_eq!(host.names(), vec!["a", "b"]);
    }

    #[test]
    fn unmount_frees_the_name() {
        let mut host = host();
        host.mount("pay", MountOptions::default()).unwrap();
        host.unmount("pay").unwrap();
        assert!(host.is_empty());
        host.mount("pay", MountOptions::default()).unwrap();
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn committed_flag_is_tracked_for_inspection() {
        let mut host = host();
        host.mount("pay", MountOptions::default()).unwrap();
        host.set_committed("pay", true).unwrap();
        let inspected = host.inspect("pay").unwrap();
        assert!(inspected.committed);
        assert!(!inspected.enabled);
        assert_eq!(inspected.hint_text, "Confirmed");
    }
}
