//! End-to-end gesture behaviour of the slide widget

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use slidekit_core::{slide_fraction, Anchor, Event, Size, SwipeProgress};
use slidekit_widgets::{FractionChangeNotifier, HintTexts, SlideConfig, SlideToConfirm};

/// 300 wide, 56 thumb, 8 padding each side: 228 of track
const TRACK: f32 = 228.0;

struct Harness {
    slide: SlideToConfirm,
    completions: Arc<AtomicU32>,
    fractions: Arc<Mutex<Vec<f32>>>,
}

impl Harness {
    fn new(committed: bool) -> Self {
        let completions = Arc::new(AtomicU32::new(0));
        let fractions = Arc::new(Mutex::new(Vec::new()));
        let counter = Arc::clone(&completions);
        let sink = Arc::clone(&fractions);
        let slide = SlideToConfirm::new(
            SlideConfig::default(),
            HintTexts::new("Slide to confirm", "Confirmed"),
            committed,
        )
        .unwrap()
        .container(Size::new(300.0, 72.0))
        .on_slide_completed(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .on_slide_fraction_changed(move |f| sink.lock().unwrap().push(f));
        Self {
            slide,
            completions,
            fractions,
        }
    }

    fn swipe(&mut self, distance: f32, velocity: f32) {
        self.slide.handle_event(&Event::drag_start(0));
        self.slide.handle_event(&Event::drag(distance, velocity, 16));
        self.slide.handle_event(&Event::drag_end(velocity, 32));
    }

    fn settle(&mut self) {
        for _ in 0..180 {
            self.slide.tick(1.0 / 60.0);
        }
    }

    fn completions(&self) -> u32 {
        self.completions.load(Ordering::SeqCst)
    }
}

#[test]
fn slow_release_past_threshold_completes_once() {
    let mut h = Harness::new(false);
    h.swipe(TRACK * 0.9, 10.0);
    h.settle();
    assert_eq!(h.slide.anchor(), Anchor::End);
    assert_eq!(h.completions(), 1);

    // Further ticks never repeat the completion
    h.settle();
    assert_eq!(h.completions(), 1);
}

#[test]
fn slow_release_short_of_threshold_returns() {
    let mut h = Harness::new(false);
    h.swipe(TRACK * 0.8, 10.0);
    h.settle();
    assert_eq!(h.slide.anchor(), Anchor::Start);
    assert_eq!(h.slide.offset(), 0.0);
    assert_eq!(h.completions(), 0);
}

#[test]
fn fast_release_completes_regardless_of_position() {
    let mut h = Harness::new(false);
    h.swipe(TRACK * 0.2, 70.0);
    h.settle();
    assert_eq!(h.slide.anchor(), Anchor::End);
    assert_eq!(h.completions(), 1);
}

#[test]
fn fraction_is_deterministic() {
    let progress = SwipeProgress::between(Anchor::End, Anchor::Start, 0.37);
    let expected = slide_fraction(&progress);
    assert!((expected - 0.63).abs() < 1e-6);
    for _ in 0..1000 {
        assert_eq!(slide_fraction(&progress), expected);
    }
}

#[test]
fn programmatic_transitions_never_complete() {
    let mut h = Harness::new(false);
    h.slide.sync_committed(true);
    h.settle();
    assert_eq!(h.slide.anchor(), Anchor::End);
    h.slide.sync_committed(false);
    h.settle();
    h.slide.sync_committed(true);
    h.settle();
    assert_eq!(h.completions(), 0);
}

#[test]
fn notifier_drops_consecutive_duplicates() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut notifier = FractionChangeNotifier::with_callback(move |f| sink.lock().unwrap().push(f));
    for f in [0.0, 0.3, 0.3, 0.7] {
        notifier.offer(f);
    }
    assert_eq!(*seen.lock().unwrap(), vec![0.0, 0.3, 0.7]);
}

#[test]
fn widget_fraction_stream_has_no_repeats() {
    let mut h = Harness::new(false);
    h.swipe(TRACK * 0.95, 0.0);
    h.settle();
    let fractions = h.fractions.lock().unwrap();
    assert_eq!(fractions.last(), Some(&1.0));
    assert!(fractions.windows(2).all(|w| w[0] != w[1]));
    assert!(fractions.iter().all(|f| (0.0..=1.0).contains(f)));
}

#[test]
fn committed_at_mount_starts_at_end_and_stays_locked() {
    let mut h = Harness::new(true);
    assert_eq!(h.slide.anchor(), Anchor::End);
    assert_eq!(h.slide.offset(), TRACK);
    assert!(!h.slide.is_enabled());
    assert!(!h.slide.is_animating());

    h.swipe(-TRACK, -200.0);
    h.settle();
    h.swipe(TRACK, 200.0);
    h.settle();
    assert_eq!(h.completions(), 0);
    assert_eq!(h.slide.anchor(), Anchor::End);
}

#[test]
fn shrinking_keeps_fraction_in_range() {
    let mut h = Harness::new(false);
    h.slide.handle_event(&Event::drag_start(0));
    h.slide.handle_event(&Event::drag(200.0, 0.0, 16));
    for width in [280.0, 200.0, 120.0, 72.0, 40.0] {
        h.slide.handle_event(&Event::resize(width, 72.0, 20));
        let fraction = h.slide.fraction();
        assert!((0.0..=1.0).contains(&fraction), "{width}: {fraction}");
        assert!(h.slide.offset() <= h.slide.machine().extent().track_length());
    }

    h.slide.handle_event(&Event::drag_end(0.0, 40));
    h.settle();
    let fraction = h.slide.fraction();
    assert!((0.0..=1.0).contains(&fraction));
}

#[test]
fn resize_at_rest_keeps_anchor_position() {
    let mut h = Harness::new(true);
    h.slide.handle_event(&Event::resize(200.0, 72.0, 0));
    assert_eq!(h.slide.offset(), 128.0);
    assert_eq!(h.slide.fraction(), 1.0);
}
