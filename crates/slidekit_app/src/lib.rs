//! SlideKit App
//!
//! Headless hosting for slide widgets. [`SlideHost`] plays the role of the
//! application: it mounts named slides, owns each slide's committed flag and
//! forwards input. Scenarios replay a JSON script of gestures and assertions
//! against a host at a fixed tick and produce a [`HeadlessReport`].
//!
//! # Example
//!
//! ```rust
//! use slidekit_app::{run_scenario, HeadlessRunConfig};
//!
//! let outcome = run_scenario(
//!     r#"{ "steps": [
//!         { "type": "mount", "id": "pay" },
//!         { "type": "drag_start", "id": "pay" },
//!         { "type": "drag", "id": "pay", "delta": 220.0 },
//!         { "type": "release", "id": "pay" },
//!         { "type": "tick", "frames": 60 },
//!         { "type": "assert_anchor", "id": "pay", "anchor": "end" },
//!         { "type": "assert_completed", "id": "pay", "count": 1 }
//!     ] }"#,
//!     HeadlessRunConfig::default(),
//! )
//! .unwrap();
//! assert!(!outcome.is_failed());
//! ```

pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod host;

pub use headless_assert::{AssertionResult, DiagnosticsSlide, DiagnosticsSnapshot};
pub use headless_report::{HeadlessReport, ReportStatus, SlideSummary};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome};
pub use headless_runtime::{HeadlessContext, HeadlessRunConfig, HeadlessRuntime};
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use host::{HostError, MountOptions, SlideHost, SlideId};
