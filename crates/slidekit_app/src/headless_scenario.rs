//! Scenario definition for headless slide runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use slidekit_core::Anchor;
use slidekit_widgets::SlideConfig;
use std::path::Path;

/// Sequence of gesture and assertion steps.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    /// Slide configuration used for every mount, unless overridden by the runner
    #[serde(default)]
    pub config: Option<SlideConfig>,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

fn default_tolerance() -> f32 {
    1e-3
}

/// One scripted step. Slides are addressed by `id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Mount {
        id: String,
        #[serde(default)]
        committed: bool,
        #[serde(default)]
        hint: Option<String>,
        #[serde(default)]
        slided_hint: Option<String>,
        #[serde(default)]
        width: Option<f32>,
        #[serde(default)]
        height: Option<f32>,
    },
    DragStart {
        id: String,
    },
    Drag {
        id: String,
        delta: f32,
        #[serde(default)]
        velocity: f32,
    },
    Release {
        id: String,
        #[serde(default)]
        velocity: f32,
    },
    Resize {
        id: String,
        width: f32,
        height: f32,
    },
    SetCommitted {
        id: String,
        committed: bool,
    },
    Tick {
        frames: u32,
    },
    Wait {
        ms: u64,
    },
    Unmount {
        id: String,
    },
    AssertAnchor {
        id: String,
        anchor: Anchor,
    },
    AssertFraction {
        id: String,
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertCompleted {
        id: String,
        count: u32,
    },
    AssertFractions {
        id: String,
        values: Vec<f32>,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
}

impl ScenarioStep {
    /// Step type as written in the scenario file
    pub fn kind(&self) -> &'static str {
        match self {
            ScenarioStep::Mount { .. } => "mount",
            ScenarioStep::DragStart { .. } => "drag_start",
            ScenarioStep::Drag { .. } => "drag",
            ScenarioStep::Release { .. } => "release",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::SetCommitted { .. } => "set_committed",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Unmount { .. } => "unmount",
            ScenarioStep::AssertAnchor { .. } => "assert_anchor",
            ScenarioStep::AssertFraction { .. } => "assert_fraction",
            ScenarioStep::AssertCompleted { .. } => "assert_completed",
            ScenarioStep::AssertFractions { .. } => "assert_fractions",
        }
    }
}
