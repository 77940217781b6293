//! SlideKit configuration file handling (slidekit.toml)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use slidekit_app::HeadlessRunConfig;
use slidekit_theme::ThemePreset;
use slidekit_widgets::SlideConfig;
use std::fs;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SlideKitConfig {
    #[serde(default)]
    pub slide: SlideConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Palette selection
#[derive(Debug, Deserialize, Serialize)]
pub struct ThemeConfig {
    #[serde(default = "default_preset")]
    pub preset: String,
}

fn default_preset() -> String {
    "light".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
        }
    }
}

/// Headless run defaults
#[derive(Debug, Deserialize, Serialize)]
pub struct RunConfig {
    /// Logical milliseconds per frame
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Container width for mounted slides
    #[serde(default = "default_width")]
    pub width: f32,
    /// Container height for mounted slides
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_tick_ms() -> u64 {
    16
}

fn default_width() -> f32 {
    300.0
}

fn default_height() -> f32 {
    72.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl SlideKitConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "No config found at {}. Run `slidekit init` to create one.",
                path.display()
            );
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SlideKitConfig = toml::from_str(content).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.slide.validate()?;
        self.theme_preset()?;
        self.run_config(None).validate()?;
        Ok(())
    }

    pub fn theme_preset(&self) -> Result<ThemePreset> {
        match ThemePreset::from_id(&self.theme.preset) {
            Some(preset) => Ok(preset),
            None => bail!(
                "Unknown theme preset '{}' (expected one of: {})",
                self.theme.preset,
                ThemePreset::all()
                    .iter()
                    .map(|p| p.id())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// Headless run settings, with an optional tick override from the command line
    pub fn run_config(&self, tick_ms: Option<u64>) -> HeadlessRunConfig {
        HeadlessRunConfig {
            width: self.run.width,
            height: self.run.height,
            tick_ms: tick_ms.unwrap_or(self.run.tick_ms),
            theme: self.theme_preset().unwrap_or(ThemePreset::Light),
            ..HeadlessRunConfig::default()
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
