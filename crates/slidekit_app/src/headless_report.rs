//! Report output model for headless scenario runs.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use slidekit_core::Anchor;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path};

use crate::headless_assert::DiagnosticsSnapshot;

/// Report status for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Final state of one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSummary {
    pub id: String,
    pub anchor: Anchor,
    pub fraction: f32,
    pub committed: bool,
    pub completions: u32,
}

/// Machine-readable result of a headless run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    #[serde(default)]
    pub slides: Vec<SlideSummary>,
}

impl HeadlessReport {
    pub fn passed(elapsed_frames: u64, elapsed_ms: u64, snapshot: &DiagnosticsSnapshot) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            elapsed_frames,
            elapsed_ms,
            slides: summarize(snapshot),
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        message: String,
        elapsed_frames: u64,
        elapsed_ms: u64,
        snapshot: &DiagnosticsSnapshot,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            elapsed_frames,
            elapsed_ms,
            slides: summarize(snapshot),
        }
    }

    /// Write pretty JSON to `path`, creating parent directories.
    ///
    /// Only relative paths without `..` are accepted.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        ensure_contained(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to_writer(&mut file)?;
        file.flush()?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

fn ensure_contained(path: &Path) -> Result<()> {
    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {
                bail!("report path {} must be relative", path.display())
            }
            Component::ParentDir => {
                bail!("report path {} must not contain '..'", path.display())
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// Slides sorted by id so reports diff cleanly
fn summarize(snapshot: &DiagnosticsSnapshot) -> Vec<SlideSummary> {
    let mut slides: Vec<SlideSummary> = snapshot
        .slides
        .iter()
        .map(|(id, slide)| SlideSummary {
            id: id.clone(),
            anchor: slide.anchor,
            fraction: slide.fraction,
            committed: slide.committed,
            completions: slide.completions,
        })
        .collect();
    slides.sort_by(|a, b| a.id.cmp(&b.id));
    slides
}
