//! Scenario runner that replays gestures against a [`SlideHost`].

use crate::headless_assert::{
    evaluate_assert_anchor, evaluate_assert_completed, evaluate_assert_fraction,
    evaluate_assert_fractions, AssertionResult,
};
use crate::headless_report::HeadlessReport;
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use crate::host::{HostError, MountOptions, SlideHost};
use anyhow::{Context, Result};
use slidekit_core::Size;
use slidekit_widgets::{HintTexts, SlideConfig};

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON with the scenario's own slide configuration.
pub fn run_scenario(input: &str, runtime_cfg: HeadlessRunConfig) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, runtime_cfg, None)
}

/// Execute a pre-loaded scenario.
///
/// `slide_config` replaces any configuration embedded in the scenario.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    runtime_cfg: HeadlessRunConfig,
    slide_config: Option<&SlideConfig>,
) -> Result<RunOutcome> {
    runtime_cfg.validate()?;
    let config = slide_config
        .cloned()
        .or_else(|| scenario.config.clone())
        .unwrap_or_default();
    let mut host =
        SlideHost::new(config, runtime_cfg.theme).context("Invalid slide configuration")?;

    let mut clock = Clock::default();

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::trace!(step_index, kind = step.kind(), "scenario step");
        let result = match step {
            ScenarioStep::Tick { frames } => {
                let tick_ms = runtime_cfg.tick_ms;
                run_frames(runtime_cfg, *frames, &mut host, &mut clock, || tick_ms)?;
                Ok(AssertionResult::Passed)
            }
            ScenarioStep::Wait { ms } => {
                let frames = wait_frames(*ms, runtime_cfg.tick_ms);
                let mut remaining_ms = *ms;
                run_frames(runtime_cfg, frames, &mut host, &mut clock, || {
                    let step_ms = remaining_ms.min(runtime_cfg.tick_ms);
                    remaining_ms = remaining_ms.saturating_sub(step_ms);
                    step_ms
                })?;
                Ok(AssertionResult::Passed)
            }
            _ => apply_step(step, &mut host, &runtime_cfg),
        };

        let failure = match result {
            Ok(AssertionResult::Passed) => None,
            Ok(AssertionResult::Failed { message, .. }) => Some(message),
            Err(err) => Some(err.to_string()),
        };
        if let Some(message) = failure {
            tracing::info!(step_index, kind = step.kind(), %message, "scenario failed");
            let report = HeadlessReport::failed(
                step.kind(),
                step_index,
                message,
                clock.frames,
                clock.ms,
                &host.snapshot(),
            );
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(clock.frames, clock.ms, &host.snapshot()),
    })
}

#[derive(Debug, Default)]
struct Clock {
    frames: u64,
    ms: u64,
}

fn apply_step(
    step: &ScenarioStep,
    host: &mut SlideHost,
    runtime_cfg: &HeadlessRunConfig,
) -> Result<AssertionResult, HostError> {
    match step {
        ScenarioStep::Mount {
            id,
            committed,
            hint,
            slided_hint,
            width,
            height,
        } => {
            let defaults = MountOptions::default();
            let options = MountOptions {
                hint: HintTexts::new(
                    hint.clone().unwrap_or(defaults.hint.default_text),
                    slided_hint.clone().unwrap_or(defaults.hint.slided_text),
                ),
                committed: *committed,
                size: Size::new(
                    width.unwrap_or(runtime_cfg.width),
                    height.unwrap_or(runtime_cfg.height),
                ),
            };
            host.mount(id, options)?;
        }
        ScenarioStep::DragStart { id } => {
            host.drag_start(id)?;
        }
        ScenarioStep::Drag {
            id,
            delta,
            velocity,
        } => {
            host.drag(id, *delta, *velocity)?;
        }
        ScenarioStep::Release { id, velocity } => {
            host.release(id, *velocity)?;
        }
        ScenarioStep::Resize { id, width, height } => {
            host.resize(id, *width, *height)?;
        }
        ScenarioStep::SetCommitted { id, committed } => {
            host.set_committed(id, *committed)?;
        }
        ScenarioStep::Unmount { id } => host.unmount(id)?,
        ScenarioStep::AssertAnchor { id, anchor } => {
            return Ok(evaluate_assert_anchor(id, *anchor, &host.snapshot()));
        }
        ScenarioStep::AssertFraction {
            id,
            value,
            tolerance,
        } => {
            return Ok(evaluate_assert_fraction(
                id,
                *value,
                *tolerance,
                &host.snapshot(),
            ));
        }
        ScenarioStep::AssertCompleted { id, count } => {
            return Ok(evaluate_assert_completed(id, *count, &host.snapshot()));
        }
        ScenarioStep::AssertFractions {
            id,
            values,
            tolerance,
        } => {
            return Ok(evaluate_assert_fractions(
                id,
                values,
                *tolerance,
                &host.snapshot(),
            ));
        }
        ScenarioStep::Tick { .. } | ScenarioStep::Wait { .. } => {}
    }
    Ok(AssertionResult::Passed)
}

fn run_frames<A>(
    runtime_cfg: HeadlessRunConfig,
    frames: u32,
    host: &mut SlideHost,
    clock: &mut Clock,
    mut advance_ms: A,
) -> Result<()>
where
    A: FnMut() -> u64,
{
    if frames == 0 {
        return Ok(());
    }
    let mut cfg = runtime_cfg;
    cfg.max_frames = frames;
    HeadlessRuntime::run(cfg, |_| {
        let dt_ms = advance_ms();
        host.tick(dt_ms);
        clock.frames = clock.frames.saturating_add(1);
        clock.ms = clock.ms.saturating_add(dt_ms);
    })
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}
