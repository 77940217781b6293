//! Assertion helpers for headless slide scenarios.

use rustc_hash::FxHashMap;
use slidekit_core::Anchor;

/// Observable state of every mounted slide, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsSnapshot {
    pub slides: FxHashMap<String, DiagnosticsSlide>,
}

/// Observable state of one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsSlide {
    pub anchor: Anchor,
    pub fraction: f32,
    pub offset: f32,
    pub committed: bool,
    pub enabled: bool,
    pub completions: u32,
    /// Every fraction delivered to the fraction callback, in order
    pub fractions: Vec<f32>,
    pub hint_text: String,
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

fn lookup<'a>(
    id: &str,
    snapshot: &'a DiagnosticsSnapshot,
) -> Result<&'a DiagnosticsSlide, AssertionResult> {
    snapshot
        .slides
        .get(id)
        .ok_or_else(|| AssertionResult::failed("missing_slide", format!("{id}: slide not mounted")))
}

pub fn evaluate_assert_anchor(
    id: &str,
    expected: Anchor,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let slide = match lookup(id, snapshot) {
        Ok(slide) => slide,
        Err(failed) => return failed,
    };
    if slide.anchor == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "anchor_mismatch",
            format!("{id}: expected anchor {expected:?}, got {:?}", slide.anchor),
        )
    }
}

pub fn evaluate_assert_fraction(
    id: &str,
    expected: f32,
    tolerance: f32,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let slide = match lookup(id, snapshot) {
        Ok(slide) => slide,
        Err(failed) => return failed,
    };
    if (slide.fraction - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "fraction_mismatch",
            format!(
                "{id}: expected fraction {expected} (±{tolerance}), got {}",
                slide.fraction
            ),
        )
    }
}

pub fn evaluate_assert_completed(
    id: &str,
    count: u32,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let slide = match lookup(id, snapshot) {
        Ok(slide) => slide,
        Err(failed) => return failed,
    };
    if slide.completions == count {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "completion_mismatch",
            format!(
                "{id}: expected {count} completion(s), got {}",
                slide.completions
            ),
        )
    }
}

/// Compare the delivered fraction stream against `expected`, element-wise.
pub fn evaluate_assert_fractions(
    id: &str,
    expected: &[f32],
    tolerance: f32,
    snapshot: &DiagnosticsSnapshot,
) -> AssertionResult {
    let slide = match lookup(id, snapshot) {
        Ok(slide) => slide,
        Err(failed) => return failed,
    };
    let actual = &slide.fractions;
    let matches = actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(a, e)| (a - e).abs() <= tolerance);
    if matches {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "fractions_mismatch",
            format!("{id}: expected fractions {expected:?}, got {actual:?}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> DiagnosticsSnapshot {
        let mut snapshot = DiagnosticsSnapshot::default();
        snapshot.slides.insert(
            "pay".to_string(),
            DiagnosticsSlide {
                anchor: Anchor::End,
                fraction: 1.0,
                offset: 228.0,
                committed: false,
                enabled: true,
                completions: 1,
                fractions: vec![0.0, 0.5, 1.0],
                hint_text: "Slide to pay".to_string(),
            },
        );
        snapshot
    }

    #[test]
    fn missing_slide_fails_every_assertion() {
        let snapshot = DiagnosticsSnapshot::default();
        for result in [
            evaluate_assert_anchor("pay", Anchor::End, &snapshot),
            evaluate_assert_fraction("pay", 1.0, 0.0, &snapshot),
            evaluate_assert_completed("pay", 1, &snapshot),
            evaluate_assert_fractions("pay", &[], 0.0, &snapshot),
        ] {
            assert!(matches!(result, AssertionResult::Failed { ref code, .. } if code == "missing_slide"));
        }
    }

    #[test]
    fn fraction_uses_tolerance() {
        let snapshot = snapshot();
        assert_eq!(
            evaluate_assert_fraction("pay", 0.999, 0.01, &snapshot),
            AssertionResult::Passed
        );
        assert!(matches!(
            evaluate_assert_fraction("pay", 0.5, 0.01, &snapshot),
            AssertionResult::Failed { .. }
        ));
    }

    #[test]
    fn fraction_stream_must_match_in_length() {
        let snapshot = snapshot();
        assert_eq!(
            evaluate_assert_fractions("pay", &[0.0, 0.5, 1.0], 1e-6, &snapshot),
            AssertionResult::Passed
        );
        assert!(matches!(
            evaluate_assert_fractions("pay", &[0.0, 1.0], 1e-6, &snapshot),
            AssertionResult::Failed { .. }
        ));
    }

    #[test]
    fn anchor_and_completions() {
        let snapshot = snapshot();
        assert_eq!(
            evaluate_assert_anchor("pay", Anchor::End, &snapshot),
            AssertionResult::Passed
        );
        assert!(matches!(
            evaluate_assert_completed("pay", 2, &snapshot),
            AssertionResult::Failed { ref code, .. } if code == "completion_mismatch"
        ));
    }
}
