//! Easing curves for tween settles

use serde::{Deserialize, Serialize};

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve, `cubic-bezier(0.4, 0, 0.2, 1)`
    #[default]
    FastOutSlowIn,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` through the curve
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::FastOutSlowIn => bezier(t, 0.4, 0.0, 0.2, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => bezier(t, x1, y1, x2, y2),
        }
    }
}

/// CSS-style cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1).
///
/// Finds the curve parameter whose x equals `t` by bisection, which always
/// converges for control points with x in `[0, 1]`.
fn bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let target = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut s = target;
    for _ in 0..32 {
        let x = cubic(s, x1, x2);
        if (x - target).abs() < 1e-7 {
            break;
        }
        if x < target {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }

    cubic(s, y1, y2) as f32
}

/// One coordinate of the curve at parameter `s`
fn cubic(s: f64, p1: f64, p2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}
