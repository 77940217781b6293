//! Settle animations
//!
//! A settle moves a scalar from where the gesture left it to an anchor
//! coordinate. Only one target is ever pending: retargeting replaces it.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};

/// How a settle moves toward its target
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettleSpec {
    /// Physics-driven; inherits release velocity
    Spring(SpringConfig),
    /// Fixed duration; ignores release velocity
    Tween {
        duration_ms: u32,
        #[serde(default)]
        easing: Easing,
    },
}

impl Default for SettleSpec {
    fn default() -> Self {
        SettleSpec::Spring(SpringConfig::default())
    }
}

impl SettleSpec {
    pub fn is_valid(&self) -> bool {
        match self {
            SettleSpec::Spring(config) => config.is_valid(),
            SettleSpec::Tween { .. } => true,
        }
    }
}

#[derive(Clone, Debug)]
enum Motion {
    Spring(Spring),
    Tween {
        from: f32,
        to: f32,
        elapsed_ms: f32,
        duration_ms: u32,
        easing: Easing,
        value: f32,
    },
}

/// A running settle toward a single target
#[derive(Clone, Debug)]
pub struct SettleAnimation {
    motion: Motion,
}

impl SettleAnimation {
    /// Start moving from `from` toward `to` with `initial_velocity` (units/s)
    pub fn start(spec: SettleSpec, from: f32, to: f32, initial_velocity: f32) -> Self {
        tracing::trace!(?spec, from, to, initial_velocity, "settle started");
        let motion = match spec {
            SettleSpec::Spring(config) => {
                let mut spring = Spring::new(config, from);
                spring.set_target(to);
                if initial_velocity.is_finite() {
                    spring.set_velocity(initial_velocity);
                }
                Motion::Spring(spring)
            }
            SettleSpec::Tween {
                duration_ms,
                easing,
            } => Motion::Tween {
                from,
                to,
                elapsed_ms: 0.0,
                duration_ms,
                easing,
                value: from,
            },
        };
        Self { motion }
    }

    /// Replace the target. Springs keep their velocity; tweens restart from
    /// the current value.
    pub fn retarget(&mut self, to: f32) {
        tracing::trace!(from = self.value(), to, "settle retargeted");
        match &mut self.motion {
            Motion::Spring(spring) => spring.set_target(to),
            Motion::Tween {
                from,
                to: target,
                elapsed_ms,
                value,
                ..
            } => {
                *from = *value;
                *target = to;
                *elapsed_ms = 0.0;
            }
        }
    }

    /// Advance by `dt` seconds and return the new value
    pub fn step(&mut self, dt: f32) -> f32 {
        match &mut self.motion {
            Motion::Spring(spring) => {
                spring.step(dt);
                spring.value()
            }
            Motion::Tween {
                from,
                to,
                elapsed_ms,
                duration_ms,
                easing,
                value,
            } => {
                if dt.is_finite() && dt > 0.0 {
                    *elapsed_ms += dt * 1000.0;
                }
                let t = if *duration_ms == 0 {
                    1.0
                } else {
                    (*elapsed_ms / *duration_ms as f32).min(1.0)
                };
                *value = if t >= 1.0 {
                    *to
                } else {
                    *from + (*to - *from) * easing.apply(t)
                };
                *value
            }
        }
    }

    pub fn value(&self) -> f32 {
        match &self.motion {
            Motion::Spring(spring) => spring.value(),
            Motion::Tween { value, .. } => *value,
        }
    }

    pub fn target(&self) -> f32 {
        match &self.motion {
            Motion::Spring(spring) => spring.target(),
            Motion::Tween { to, .. } => *to,
        }
    }

    pub fn velocity(&self) -> f32 {
        match &self.motion {
            Motion::Spring(spring) => spring.velocity(),
            Motion::Tween { .. } => 0.0,
        }
    }

    /// True once the value rests exactly on the target
    pub fn is_finished(&self) -> bool {
        match &self.motion {
            Motion::Spring(spring) => spring.is_settled() && spring.value() == spring.target(),
            Motion::Tween { value, to, .. } => value == to,
        }
    }
}
