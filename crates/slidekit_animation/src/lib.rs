//! SlideKit Animation
//!
//! Motion used to settle the thumb onto an anchor.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Fixed-duration settles shaped by an easing curve
//! - **Interruptible**: Retargeting a spring keeps its velocity

pub mod easing;
pub mod settle;
pub mod spring;

pub use easing::Easing;
pub use settle::{SettleAnimation, SettleSpec};
pub use spring::{Spring, SpringConfig};
