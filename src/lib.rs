// src/lib.rs
//! Self-contained prize-wheel widget core.
//!
//! The hard part lives in [`wheel::Roulette`]: uniform prize selection, the
//! sector-angle math, a two-phase spin animation (acceleration, then
//! deceleration onto the selected sector) with a post-landing highlight
//! pulse, and the state machine gating start / try-again / claim so no
//! action is accepted out of turn. Rendering and host reactions stay outside;
//! the host ticks [`wheel::Roulette::update`] from its event loop and samples
//! the rotation and highlight channels each frame.

pub mod anim;
pub mod config;
pub mod wheel;

pub use config::{ConfigError, WheelAssets, WheelConfig};
pub use wheel::{Control, ControlKind, NullHost, Phase, Roulette, WheelHost};
