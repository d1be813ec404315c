// src/config.rs
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

// --- Wheel Geometry ---
pub const FULL_TURN_DEG: f32 = 360.0;

// --- Spin Tuning ---
pub const SPIN_UP_TURNS: f32 = 10.0; // acceleration phase: kinetic buildup only
pub const SPIN_OUT_TURNS: f32 = 15.0; // deceleration phase: further turns before the sector
pub const HIGHLIGHT_PULSE_LEG: f32 = 0.5; // per-direction duration of the landing pulse

// --- Defaults ---
pub const DEFAULT_START_TEXT: &str = "Start!";
pub const DEFAULT_TRY_AGAIN_TEXT: &str = "Try Again";
pub const DEFAULT_RECEIVE_GIFT_TEXT: &str = "Receive a gift";
pub const DEFAULT_SPIN_DURATION: f32 = 6.0;
pub const DEFAULT_SPINS_LIMIT: u32 = 1;

/// The designated non-winning outcome. Landing on it re-enables spinning
/// instead of offering a claim.
pub const TRY_AGAIN_PRIZE: &str = "try_again";

/// Opaque visual asset references, passed through to the presentation layer
/// untouched. The controller never interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelAssets {
    pub wheel_image_base: String,
    pub wheel_image_overlay: String,
    pub highlight_image: String,
    pub pointer_image: String,
}

/// Construction-time configuration, immutable for the instance's life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub start_text: String,
    pub try_again_text: String,
    pub receive_gift_text: String,
    pub assets: WheelAssets,
    /// Ordered prize identifiers; order determines each prize's angular
    /// sector. Must be non-empty and contain at most one [`TRY_AGAIN_PRIZE`].
    pub prize_list: Vec<String>,
    /// `None` = unlimited. `Some(0)` = no spins allowed.
    pub spins_limit: Option<u32>,
    /// Total time units for one full spin, both phases combined. Must be > 0.
    pub duration: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            start_text: DEFAULT_START_TEXT.to_string(),
            try_again_text: DEFAULT_TRY_AGAIN_TEXT.to_string(),
            receive_gift_text: DEFAULT_RECEIVE_GIFT_TEXT.to_string(),
            assets: WheelAssets::default(),
            prize_list: Vec::new(),
            spins_limit: Some(DEFAULT_SPINS_LIMIT),
            duration: DEFAULT_SPIN_DURATION,
        }
    }
}

impl WheelConfig {
    /// Precondition checks, reported at construction rather than mid-spin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prize_list.is_empty() {
            return Err(ConfigError::EmptyPrizeList);
        }
        let sentinels = self.prize_list.iter().filter(|p| *p == TRY_AGAIN_PRIZE).count();
        if sentinels > 1 {
            return Err(ConfigError::DuplicateSentinel(sentinels));
        }
        if !(self.duration > 0.0) {
            return Err(ConfigError::NonPositiveDuration(self.duration));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyPrizeList,
    DuplicateSentinel(usize),
    NonPositiveDuration(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPrizeList => write!(f, "prize list must not be empty"),
            ConfigError::DuplicateSentinel(n) => {
                write!(f, "prize list contains {} '{}' entries, at most one allowed", n, TRY_AGAIN_PRIZE)
            }
            ConfigError::NonPositiveDuration(d) => {
                write!(f, "spin duration must be positive, got {}", d)
            }
        }
    }
}

impl Error for ConfigError {}
