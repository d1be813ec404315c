// src/wheel.rs
//! The spin controller: a finite-state machine driving the wheel rotation
//! and highlight pulse channels.
//!
//! The host owns the event loop. It forwards user input through the
//! `request_*` actions and calls [`Roulette::update`] every frame; the
//! controller emits its callbacks synchronously from within those calls.

use crate::anim::{Channel, Ease};
use crate::config::{
    ConfigError, FULL_TURN_DEG, HIGHLIGHT_PULSE_LEG, SPIN_OUT_TURNS, SPIN_UP_TURNS,
    TRY_AGAIN_PRIZE, WheelAssets, WheelConfig,
};
use log::debug;
use rand::{Rng, RngCore};

/// Where the machine currently is in the start-spin-land flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Spinning,
    /// Settled on a claimable prize; `request_claim` hands it out.
    LandedClaimable,
    /// Settled on the try-again sentinel; `request_try_again` respins for free.
    LandedTryAgain,
}

/// Callback surface from controller to host. Every method has a default no-op
/// body so hosts implement only what they care about.
pub trait WheelHost {
    /// A spin was accepted via `request_start`.
    fn on_start(&mut self) {}
    /// The wheel settled on a prize (fired for every landing, sentinel included).
    fn on_complete(&mut self, _prize: &str) {}
    /// A non-sentinel prize was successfully claimed.
    fn on_receive_gift(&mut self, _prize: &str) {}
}

/// Host that ignores every event.
pub struct NullHost;
impl WheelHost for NullHost {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Start,
    TryAgain,
    ReceiveGift,
}

/// One visible control affordance with its configured label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control<'a> {
    pub kind: ControlKind,
    pub label: &'a str,
}

/// Angular offset of a prize sector from the pointer reference. Sectors are
/// equal-width slices of the circle in prize-list order; sector 0 starts at 0°.
pub fn sector_angle(index: usize, len: usize) -> f32 {
    FULL_TURN_DEG * index as f32 / len as f32
}

// Mutable per-instance state, owned exclusively by the controller.
#[derive(Debug, Clone)]
struct SpinSession {
    spin_count: u32,
    phase: Phase,
    won_prize: Option<String>,
}

pub struct Roulette {
    config: WheelConfig,
    session: SpinSession,
    rotation: Channel,
    highlight: Channel,
    // Index drawn when the spin began; applied to the session only once the
    // animation chain settles, so observers never see a landed state while
    // the wheel is still moving.
    pending_prize: Option<usize>,
    rng: Box<dyn RngCore>,
}

impl Roulette {
    /// Build a controller drawing from the thread-local random source.
    pub fn new(config: WheelConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, Box::new(rand::rng()))
    }

    /// Build a controller with an injected random source. The selection
    /// contract is unchanged; this exists so tests can seed the draw.
    pub fn with_rng(config: WheelConfig, rng: Box<dyn RngCore>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            session: SpinSession { spin_count: 0, phase: Phase::Idle, won_prize: None },
            rotation: Channel::new(0.0),
            highlight: Channel::new(0.0),
            pending_prize: None,
            rng,
        })
    }

    // --- Action interface (host/UI -> controller) ---

    /// Begin a counted spin. Silently rejected while spinning or once the
    /// spin limit is reached; expected races (double-click) are not errors.
    pub fn request_start(&mut self, host: &mut dyn WheelHost) {
        if self.session.phase == Phase::Spinning {
            debug!("start ignored: already spinning");
            return;
        }
        if !self.can_spin() {
            debug!("start ignored: spin limit {:?} reached", self.config.spins_limit);
            return;
        }
        self.session.spin_count += 1;
        host.on_start();
        self.begin_spin();
    }

    /// Respin after landing on the sentinel. Does not count against the spin
    /// limit and emits no start event. No-op outside `LandedTryAgain`.
    pub fn request_try_again(&mut self) {
        if self.session.phase != Phase::LandedTryAgain {
            debug!("try-again ignored in {:?}", self.session.phase);
            return;
        }
        self.begin_spin();
    }

    /// Claim the pending prize. No-op while spinning, when nothing is
    /// pending, or when the pending prize is the sentinel.
    pub fn request_claim(&mut self, host: &mut dyn WheelHost) {
        if self.session.phase == Phase::Spinning {
            debug!("claim ignored: spinning");
            return;
        }
        match self.session.won_prize.take() {
            Some(prize) if prize != TRY_AGAIN_PRIZE => {
                debug!("prize '{}' claimed", prize);
                host.on_receive_gift(&prize);
                self.session.phase = Phase::Idle;
            }
            other => {
                // Put a sentinel back; claiming it is not allowed.
                self.session.won_prize = other;
                debug!("claim ignored: no claimable prize pending");
            }
        }
    }

    /// Advance the animation channels. Must be called from the host's event
    /// loop; landing side effects fire from here once the chain settles.
    pub fn update(&mut self, dt: f32, host: &mut dyn WheelHost) {
        self.rotation.update(dt);
        self.highlight.update(dt);
        if self.session.phase == Phase::Spinning && self.rotation.is_idle() {
            self.settle(host);
        }
    }

    // --- State queries (presentation layer sampling) ---

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn spin_count(&self) -> u32 {
        self.session.spin_count
    }

    pub fn won_prize(&self) -> Option<&str> {
        self.session.won_prize.as_deref()
    }

    /// Cumulative wheel angle in degrees. Monotonically non-decreasing
    /// across the session; the pointer sector is this modulo 360.
    pub fn rotation(&self) -> f32 {
        self.rotation.value()
    }

    /// Current value of the highlight pulse channel (0 = invisible).
    pub fn highlight_opacity(&self) -> f32 {
        self.highlight.value()
    }

    pub fn assets(&self) -> &WheelAssets {
        &self.config.assets
    }

    pub fn can_spin(&self) -> bool {
        match self.config.spins_limit {
            None => true,
            Some(limit) => self.session.spin_count < limit,
        }
    }

    /// Which buttons the presentation layer should show right now, with
    /// their configured labels: try-again after a sentinel landing, otherwise
    /// start while spins remain, plus claim whenever a claimable prize is
    /// pending and the wheel is not moving.
    pub fn controls(&self) -> Vec<Control<'_>> {
        let mut controls = Vec::new();
        match self.session.phase {
            Phase::Spinning => {}
            Phase::LandedTryAgain => {
                controls.push(Control { kind: ControlKind::TryAgain, label: &self.config.try_again_text });
            }
            Phase::Idle | Phase::LandedClaimable => {
                if self.can_spin() {
                    controls.push(Control { kind: ControlKind::Start, label: &self.config.start_text });
                }
            }
        }
        if self.session.phase != Phase::Spinning {
            if let Some(prize) = &self.session.won_prize {
                if prize != TRY_AGAIN_PRIZE {
                    controls.push(Control {
                        kind: ControlKind::ReceiveGift,
                        label: &self.config.receive_gift_text,
                    });
                }
            }
        }
        controls
    }

    // --- Internals ---

    // Draw the prize and queue the two-phase rotation. The outcome is fixed
    // here; the acceleration phase is pure kinetic buildup.
    fn begin_spin(&mut self) {
        let len = self.config.prize_list.len();
        let roll: f64 = self.rng.random();
        let index = ((roll * len as f64) as usize).min(len - 1);
        self.pending_prize = Some(index);
        self.session.phase = Phase::Spinning;

        // The previous landing's pulse must not bleed into this spin.
        self.highlight.stop();
        self.highlight.set(0.0);

        let half = self.config.duration / 2.0;
        let start = self.rotation.value();
        // Landing target is anchored to the last whole turn below `start`, so
        // the final angle is exactly the sector angle modulo 360 while the
        // cumulative value keeps strictly increasing spin over spin.
        let whole = start - start.rem_euclid(FULL_TURN_DEG);
        let up_target = start + SPIN_UP_TURNS * FULL_TURN_DEG;
        let land_target =
            whole + (SPIN_UP_TURNS + SPIN_OUT_TURNS) * FULL_TURN_DEG + sector_angle(index, len);
        self.rotation.push(Ease::Accelerate, half, up_target);
        self.rotation.push(Ease::Decelerate, half, land_target);

        debug!(
            "spin {} started: index {} ('{}'), {:.1} -> {:.1} deg",
            self.session.spin_count, index, self.config.prize_list[index], start, land_target
        );
    }

    // The rotation chain has fully settled: start the highlight pulse, then
    // apply the session mutations and report the landing.
    fn settle(&mut self, host: &mut dyn WheelHost) {
        let Some(index) = self.pending_prize.take() else {
            return;
        };
        let prize = self.config.prize_list[index].clone();

        self.highlight.stop();
        self.highlight.set(0.0);
        self.highlight.pulse(0.0, 1.0, HIGHLIGHT_PULSE_LEG);

        self.session.phase = if prize == TRY_AGAIN_PRIZE {
            Phase::LandedTryAgain
        } else {
            Phase::LandedClaimable
        };
        self.session.won_prize = Some(prize.clone());

        debug!("spin settled on '{}' at {:.1} deg", prize, self.rotation.value());
        host.on_complete(&prize);
    }
}
