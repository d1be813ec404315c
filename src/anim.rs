// src/anim.rs
//! Scalar tween channel with a tiny queueing system.
//!
//! Usage sketch:
//! ```ignore
//! use crate::anim::{Channel, Ease};
//!
//! let mut rot = Channel::new(0.0);
//!
//! // queue segments; each begins only after the previous one settles
//! rot.push(Ease::Accelerate, 3.0, 3600.0);
//! rot.push(Ease::Decelerate, 3.0, 9090.0);
//!
//! // each frame
//! rot.update(dt);
//! let angle = rot.value();
//! ```
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quad-in: slow start, fast finish.
    Accelerate,
    /// Quad-out: fast start, slow finish.
    Decelerate,
}

fn ease_apply(e: Ease, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match e {
        Ease::Linear => t,
        Ease::Accelerate => t * t,
        Ease::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
    }
}

/// One timed move toward an absolute target value.
#[derive(Clone, Debug)]
struct Segment {
    ease: Ease,
    dur: f32,
    to: f32,
    // `from` is captured on the first tick so queued segments chain from
    // wherever the previous one actually settled.
    from: f32,
    elapsed: f32,
    prepared: bool,
}

impl Segment {
    fn new(ease: Ease, dur: f32, to: f32) -> Self {
        Self { ease, dur: dur.max(0.0), to, from: 0.0, elapsed: 0.0, prepared: false }
    }

    // Returns the slice of dt actually consumed and whether the segment
    // finished. The final tick consumes exactly the remaining duration, so
    // the caller's dt carry stays exact across segment boundaries.
    fn update(&mut self, value: &mut f32, dt: f32) -> (f32, bool) {
        if !self.prepared {
            self.from = *value;
            self.prepared = true;
        }
        if self.dur == 0.0 {
            *value = self.to;
            return (0.0, true);
        }
        let remaining = self.dur - self.elapsed;
        let done = dt >= remaining;
        let consumed = if done { remaining } else { dt };
        self.elapsed = if done { self.dur } else { self.elapsed + dt };
        let a = ease_apply(self.ease, self.elapsed / self.dur);
        *value = self.from + (self.to - self.from) * a;
        (consumed, done)
    }
}

/// Indefinite alternating sweep between two values. Never finishes; it runs
/// until the channel is explicitly stopped.
#[derive(Clone, Debug)]
struct Pulse {
    low: f32,
    high: f32,
    leg: f32,
    elapsed: f32,
    rising: bool,
}

impl Pulse {
    fn tick(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        while self.elapsed >= self.leg {
            self.elapsed -= self.leg;
            self.rising = !self.rising;
        }
        let t = self.elapsed / self.leg;
        if self.rising {
            self.low + (self.high - self.low) * t
        } else {
            self.high - (self.high - self.low) * t
        }
    }
}

#[derive(Clone, Debug)]
enum Step {
    Segment(Segment),
    Pulse(Pulse),
}

/// A single animated value plus its queue of pending steps.
#[derive(Clone, Debug)]
pub struct Channel {
    value: f32,
    queue: VecDeque<Step>,
    current: Option<Step>,
}

impl Channel {
    pub fn new(initial: f32) -> Self {
        Self { value: initial, queue: VecDeque::new(), current: None }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Force the value without animating. Queued steps are unaffected.
    pub fn set(&mut self, v: f32) {
        self.value = v;
    }

    /// Drop the running step and everything queued behind it.
    pub fn stop(&mut self) {
        self.queue.clear();
        self.current = None;
    }

    /// Queue a timed move toward `to`.
    pub fn push(&mut self, ease: Ease, dur: f32, to: f32) {
        self.queue.push_back(Step::Segment(Segment::new(ease, dur, to)));
    }

    /// Queue an endless alternating sweep (`leg` time units per direction).
    pub fn pulse(&mut self, low: f32, high: f32, leg: f32) {
        self.queue.push_back(Step::Pulse(Pulse {
            low,
            high,
            leg: leg.max(f32::EPSILON),
            elapsed: 0.0,
            rising: true,
        }));
    }

    /// True when nothing is running or queued. A pulse never goes idle.
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }

    pub fn update(&mut self, mut dt: f32) {
        while dt > 0.0 {
            if self.current.is_none() {
                self.current = self.queue.pop_front();
            }
            let Some(step) = self.current.as_mut() else {
                break;
            };

            let finished_now = match step {
                Step::Pulse(p) => {
                    // indefinite: consume the rest of this frame
                    self.value = p.tick(dt);
                    dt = 0.0;
                    false
                }
                Step::Segment(seg) => {
                    let (consumed, done) = seg.update(&mut self.value, dt);
                    dt -= consumed;
                    done
                }
            };

            if finished_now {
                // Snap to the exact target so the next step chains cleanly.
                if let Some(Step::Segment(seg)) = self.current.take() {
                    self.value = seg.to;
                }
                // Loop continues to spend remaining dt on the next step.
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_reaches_exact_target() {
        let mut ch = Channel::new(0.0);
        ch.push(Ease::Linear, 1.0, 10.0);
        ch.update(0.5);
        assert!((ch.value() - 5.0).abs() < 1e-5);
        ch.update(0.5);
        assert_eq!(ch.value(), 10.0);
        assert!(ch.is_idle());
    }

    #[test]
    fn accelerate_is_slow_then_fast() {
        let mut ch = Channel::new(0.0);
        ch.push(Ease::Accelerate, 1.0, 100.0);
        ch.update(0.5);
        // quad-in: 25% progress at the halfway point
        assert!((ch.value() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn decelerate_is_fast_then_slow() {
        let mut ch = Channel::new(0.0);
        ch.push(Ease::Decelerate, 1.0, 100.0);
        ch.update(0.5);
        // quad-out: 75% progress at the halfway point
        assert!((ch.value() - 75.0).abs() < 1e-4);
    }

    #[test]
    fn second_segment_waits_for_first() {
        let mut ch = Channel::new(0.0);
        ch.push(Ease::Linear, 1.0, 10.0);
        ch.push(Ease::Linear, 1.0, 30.0);
        // Entirely inside segment 1: segment 2 has not moved the value yet.
        ch.update(0.9);
        assert!(ch.value() <= 10.0);
        // Crossing the boundary carries leftover dt into segment 2.
        ch.update(0.6);
        assert!((ch.value() - 20.0).abs() < 1e-4);
        ch.update(0.5);
        assert_eq!(ch.value(), 30.0);
        assert!(ch.is_idle());
    }

    #[test]
    fn fractional_ticks_summing_to_the_full_duration_settle() {
        // The dt carried over a segment boundary is inexact in f32; the
        // final tick must still close out the second segment.
        let mut ch = Channel::new(0.0);
        ch.push(Ease::Accelerate, 0.5, 10.0);
        ch.push(Ease::Decelerate, 0.5, 20.0);
        ch.update(0.9);
        ch.update(0.1);
        assert_eq!(ch.value(), 20.0);
        assert!(ch.is_idle());
    }

    #[test]
    fn oversized_dt_settles_whole_queue() {
        let mut ch = Channel::new(0.0);
        ch.push(Ease::Accelerate, 1.0, 10.0);
        ch.push(Ease::Decelerate, 1.0, 25.0);
        ch.update(100.0);
        assert_eq!(ch.value(), 25.0);
        assert!(ch.is_idle());
    }

    #[test]
    fn segments_chain_from_settled_value() {
        let mut ch = Channel::new(5.0);
        ch.push(Ease::Linear, 1.0, 15.0);
        ch.update(1.0);
        ch.push(Ease::Linear, 1.0, 20.0);
        ch.update(0.5);
        // 15 -> 20 over 1s, half elapsed
        assert!((ch.value() - 17.5).abs() < 1e-4);
    }

    #[test]
    fn pulse_alternates_and_never_idles() {
        let mut ch = Channel::new(0.0);
        ch.pulse(0.0, 1.0, 0.5);
        ch.update(0.25);
        assert!((ch.value() - 0.5).abs() < 1e-5);
        ch.update(0.25);
        assert!((ch.value() - 1.0).abs() < 1e-5);
        ch.update(0.25);
        assert!((ch.value() - 0.5).abs() < 1e-5);
        ch.update(0.25);
        assert!(ch.value().abs() < 1e-5);
        assert!(!ch.is_idle());
    }

    #[test]
    fn stop_and_set_reset_the_channel() {
        let mut ch = Channel::new(0.0);
        ch.pulse(0.0, 1.0, 0.5);
        ch.update(0.25);
        ch.stop();
        ch.set(0.0);
        ch.update(10.0);
        assert_eq!(ch.value(), 0.0);
        assert!(ch.is_idle());
    }

    #[test]
    fn zero_duration_segment_applies_immediately() {
        let mut ch = Channel::new(1.0);
        ch.push(Ease::Linear, 0.0, 42.0);
        ch.update(0.001);
        assert_eq!(ch.value(), 42.0);
    }
}
