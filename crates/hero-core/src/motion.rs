//! Per-frame lens motion: smoothing, pulse scale and phase tracking.

use crate::constants::{PULSE_AMPLITUDE, PULSE_DECAY, PULSE_FREQ, PULSE_WINDOW_SEC};
use glam::Vec2;

/// The circular cutout. `current` chases `target` every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensState {
    pub current: Vec2,
    pub target: Vec2,
    pub radius_px: f32,
}

impl LensState {
    pub fn at(position: Vec2, radius_px: f32) -> Self {
        Self {
            current: position,
            target: position,
            radius_px,
        }
    }

    /// One frame of exponential smoothing toward `target`.
    #[inline]
    pub fn step(&mut self, factor: f32) {
        self.current = smooth_toward(self.current, self.target, factor);
    }

    #[inline]
    pub fn distance_to_target(&self) -> f32 {
        self.current.distance(self.target)
    }
}

/// `current + (target - current) * factor`, per axis. Never overshoots for
/// factors in (0, 1].
#[inline]
pub fn smooth_toward(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor
}

/// Shape of the lens ring-out after a trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseParams {
    pub window_sec: f64,
    pub amplitude: f32,
    pub decay: f32,
    pub freq: f32,
}

impl Default for PulseParams {
    fn default() -> Self {
        Self {
            window_sec: PULSE_WINDOW_SEC,
            amplitude: PULSE_AMPLITUDE,
            decay: PULSE_DECAY,
            freq: PULSE_FREQ,
        }
    }
}

/// Damped ring-out of the lens right after a trigger; 1.0 when idle.
///
/// `since` is seconds since the last trigger (infinite if none yet).
pub fn pulse_scale(since: f64, p: &PulseParams) -> f32 {
    if !(0.0..p.window_sec).contains(&since) {
        return 1.0;
    }
    let t = (since / p.window_sec) as f32;
    1.0 + (-p.decay * t).exp() * (p.freq * t).sin() * p.amplitude
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Burst,
    After,
}

impl Phase {
    pub fn at(since: f64, burst_sec: f64, after_sec: f64) -> Self {
        if since < 0.0 || !since.is_finite() {
            Phase::Idle
        } else if since < burst_sec {
            Phase::Burst
        } else if since < burst_sec + after_sec {
            Phase::After
        } else {
            Phase::Idle
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Burst => "burst",
            Phase::After => "after",
        }
    }
}

/// Remembers the last reported phase so only real transitions surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhaseTracker {
    current: Phase,
}

impl PhaseTracker {
    #[inline]
    pub fn current(&self) -> Phase {
        self.current
    }

    pub fn update(&mut self, next: Phase) -> Option<Phase> {
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_starts_and_ends_at_one() {
        let p = PulseParams::default();
        assert!((pulse_scale(0.0, &p) - 1.0).abs() < 1e-6);
        assert_eq!(pulse_scale(1.0, &p), 1.0);
        assert_eq!(pulse_scale(f64::INFINITY, &p), 1.0);
        // first lobe overshoots
        assert!(pulse_scale(0.15, &p) > 1.05);
    }

    #[test]
    fn flat_pulse_never_scales() {
        let p = PulseParams {
            amplitude: 0.0,
            ..PulseParams::default()
        };
        for i in 0..20 {
            assert_eq!(pulse_scale(i as f64 * 0.05, &p), 1.0);
        }
    }

    #[test]
    fn phase_windows() {
        assert_eq!(Phase::at(f64::INFINITY, 1.2, 4.0), Phase::Idle);
        assert_eq!(Phase::at(0.0, 1.2, 4.0), Phase::Burst);
        assert_eq!(Phase::at(1.2, 1.2, 4.0), Phase::After);
        assert_eq!(Phase::at(5.19, 1.2, 4.0), Phase::After);
        assert_eq!(Phase::at(5.2, 1.2, 4.0), Phase::Idle);
    }

    #[test]
    fn tracker_reports_only_changes() {
        let mut t = PhaseTracker::default();
        assert_eq!(t.update(Phase::Idle), None);
        assert_eq!(t.update(Phase::Burst), Some(Phase::Burst));
        assert_eq!(t.update(Phase::Burst), None);
        assert_eq!(t.update(Phase::After), Some(Phase::After));
    }
}
