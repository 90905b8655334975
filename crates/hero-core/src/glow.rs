//! Multi-coloured glow around the lens ring. Purely visual.

use crate::constants::{
    GLOW_BASE_AMPLITUDE_PX, GLOW_BASE_BLUR_PX, GLOW_BURST_AMPLITUDE_PX, GLOW_BURST_BLUR_PX,
    GLOW_BURST_DECAY, GLOW_SPEED, PULSE_FREQ, PULSE_WINDOW_SEC,
};

/// A coloured light orbiting a fixed anchor offset.
#[derive(Clone, Copy, Debug)]
pub struct GlowSource {
    pub anchor: [f32; 2],
    pub speed_mul: f32,
    pub rgba: [f32; 4],
}

pub const GLOW_SOURCES: [GlowSource; 3] = [
    GlowSource {
        anchor: [-25.0, -25.0],
        speed_mul: 1.1,
        rgba: [0.0, 220.0, 255.0, 0.85], // cyan
    },
    GlowSource {
        anchor: [25.0, -25.0],
        speed_mul: 0.9,
        rgba: [255.0, 0.0, 150.0, 0.8], // magenta
    },
    GlowSource {
        anchor: [-20.0, 25.0],
        speed_mul: 1.3,
        rgba: [255.0, 180.0, 0.0, 0.8], // amber
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowLight {
    pub offset: [f32; 2],
    pub rgba: [f32; 4],
}

/// Glow for one frame: three light offsets sharing one blur radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub lights: [GlowLight; 3],
    pub blur_px: f32,
    pub border_px: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowParams {
    pub base_amplitude_px: f32,
    pub burst_amplitude_px: f32,
    pub base_blur_px: f32,
    pub burst_blur_px: f32,
    pub burst_decay: f32,
    /// Orbit speed in radians per second.
    pub speed: f32,
    pub burst_window_sec: f64,
    pub burst_freq: f32,
}

impl Default for GlowParams {
    fn default() -> Self {
        Self {
            base_amplitude_px: GLOW_BASE_AMPLITUDE_PX,
            burst_amplitude_px: GLOW_BURST_AMPLITUDE_PX,
            base_blur_px: GLOW_BASE_BLUR_PX,
            burst_blur_px: GLOW_BURST_BLUR_PX,
            burst_decay: GLOW_BURST_DECAY,
            speed: GLOW_SPEED,
            burst_window_sec: PULSE_WINDOW_SEC,
            burst_freq: PULSE_FREQ,
        }
    }
}

/// Burst boost in [0, 1]: a rectified sinusoid fading out over the burst window.
pub fn burst_boost(since: f64, p: &GlowParams) -> f32 {
    if !(0.0..p.burst_window_sec).contains(&since) {
        return 0.0;
    }
    let t = since as f32;
    (p.burst_freq * t).sin().abs() * (-p.burst_decay * t).exp()
}

pub fn glow_at(now: f64, since: f64, border_px: f32, p: &GlowParams) -> Glow {
    let boost = burst_boost(since, p);
    let amplitude = p.base_amplitude_px + p.burst_amplitude_px * boost;
    let blur_px = p.base_blur_px + p.burst_blur_px * boost;
    let phase = now as f32 * p.speed;
    let lights = GLOW_SOURCES.map(|s| {
        let a = phase * s.speed_mul;
        GlowLight {
            offset: [s.anchor[0] + amplitude * a.cos(), s.anchor[1] + amplitude * a.sin()],
            rgba: s.rgba,
        }
    });
    Glow {
        lights,
        blur_px,
        border_px,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_glow_uses_base_blur() {
        let g = glow_at(12.0, f64::INFINITY, 20.0, &GlowParams::default());
        assert_eq!(g.blur_px, GLOW_BASE_BLUR_PX);
        for (light, src) in g.lights.iter().zip(GLOW_SOURCES.iter()) {
            let dx = light.offset[0] - src.anchor[0];
            let dy = light.offset[1] - src.anchor[1];
            assert!(((dx * dx + dy * dy).sqrt() - GLOW_BASE_AMPLITUDE_PX).abs() < 1e-3);
        }
    }

    #[test]
    fn burst_widens_blur() {
        let g = glow_at(0.0, 1.0 / 6.0, 20.0, &GlowParams::default());
        assert!(g.blur_px > GLOW_BASE_BLUR_PX + 40.0);
    }

    #[test]
    fn quieter_tuning_shrinks_orbit() {
        let p = GlowParams {
            base_amplitude_px: 5.0,
            ..GlowParams::default()
        };
        let g = glow_at(3.0, f64::INFINITY, 20.0, &p);
        let src = GLOW_SOURCES[0];
        let dx = g.lights[0].offset[0] - src.anchor[0];
        let dy = g.lights[0].offset[1] - src.anchor[1];
        assert!(((dx * dx + dy * dy).sqrt() - 5.0).abs() < 1e-3);
    }
}
