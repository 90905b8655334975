//! Options supplied by the page and tuning values used by the simulation.
//!
//! `HeroOptions` is what a page author writes (keywords, container height,
//! word weight, follow policy). `HeroConfig` holds every numeric tuning knob;
//! its `Default` mirrors `constants.rs` and tests override individual fields.

use crate::constants::*;
use crate::error::ConfigError;
use crate::glow::GlowParams;
use crate::motion::PulseParams;
use crate::physics::BodyParams;
use serde::Deserialize;

/// Two-tier device split: mobile below the breakpoint, desktop otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    #[inline]
    pub fn for_viewport_width(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// When pointer moves retarget the lens.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum FollowPolicy {
    #[default]
    Always,
    /// Follow only once the page is scrolled deeper than `threshold_px`.
    #[serde(rename_all = "camelCase")]
    AfterScroll { threshold_px: f32 },
}

/// Page-supplied options, usually read from a `data-hero-options` attribute.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroOptions {
    pub keywords: Vec<String>,
    pub container_height: String,
    pub word_font_weight: String,
    pub follow: FollowPolicy,
    pub seed: Option<u64>,
}

impl Default for HeroOptions {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            container_height: "calc(95vh)".to_string(),
            word_font_weight: "100".to_string(),
            follow: FollowPolicy::Always,
            seed: None,
        }
    }
}

impl HeroOptions {
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
        .normalized()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let opts: HeroOptions = serde_json::from_str(json)?;
        Ok(opts.normalized())
    }

    /// Drops blank keywords so every emitted label carries visible text.
    fn normalized(mut self) -> Self {
        self.keywords.retain(|k| !k.trim().is_empty());
        self
    }
}

/// Numeric tuning, overridable for deterministic tests.
#[derive(Clone, Debug)]
pub struct HeroConfig {
    pub mobile_breakpoint_px: f32,
    pub lens_diameter_vmin_desktop: f32,
    pub lens_diameter_vmin_mobile: f32,
    pub lens_border_px_desktop: f32,
    pub lens_border_px_mobile: f32,
    pub default_offset_desktop: [f32; 2],
    pub default_offset_mobile: [f32; 2],
    pub follow_lerp: f32,

    pub burst_duration_sec: f64,
    pub after_duration_sec: f64,

    pub min_trigger_gap_sec: f64,
    pub spawn_count_min: usize,
    pub spawn_count_max: usize,
    pub particle_ttl_sec: f64,
    pub cleanup_margin_px: f32,
    pub gravity_px_per_sec2: f32,

    pub auto_blast_min_sec: f64,
    pub auto_blast_max_sec: f64,
    pub gust_min_sec: f64,
    pub gust_max_sec: f64,
    pub gust_duration_sec: f64,
    pub gust_strength: f32,

    pub launch_up_speed: f32,
    pub launch_side_speed: f32,
    pub launch_spin: f32,

    /// Fraction of the viewport height below which a particle counts as low.
    pub gust_target_y_ratio: f32,
    pub gust_speed_threshold: f32,
    pub gust_damping_floor: f32,
    pub gust_lift: f32,
    pub gust_low_lift_multiplier: f32,
    pub gust_lift_jitter: f32,
    pub gust_spin_min: f32,
    pub gust_spin_span: f32,

    pub pulse: PulseParams,
    pub glow: GlowParams,
    pub body: BodyParams,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            lens_diameter_vmin_desktop: LENS_DIAMETER_VMIN_DESKTOP,
            lens_diameter_vmin_mobile: LENS_DIAMETER_VMIN_MOBILE,
            lens_border_px_desktop: LENS_BORDER_PX_DESKTOP,
            lens_border_px_mobile: LENS_BORDER_PX_MOBILE,
            default_offset_desktop: DEFAULT_OFFSET_DESKTOP,
            default_offset_mobile: DEFAULT_OFFSET_MOBILE,
            follow_lerp: FOLLOW_LERP,
            burst_duration_sec: BURST_DURATION_SEC,
            after_duration_sec: AFTER_DURATION_SEC,
            min_trigger_gap_sec: MIN_TRIGGER_GAP_SEC,
            spawn_count_min: SPAWN_COUNT_MIN,
            spawn_count_max: SPAWN_COUNT_MAX,
            particle_ttl_sec: PARTICLE_TTL_SEC,
            cleanup_margin_px: CLEANUP_MARGIN_PX,
            gravity_px_per_sec2: GRAVITY_PX_PER_SEC2,
            auto_blast_min_sec: AUTO_BLAST_MIN_SEC,
            auto_blast_max_sec: AUTO_BLAST_MAX_SEC,
            gust_min_sec: GUST_MIN_SEC,
            gust_max_sec: GUST_MAX_SEC,
            gust_duration_sec: GUST_DURATION_SEC,
            gust_strength: GUST_STRENGTH,
            launch_up_speed: LAUNCH_UP_SPEED,
            launch_side_speed: LAUNCH_SIDE_SPEED,
            launch_spin: LAUNCH_SPIN,
            gust_target_y_ratio: GUST_TARGET_Y_RATIO,
            gust_speed_threshold: GUST_SPEED_THRESHOLD,
            gust_damping_floor: GUST_DAMPING_FLOOR,
            gust_lift: GUST_LIFT,
            gust_low_lift_multiplier: GUST_LOW_LIFT_MULTIPLIER,
            gust_lift_jitter: GUST_LIFT_JITTER,
            gust_spin_min: GUST_SPIN_MIN,
            gust_spin_span: GUST_SPIN_SPAN,
            pulse: PulseParams::default(),
            glow: GlowParams::default(),
            body: BodyParams::default(),
        }
    }
}

impl HeroConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "spawn_count",
            self.spawn_count_min as f64,
            self.spawn_count_max as f64,
        )?;
        if self.spawn_count_min == 0 {
            return Err(ConfigError::InvalidValue {
                name: "spawn_count_min",
                value: 0.0,
            });
        }
        check_range("auto_blast_delay", self.auto_blast_min_sec, self.auto_blast_max_sec)?;
        check_range("gust_delay", self.gust_min_sec, self.gust_max_sec)?;
        check_positive("auto_blast_min_sec", self.auto_blast_min_sec)?;
        check_positive("gust_min_sec", self.gust_min_sec)?;
        check_positive("particle_ttl_sec", self.particle_ttl_sec)?;
        check_positive("gust_duration_sec", self.gust_duration_sec)?;
        check_positive("burst_duration_sec", self.burst_duration_sec)?;
        check_positive("mobile_breakpoint_px", self.mobile_breakpoint_px as f64)?;
        check_positive("lens_diameter_vmin_desktop", self.lens_diameter_vmin_desktop as f64)?;
        check_positive("lens_diameter_vmin_mobile", self.lens_diameter_vmin_mobile as f64)?;
        check_positive("min_trigger_gap_sec", self.min_trigger_gap_sec)?;
        check_positive("pulse.window_sec", self.pulse.window_sec)?;
        check_positive("glow.burst_window_sec", self.glow.burst_window_sec)?;
        check_positive("body.char_size_px", self.body.char_size_px as f64)?;
        check_positive("body.density", self.body.density as f64)?;
        check_positive("body.max_step_sec", self.body.max_step_sec as f64)?;
        check_positive("body.ground_half_height_px", self.body.ground_half_height_px as f64)?;
        if !(0.0..=1.0).contains(&self.gust_target_y_ratio) {
            return Err(ConfigError::InvalidValue {
                name: "gust_target_y_ratio",
                value: self.gust_target_y_ratio as f64,
            });
        }
        if !(self.follow_lerp > 0.0 && self.follow_lerp <= 1.0) {
            return Err(ConfigError::InvalidValue {
                name: "follow_lerp",
                value: self.follow_lerp as f64,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn device_class(&self, viewport_width: f32) -> DeviceClass {
        DeviceClass::for_viewport_width(viewport_width, self.mobile_breakpoint_px)
    }

    #[inline]
    pub fn lens_diameter_vmin(&self, device: DeviceClass) -> f32 {
        match device {
            DeviceClass::Mobile => self.lens_diameter_vmin_mobile,
            DeviceClass::Desktop => self.lens_diameter_vmin_desktop,
        }
    }

    #[inline]
    pub fn lens_border_px(&self, device: DeviceClass) -> f32 {
        match device {
            DeviceClass::Mobile => self.lens_border_px_mobile,
            DeviceClass::Desktop => self.lens_border_px_desktop,
        }
    }

    #[inline]
    pub fn default_offset(&self, device: DeviceClass) -> [f32; 2] {
        match device {
            DeviceClass::Mobile => self.default_offset_mobile,
            DeviceClass::Desktop => self.default_offset_desktop,
        }
    }
}

fn check_range(name: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvalidRange { name, min, max });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value > 0.0) {
        return Err(ConfigError::InvalidValue { name, value });
    }
    Ok(())
}
