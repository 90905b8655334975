//! The kinetic hero: one owned state value tying the lens, the particle
//! engine and the ambient scheduler together.
//!
//! Hosts create it with [`KineticHero::mount`], forward platform events to the
//! `on_*`-style methods, call [`KineticHero::frame`] once per display refresh
//! and finally [`KineticHero::dispose`]. All methods are cheap and never block.

use crate::anchor::AnchorTracker;
use crate::config::{HeroConfig, HeroOptions};
use crate::error::ConfigError;
use crate::glow::{glow_at, Glow};
use crate::motion::{pulse_scale, LensState, Phase, PhaseTracker};
use crate::particles::{GustDirection, ParticleEngine, ParticleId, Removed, Spawned};
use crate::scheduler::{AmbientEvent, AmbientScheduler, TimerKind};
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Where to draw one word label: its centre in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteTransform {
    pub id: ParticleId,
    pub center: Vec2,
    pub angle: f32,
}

impl SpriteTransform {
    /// Top-left translation for an element of the given half size.
    #[inline]
    pub fn translate(&self, half_size: Vec2) -> Vec2 {
        self.center - half_size
    }
}

/// Lens render state for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensFrame {
    pub center: Vec2,
    pub radius_px: f32,
    pub scale: f32,
    pub diameter_vmin: f32,
    pub border_px: f32,
}

/// Everything a host needs to render one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub lens: LensFrame,
    pub glow: Glow,
    pub spawned: Vec<Spawned>,
    pub removed: Vec<Removed>,
    /// Poses of particles still alive after this frame. Never names an id
    /// that also appears in `removed`.
    pub sprites: Vec<SpriteTransform>,
    pub phase_changed: Option<Phase>,
    pub gust_started: bool,
}

pub struct KineticHero {
    cfg: HeroConfig,
    options: HeroOptions,
    viewport: Viewport,
    tracker: AnchorTracker,
    lens: LensState,
    engine: ParticleEngine,
    scheduler: AmbientScheduler,
    phase: PhaseTracker,
    last_frame_at: Option<f64>,
    pending_spawned: Vec<Spawned>,
    disposed: bool,
}

impl KineticHero {
    pub fn mount(
        options: HeroOptions,
        cfg: HeroConfig,
        viewport: Viewport,
        now: f64,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let seed = options.seed.unwrap_or_else(rand::random);
        let engine_rng = StdRng::seed_from_u64(seed);
        let timer_rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);

        let tracker = AnchorTracker::new(options.follow, &cfg, &viewport);
        let lens = LensState::at(tracker.target(), tracker.radius_px());
        let mut engine = ParticleEngine::new(cfg.clone(), options.keywords.clone(), engine_rng);
        engine.place_ground(&viewport);
        let scheduler = AmbientScheduler::new(&cfg, timer_rng);

        let mut hero = Self {
            cfg,
            options,
            viewport,
            tracker,
            lens,
            engine,
            scheduler,
            phase: PhaseTracker::default(),
            last_frame_at: None,
            pending_spawned: Vec::new(),
            disposed: false,
        };
        hero.arm_ambient(now);
        log::info!(
            "[hero] mounted: {} keywords, lens r={:.0}px at ({:.0},{:.0}), {:?}",
            hero.options.keywords.len(),
            hero.lens.radius_px,
            hero.lens.current.x,
            hero.lens.current.y,
            hero.tracker.device()
        );
        Ok(hero)
    }

    #[inline]
    pub fn options(&self) -> &HeroOptions {
        &self.options
    }

    #[inline]
    pub fn config(&self) -> &HeroConfig {
        &self.cfg
    }

    #[inline]
    pub fn lens(&self) -> &LensState {
        &self.lens
    }

    #[inline]
    pub fn tracker(&self) -> &AnchorTracker {
        &self.tracker
    }

    #[inline]
    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    /// Direct engine access for hosts that inject physics state.
    #[inline]
    pub fn engine_mut(&mut self) -> &mut ParticleEngine {
        &mut self.engine
    }

    #[inline]
    pub fn scheduler(&self) -> &AmbientScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase.current()
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.engine.len()
    }

    #[inline]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// User click on the hero root. Returns true when a blast was emitted.
    pub fn click(&mut self, now: f64) -> bool {
        if self.disposed {
            return false;
        }
        self.blast(now)
    }

    pub fn pointer_move(&mut self, client: Vec2) {
        self.tracker.pointer_moved(client);
        self.lens.target = self.tracker.target();
    }

    pub fn touch_move(&mut self, client: Vec2) {
        self.tracker.touch_moved(client);
        self.lens.target = self.tracker.target();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.tracker.resized(&self.cfg, &viewport);
        self.lens.radius_px = self.tracker.radius_px();
        self.lens.target = self.tracker.target();
        if !self.disposed {
            self.engine.place_ground(&viewport);
        }
    }

    pub fn scroll(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.tracker.scrolled(&self.cfg, &viewport);
        self.lens.target = self.tracker.target();
        if !self.disposed {
            self.engine.place_ground(&viewport);
        }
    }

    /// Document visibility changed. Hiding cancels both ambient timers;
    /// showing arms fresh ones from `now`.
    pub fn visibility_changed(&mut self, hidden: bool, now: f64) {
        if self.disposed {
            return;
        }
        self.scheduler.set_hidden(hidden);
        if !hidden {
            self.arm_ambient(now);
        }
    }

    /// One animation frame.
    ///
    /// Order: ambient timers, lens smoothing, physics step, TTL expiry, sprite
    /// sync, off-screen cleanup, phase.
    pub fn frame(&mut self, now: f64, viewport: Viewport) -> FrameOutput {
        self.viewport = viewport;
        let dt = self
            .last_frame_at
            .map(|t| (now - t).max(0.0) as f32)
            .unwrap_or(0.0);
        self.last_frame_at = Some(now);

        let mut gust_started = false;
        if !self.disposed {
            for ev in self.scheduler.poll(now) {
                match ev {
                    AmbientEvent::Blast => {
                        if !self.blast(now) {
                            // rate-limited or empty: keep the loop alive
                            self.arm_auto_blast(now);
                        }
                    }
                    AmbientEvent::Gust(direction) => {
                        gust_started |= self.gust(now, direction);
                    }
                }
            }
        }

        self.lens.target = self.tracker.target();
        self.lens.radius_px = self.tracker.radius_px();
        self.lens.step(self.cfg.follow_lerp);

        let mut removed = Vec::new();
        if !self.disposed {
            self.engine.step(dt);
            if self.engine.settle_gust(now) && !self.scheduler.is_hidden() {
                self.scheduler.arm(TimerKind::Gust, now);
            }
            removed.extend(self.engine.expire(now));
        }

        let mut sprites: Vec<SpriteTransform> = self
            .engine
            .views()
            .into_iter()
            .map(|v| SpriteTransform {
                id: v.id,
                center: viewport.to_viewport(v.pose.position),
                angle: v.pose.angle,
            })
            .collect();

        let offscreen = self.engine.cleanup_offscreen(&viewport);
        if !offscreen.is_empty() {
            sprites.retain(|s| !offscreen.iter().any(|r| r.id == s.id));
            removed.extend(offscreen);
        }

        let since = self.engine.since_trigger(now);
        let phase_changed = self.phase.update(Phase::at(
            since,
            self.cfg.burst_duration_sec,
            self.cfg.after_duration_sec,
        ));
        if let Some(p) = phase_changed {
            log::debug!("[hero] phase -> {}", p.as_str());
        }

        let device = self.tracker.device();
        let border_px = self.cfg.lens_border_px(device);
        FrameOutput {
            lens: LensFrame {
                center: self.lens.current,
                radius_px: self.lens.radius_px,
                scale: pulse_scale(since, &self.cfg.pulse),
                diameter_vmin: self.cfg.lens_diameter_vmin(device),
                border_px,
            },
            glow: glow_at(now, since, border_px, &self.cfg.glow),
            spawned: std::mem::take(&mut self.pending_spawned),
            removed,
            sprites,
            phase_changed,
            gust_started,
        }
    }

    /// Cancel every timer and release every particle and body. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.scheduler.cancel_all();
        let particles = self.engine.dispose();
        self.pending_spawned.clear();
        self.disposed = true;
        log::info!("[hero] disposed ({} particles released)", particles);
    }

    fn blast(&mut self, now: f64) -> bool {
        let origin = self.viewport.to_document(self.lens.current);
        match self.engine.trigger(now, origin) {
            Some(batch) => {
                self.pending_spawned.extend(batch);
                self.arm_auto_blast(now);
                true
            }
            None => false,
        }
    }

    fn gust(&mut self, now: f64, direction: GustDirection) -> bool {
        let strength = self.cfg.gust_strength;
        self.engine
            .apply_gust(now, direction, strength, &self.viewport)
    }

    fn arm_auto_blast(&mut self, now: f64) {
        if self.engine.has_keywords() {
            self.scheduler.arm(TimerKind::AutoBlast, now);
        }
    }

    fn arm_ambient(&mut self, now: f64) {
        if !self.engine.has_keywords() {
            return;
        }
        self.scheduler.arm(TimerKind::AutoBlast, now);
        if !self.engine.is_gusting() {
            self.scheduler.arm(TimerKind::Gust, now);
        }
    }
}
