//! Particle emission and physics engine.
//!
//! Owns the physics world and the registry of live word particles. Every
//! body and its registry entry are created together in [`ParticleEngine::trigger`]
//! and destroyed together in [`ParticleEngine::remove`], which is idempotent so
//! TTL expiry and off-screen cleanup may race freely.

use crate::config::HeroConfig;
use crate::physics::{BodyHandle, BodyPose, PhysicsWorld};
use crate::viewport::Viewport;
use fnv::FnvHashMap;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

pub type ParticleId = u64;

/// Ids spawned by one trigger (2..=4 with default tuning).
pub type SpawnBatch = SmallVec<[Spawned; 4]>;

#[derive(Clone, Debug, PartialEq)]
pub struct Spawned {
    pub id: ParticleId,
    pub text: String,
}

/// One emitted word label.
#[derive(Clone, Debug)]
pub struct Particle {
    pub id: ParticleId,
    pub text: String,
    pub spawned_at: f64,
    body: BodyHandle,
}

/// Why a particle left the live set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalCause {
    Expired,
    OffScreen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removed {
    pub id: ParticleId,
    pub cause: RemovalCause,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GustDirection {
    Left,
    Right,
}

impl GustDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            GustDirection::Left => -1.0,
            GustDirection::Right => 1.0,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            GustDirection::Right
        } else {
            GustDirection::Left
        }
    }
}

/// A gust in progress: saved air friction per affected particle.
#[derive(Clone, Debug)]
struct ActiveGust {
    ends_at: f64,
    saved_friction: Vec<(ParticleId, f32)>,
}

/// Rendering view of a live particle.
#[derive(Clone, Debug)]
pub struct ParticleView<'a> {
    pub id: ParticleId,
    pub text: &'a str,
    pub pose: BodyPose,
}

pub struct ParticleEngine {
    cfg: HeroConfig,
    keywords: Vec<String>,
    world: PhysicsWorld,
    particles: FnvHashMap<ParticleId, Particle>,
    rng: StdRng,
    next_id: ParticleId,
    last_trigger_at: Option<f64>,
    gust: Option<ActiveGust>,
}

impl ParticleEngine {
    pub fn new(cfg: HeroConfig, keywords: Vec<String>, rng: StdRng) -> Self {
        let world = PhysicsWorld::new(cfg.gravity_px_per_sec2, cfg.body);
        Self {
            cfg,
            keywords,
            world,
            particles: FnvHashMap::default(),
            rng,
            next_id: 1,
            last_trigger_at: None,
            gust: None,
        }
    }

    #[inline]
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    #[inline]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: ParticleId) -> bool {
        self.particles.contains_key(&id)
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.world.body_count()
    }

    /// Time of the last successful trigger.
    #[inline]
    pub fn last_trigger_at(&self) -> Option<f64> {
        self.last_trigger_at
    }

    /// Seconds since the last successful trigger; infinite if none.
    #[inline]
    pub fn since_trigger(&self, now: f64) -> f64 {
        self.last_trigger_at
            .map(|t| now - t)
            .unwrap_or(f64::INFINITY)
    }

    #[inline]
    pub fn is_gusting(&self) -> bool {
        self.gust.is_some()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    pub fn pose(&self, id: ParticleId) -> Option<BodyPose> {
        self.particles
            .get(&id)
            .and_then(|p| self.world.pose(p.body))
    }

    /// Live particles in id (spawn) order.
    pub fn views(&self) -> Vec<ParticleView<'_>> {
        let mut out: Vec<ParticleView<'_>> = self
            .particles
            .values()
            .filter_map(|p| {
                self.world.pose(p.body).map(|pose| ParticleView {
                    id: p.id,
                    text: &p.text,
                    pose,
                })
            })
            .collect();
        out.sort_by_key(|v| v.id);
        out
    }

    /// Emit a batch of words from `origin` (document coordinates).
    ///
    /// Silently ignored when there are no keywords or when called within the
    /// minimum gap of the previous trigger.
    pub fn trigger(&mut self, now: f64, origin: Vec2) -> Option<SpawnBatch> {
        if self.keywords.is_empty() {
            log::debug!("[engine] trigger ignored: no keywords");
            return None;
        }
        if let Some(last) = self.last_trigger_at {
            if now - last < self.cfg.min_trigger_gap_sec {
                log::debug!("[engine] trigger rate-limited ({:.3}s since last)", now - last);
                return None;
            }
        }
        let origin = if origin.is_finite() { origin } else { Vec2::ZERO };
        self.last_trigger_at = Some(now);

        let count = self
            .rng
            .gen_range(self.cfg.spawn_count_min..=self.cfg.spawn_count_max);
        let mut batch = SpawnBatch::new();
        for _ in 0..count {
            let Some(text) = self.keywords.choose(&mut self.rng).cloned() else {
                break;
            };
            let id = self.next_id;
            self.next_id += 1;

            let body = self.world.insert_word(origin, text.chars().count());
            let side = (self.rng.gen::<f32>() - 0.5) * self.cfg.launch_side_speed;
            let spin = (self.rng.gen::<f32>() - 0.5) * self.cfg.launch_spin;
            self.world
                .kick(body, Vec2::new(side, -self.cfg.launch_up_speed), spin);

            self.particles.insert(
                id,
                Particle {
                    id,
                    text: text.clone(),
                    spawned_at: now,
                    body,
                },
            );
            batch.push(Spawned { id, text });
        }
        log::debug!(
            "[engine] blast at ({:.0},{:.0}): {} words, {} live",
            origin.x,
            origin.y,
            batch.len(),
            self.particles.len()
        );
        Some(batch)
    }

    /// Push slow or low particles sideways. Returns false, doing nothing, while
    /// a previous gust is still in progress.
    pub fn apply_gust(
        &mut self,
        now: f64,
        direction: GustDirection,
        strength: f32,
        vp: &Viewport,
    ) -> bool {
        if self.gust.is_some() {
            log::debug!("[gust] skipped: gust already in progress");
            return false;
        }
        let dir = direction.sign();
        let cfg = &self.cfg;
        let target_y = vp.scroll.y + vp.height * cfg.gust_target_y_ratio;
        let mut saved_friction = Vec::new();

        let mut ids: Vec<ParticleId> = self.particles.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let body = self.particles[&id].body;
            let (Some(pose), Some(friction)) = (self.world.pose(body), self.world.air_friction(body))
            else {
                continue;
            };
            let is_low = pose.position.y >= target_y;
            let is_slow = pose.velocity.length() <= cfg.gust_speed_threshold;
            if !(is_low || is_slow) {
                continue;
            }
            saved_friction.push((id, friction));
            self.world
                .set_air_friction(body, cfg.gust_damping_floor.max(friction * 2.0));

            let lift = cfg.gust_lift * if is_low { cfg.gust_low_lift_multiplier } else { 1.0 };
            let jitter = (self.rng.gen::<f32>() - 0.5) * cfg.gust_lift_jitter;
            let spin = dir * (cfg.gust_spin_min + self.rng.gen::<f32>() * cfg.gust_spin_span);
            self.world
                .kick(body, Vec2::new(dir * strength, -lift + jitter), spin);
        }

        log::debug!(
            "[gust] {:?} strength {:.0}: {} of {} particles",
            direction,
            strength,
            saved_friction.len(),
            self.particles.len()
        );
        self.gust = Some(ActiveGust {
            ends_at: now + self.cfg.gust_duration_sec,
            saved_friction,
        });
        true
    }

    /// Restore air friction once the gust window has passed. Returns true on
    /// the call that ends the gust.
    pub fn settle_gust(&mut self, now: f64) -> bool {
        match &self.gust {
            Some(g) if now >= g.ends_at => {}
            _ => return false,
        }
        if let Some(g) = self.gust.take() {
            for (id, friction) in g.saved_friction {
                if let Some(p) = self.particles.get(&id) {
                    self.world.set_air_friction(p.body, friction);
                }
            }
        }
        true
    }

    /// Advance the simulation by `dt` seconds.
    #[inline]
    pub fn step(&mut self, dt: f32) {
        self.world.step(dt);
    }

    /// Remove every particle older than the TTL.
    pub fn expire(&mut self, now: f64) -> Vec<Removed> {
        let ttl = self.cfg.particle_ttl_sec;
        let mut ids: Vec<ParticleId> = self
            .particles
            .values()
            .filter(|p| now - p.spawned_at >= ttl)
            .map(|p| p.id)
            .collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter(|id| self.remove(*id))
            .map(|id| Removed {
                id,
                cause: RemovalCause::Expired,
            })
            .collect()
    }

    /// Remove every particle outside the expanded page bounds.
    pub fn cleanup_offscreen(&mut self, vp: &Viewport) -> Vec<Removed> {
        let m = self.cfg.cleanup_margin_px;
        let (min_x, max_x) = (-m, vp.width + m);
        let (min_y, max_y) = (-m, vp.document_extent() + m);

        let mut ids: Vec<ParticleId> = self
            .particles
            .values()
            .filter(|p| match self.world.pose(p.body) {
                Some(pose) => {
                    let (x, y) = (pose.position.x, pose.position.y);
                    !(x.is_finite() && y.is_finite())
                        || x < min_x
                        || x > max_x
                        || y < min_y
                        || y > max_y
                }
                None => true,
            })
            .map(|p| p.id)
            .collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter(|id| self.remove(*id))
            .map(|id| Removed {
                id,
                cause: RemovalCause::OffScreen,
            })
            .collect()
    }

    /// Remove a particle and its body. Returns false if it was already gone.
    pub fn remove(&mut self, id: ParticleId) -> bool {
        match self.particles.remove(&id) {
            Some(p) => {
                self.world.remove(p.body);
                log::debug!("[engine] removed particle {} ({})", id, p.text);
                true
            }
            None => false,
        }
    }

    /// Keep the ground just below the hero section, twice the viewport wide.
    pub fn place_ground(&mut self, vp: &Viewport) {
        self.world
            .place_ground(vp.width * 0.5, vp.hero_bottom_page_y(), vp.width);
    }

    pub fn ground_top(&self) -> Option<f32> {
        self.world.ground_top()
    }

    /// Move a particle; used by hosts replaying external input and by tests.
    pub fn set_position(&mut self, id: ParticleId, position: Vec2) {
        if let Some(p) = self.particles.get(&id) {
            self.world.set_position(p.body, position);
        }
    }

    pub fn set_velocity(&mut self, id: ParticleId, velocity: Vec2) {
        if let Some(p) = self.particles.get(&id) {
            self.world.set_velocity(p.body, velocity);
        }
    }

    pub fn air_friction(&self, id: ParticleId) -> Option<f32> {
        self.particles
            .get(&id)
            .and_then(|p| self.world.air_friction(p.body))
    }

    /// Drop all particles, the ground and any gust state.
    pub fn dispose(&mut self) -> usize {
        let n = self.particles.len();
        self.particles.clear();
        self.gust = None;
        self.world.clear();
        n
    }
}
