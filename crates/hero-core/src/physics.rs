//! Physics world wrapping Rapier 2D.
//!
//! World units are document pixels with y pointing down, so gravity is
//! positive. Only this module touches Rapier types directly.

use crate::constants::{
    BODY_DENSITY, BODY_FRICTION, BODY_LINEAR_DAMPING, BODY_RESTITUTION, CHAR_ADVANCE_RATIO,
    CHAR_CHAMFER_PX, CHAR_SIZE_PX, CHAR_WIDTH_RATIO, GROUND_HALF_HEIGHT_PX, MAX_STEP_SEC,
};
use glam::Vec2;
use rapier2d::prelude::*;

pub use rapier2d::prelude::RigidBodyHandle as BodyHandle;

/// Position, rotation and motion of one body, copied out of the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyPose {
    pub position: Vec2,
    pub angle: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
}

/// Body shape, material and integration tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyParams {
    pub char_size_px: f32,
    pub char_width_ratio: f32,
    pub char_advance_ratio: f32,
    pub char_chamfer_px: f32,
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
    /// Linear damping of word bodies outside gusts.
    pub air_friction: f32,
    pub max_step_sec: f32,
    pub ground_half_height_px: f32,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            char_size_px: CHAR_SIZE_PX,
            char_width_ratio: CHAR_WIDTH_RATIO,
            char_advance_ratio: CHAR_ADVANCE_RATIO,
            char_chamfer_px: CHAR_CHAMFER_PX,
            restitution: BODY_RESTITUTION,
            friction: BODY_FRICTION,
            density: BODY_DENSITY,
            air_friction: BODY_LINEAR_DAMPING,
            max_step_sec: MAX_STEP_SEC,
            ground_half_height_px: GROUND_HALF_HEIGHT_PX,
        }
    }
}

impl BodyParams {
    /// Horizontal collider offsets for a word of `char_count` characters.
    pub fn char_offsets(&self, char_count: usize) -> impl Iterator<Item = f32> {
        let n = char_count.max(1);
        let advance = self.char_size_px * self.char_advance_ratio;
        let mid = (n - 1) as f32 * 0.5;
        (0..n).map(move |i| (i as f32 - mid) * advance)
    }
}

/// Wraps Rapier's pipeline and body/collider sets plus the static ground.
pub struct PhysicsWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    params: BodyParams,
    ground: Option<(RigidBodyHandle, ColliderHandle)>,
}

impl PhysicsWorld {
    pub fn new(gravity_px_per_sec2: f32, params: BodyParams) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Solver tolerances scale with the size of a typical body.
        integration_parameters.length_unit = params.char_size_px;
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, gravity_px_per_sec2],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            params,
            ground: None,
        }
    }

    /// Step the simulation by `dt` seconds, clamped to keep a stalled tab stable.
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        self.integration_parameters.dt = dt.min(self.params.max_step_sec);

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Number of dynamic bodies (the ground is not counted).
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len() - usize::from(self.ground.is_some())
    }

    /// Insert a word body: one rounded box per character, laid out left to
    /// right and centred on `position`.
    pub fn insert_word(&mut self, position: Vec2, char_count: usize) -> RigidBodyHandle {
        let p = self.params;
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .linear_damping(p.air_friction)
            .can_sleep(false)
            .ccd_enabled(true)
            .build();
        let handle = self.rigid_body_set.insert(body);

        let chamfer = p.char_chamfer_px.min(p.char_size_px * 0.25).max(0.0);
        for offset_x in p.char_offsets(char_count) {
            let collider = ColliderBuilder::round_cuboid(
                p.char_size_px * p.char_width_ratio * 0.5 - chamfer,
                p.char_size_px * 0.5 - chamfer,
                chamfer,
            )
            .translation(vector![offset_x, 0.0])
            .restitution(p.restitution)
            .friction(p.friction)
            .density(p.density)
            .build();
            self.collider_set
                .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        }
        handle
    }

    /// Remove a body and its colliders. Returns false if it was already gone.
    pub fn remove(&mut self, handle: RigidBodyHandle) -> bool {
        self.rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some()
    }

    pub fn pose(&self, handle: RigidBodyHandle) -> Option<BodyPose> {
        self.rigid_body_set.get(handle).map(|b| BodyPose {
            position: Vec2::new(b.translation().x, b.translation().y),
            angle: b.rotation().angle(),
            velocity: Vec2::new(b.linvel().x, b.linvel().y),
            angular_velocity: b.angvel(),
        })
    }

    pub fn set_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(b) = self.rigid_body_set.get_mut(handle) {
            b.set_translation(vector![position.x, position.y], true);
        }
    }

    /// Add a velocity change (a mass-independent impulse).
    pub fn kick(&mut self, handle: RigidBodyHandle, delta_v: Vec2, delta_spin: f32) {
        if let Some(b) = self.rigid_body_set.get_mut(handle) {
            let v = *b.linvel() + vector![delta_v.x, delta_v.y];
            b.set_linvel(v, true);
            let w = b.angvel() + delta_spin;
            b.set_angvel(w, true);
        }
    }

    pub fn set_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(b) = self.rigid_body_set.get_mut(handle) {
            b.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    pub fn air_friction(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.rigid_body_set.get(handle).map(|b| b.linear_damping())
    }

    pub fn set_air_friction(&mut self, handle: RigidBodyHandle, damping: f32) {
        if let Some(b) = self.rigid_body_set.get_mut(handle) {
            b.set_linear_damping(damping);
        }
    }

    /// Place (or move) the static ground: centred on `center_x`, top edge at
    /// `top_y`, spanning `half_width` to each side.
    pub fn place_ground(&mut self, center_x: f32, top_y: f32, half_width: f32) {
        let half_height = self.params.ground_half_height_px;
        let center = vector![center_x, top_y + half_height];
        let half_width = half_width.max(1.0);
        match self.ground {
            Some((body, collider)) => {
                if let Some(b) = self.rigid_body_set.get_mut(body) {
                    b.set_translation(center, true);
                }
                if let Some(c) = self.collider_set.get_mut(collider) {
                    c.set_shape(SharedShape::cuboid(half_width, half_height));
                }
            }
            None => {
                let body = RigidBodyBuilder::fixed().translation(center).build();
                let body = self.rigid_body_set.insert(body);
                let collider = ColliderBuilder::cuboid(half_width, half_height)
                    .friction(self.params.friction)
                    .build();
                let collider =
                    self.collider_set
                        .insert_with_parent(collider, body, &mut self.rigid_body_set);
                self.ground = Some((body, collider));
            }
        }
    }

    /// Top edge of the ground in document coordinates.
    pub fn ground_top(&self) -> Option<f32> {
        let (body, _) = self.ground?;
        self.rigid_body_set
            .get(body)
            .map(|b| b.translation().y - self.params.ground_half_height_px)
    }

    pub fn has_ground(&self) -> bool {
        self.ground.is_some()
    }

    /// Drop every body, the ground included.
    pub fn clear(&mut self) {
        let handles: Vec<RigidBodyHandle> = self.rigid_body_set.iter().map(|(h, _)| h).collect();
        for h in handles {
            self.remove(h);
        }
        self.ground = None;
    }
}
